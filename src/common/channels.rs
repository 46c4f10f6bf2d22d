//! Channel type definitions for feeding ticks from the host harness

use tokio::sync::mpsc;

use super::types::MarketTick;

/// Default channel buffer size
pub const DEFAULT_CHANNEL_SIZE: usize = 1000;

/// Create a new tick channel with the default buffer size
pub fn create_tick_channel() -> (mpsc::Sender<MarketTick>, mpsc::Receiver<MarketTick>) {
    mpsc::channel(DEFAULT_CHANNEL_SIZE)
}

/// Create a new tick channel with a custom buffer size
pub fn create_tick_channel_with_size(
    size: usize,
) -> (mpsc::Sender<MarketTick>, mpsc::Receiver<MarketTick>) {
    mpsc::channel(size.max(1))
}
