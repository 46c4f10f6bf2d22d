//! Trait definitions at the boundary between the decision core and its host

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::errors::Result;
use super::types::MarketTick;
use crate::strategy::types::{Decision, OrderIntent};

/// Source of market ticks (replay file, live feed adapter, ...)
///
/// Implementations must deliver ticks for a symbol in arrival order; the
/// window tracker assumes non-decreasing timestamps.
#[async_trait]
pub trait TickSource: Send + Sync {
    /// Start producing ticks into the provided channel
    ///
    /// Returns once the source is exhausted or the receiver is dropped.
    async fn start(&mut self, sender: mpsc::Sender<MarketTick>) -> Result<()>;

    /// Human-readable name of the source
    fn source_name(&self) -> &str;
}

/// Order-submission interface of the platform
///
/// Submission is fire-and-forget: nothing flows back into the decision that
/// produced the intent. Cancellation is expressed as re-submitting a limit
/// order on the same side at the same price.
#[cfg_attr(test, mockall::automock)]
pub trait IntentSink: Send {
    /// Submit a single limit order intent for `symbol`
    fn submit(&mut self, symbol: &str, intent: &OrderIntent);
}

/// Forward every intent of a decision to the sink, returning how many were sent
pub fn dispatch(sink: &mut dyn IntentSink, symbol: &str, decision: &Decision) -> usize {
    let intents = decision.intents();
    for intent in intents {
        sink.submit(symbol, intent);
    }
    intents.len()
}
