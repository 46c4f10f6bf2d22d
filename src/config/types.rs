//! Configuration types

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::errors::{EngineError, Result};
use crate::common::instruments::Instrument;
use crate::strategy::density_momentum::{DensityMomentum, DensityMomentumParams};
use crate::strategy::engine::MIN_BOOK_DEPTH;
use crate::strategy::persistent_spread::{PersistentSpread, PersistentSpreadParams};
use crate::strategy::small_move_reversal::{SmallMoveReversal, SmallMoveReversalParams};
use crate::strategy::traits::BoxedStrategy;
use crate::tracker::MAX_WINDOW_SECONDS;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Decision engine settings shared by every instrument
    #[serde(default)]
    pub engine: EngineConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
    /// Instrument definitions that override or extend the built-in table.
    /// Keyed by table name only; engines are matched on `symbol`.
    #[serde(default)]
    pub instruments: HashMap<String, Instrument>,
}

impl AppConfig {
    /// Check thresholds and instrument overrides
    pub fn validate(&self) -> Result<()> {
        self.engine.policy.validate()?;
        for instrument in self.instruments.values() {
            instrument.validate()?;
        }
        Ok(())
    }
}

/// Decision engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Policy and its thresholds
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Minimum book depth; values below the engine floor are ignored
    #[serde(default = "default_min_book_depth")]
    pub min_book_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: PolicyConfig::default(),
            min_book_depth: default_min_book_depth(),
        }
    }
}

fn default_min_book_depth() -> usize {
    MIN_BOOK_DEPTH
}

/// Policy selection with its named thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    PersistentSpread(PersistentSpreadParams),
    SmallMoveReversal(SmallMoveReversalParams),
    DensityMomentum(DensityMomentumParams),
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::SmallMoveReversal(SmallMoveReversalParams::default())
    }
}

impl PolicyConfig {
    /// Instantiate the configured strategy
    pub fn build(&self) -> BoxedStrategy {
        match self {
            Self::PersistentSpread(params) => Box::new(PersistentSpread::new(params.clone())),
            Self::SmallMoveReversal(params) => Box::new(SmallMoveReversal::new(params.clone())),
            Self::DensityMomentum(params) => Box::new(DensityMomentum::new(params.clone())),
        }
    }

    /// Reject thresholds that would make a policy fire on every tick or never
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::PersistentSpread(p) => require(p.stop_loss_ticks > 0, "stop_loss_ticks must be positive"),
            Self::SmallMoveReversal(p) => {
                require(p.window_seconds > 0, "window_seconds must be positive")?;
                require(
                    p.window_seconds <= MAX_WINDOW_SECONDS,
                    "window_seconds must not exceed one day",
                )?;
                require(p.entry_ticks > Decimal::ZERO, "entry_ticks must be positive")?;
                require(
                    p.cancel_density_change_percent < Decimal::ZERO,
                    "cancel_density_change_percent must be negative",
                )?;
                require(p.take_profit_ticks > 0, "take_profit_ticks must be positive")?;
                require(p.stop_loss_ticks > 0, "stop_loss_ticks must be positive")
            }
            Self::DensityMomentum(p) => {
                require(p.entry_drop_ticks > 0, "entry_drop_ticks must be positive")?;
                require(p.momentum_confirmations > 0, "momentum_confirmations must be positive")?;
                require(p.stop_loss_ticks > 0, "stop_loss_ticks must be positive")
            }
        }
    }
}

fn require(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(EngineError::Configuration(message.to_string()))
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Buffer size of the tick channel between feed and engines
    #[serde(default = "default_channel_size")]
    pub channel_size: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            channel_size: default_channel_size(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_channel_size() -> usize {
    1000
}
