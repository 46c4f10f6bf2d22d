//! DensityQuoter Library
//!
//! A reactive market-making decision core. Each book update is turned into
//! zero or more limit-order intents, driven by short-horizon price movement
//! and book density.

pub mod common;
pub mod config;
pub mod replay;
pub mod strategy;
pub mod tracker;

// Re-export commonly used types
pub use common::errors::{EngineError, Result};
pub use common::instruments::Instrument;
pub use common::traits::{dispatch, IntentSink, TickSource};
pub use common::types::{
    BookAttributes, BookSnapshot, MarketTick, PositionState, Price, PriceLevel, RestingOrder, Side,
    UserTrade,
};
pub use config::types::{AppConfig, EngineConfig, PolicyConfig};
pub use replay::{LogSink, RecordingSink, ReplayFeed};

// Strategy types
pub use strategy::{
    BoxedStrategy, Decision, DecisionEngine, Diagnostics, EngineRegistry, IntentReason,
    OrderIntent, PositionPhase, RunState, Strategy, TickContext,
};
pub use tracker::{DensityMomentumCounter, SlidingWindowTracker, WindowMovement};
