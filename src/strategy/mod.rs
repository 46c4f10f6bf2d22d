//! Strategy module for quoting decisions
//!
//! This module provides the decision engine and the policies it can run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ASYNC (host harness)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TickSource (ReplayFeed)                                    │
//! │    - Produces MarketTick values in arrival order            │
//! │    - Sends them over an mpsc channel                        │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HOT PATH (sync)                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Tick arrives                                               │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  EngineRegistry → DecisionEngine (one per symbol)           │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  Strategy.on_tick(ctx, run state) → Go/NoGo                 │
//! │       │                                                     │
//! │       ▼ (if Go)                                             │
//! │  IntentSink                                                 │
//! │    - Host turns OrderIntents into real orders               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`Strategy`]: Trait implemented by each policy
//! - [`Decision`]: Go/NoGo enum returned by the engine
//! - [`OrderIntent`]: A limit order the host should place or cancel
//! - [`RunState`]: Per-engine trackers, anchors and diagnostics
//! - [`DecisionEngine`]: Validates ticks and drives one strategy
//! - [`EngineRegistry`]: Keeps one engine per instrument
//!
//! # Policies
//!
//! - [`PersistentSpread`]: quote one level off the touch, hedge once filled
//! - [`SmallMoveReversal`]: fade small moves that density leans against
//! - [`DensityMomentum`]: counter-based drop entries plus momentum quotes

pub mod density_momentum;
pub mod engine;
pub mod persistent_spread;
pub mod registry;
pub mod small_move_reversal;
pub mod state;
pub mod traits;
pub mod types;

pub use types::{Decision, IntentReason, OrderIntent, PositionPhase, TickContext};

pub use traits::{BoxedStrategy, Strategy};

pub use state::{Diagnostics, MomentumState, OrderAnchor, RunState};

pub use engine::{DecisionEngine, MIN_BOOK_DEPTH};
pub use registry::EngineRegistry;

pub use density_momentum::{DensityMomentum, DensityMomentumParams};
pub use persistent_spread::{PersistentSpread, PersistentSpreadParams};
pub use small_move_reversal::{SmallMoveReversal, SmallMoveReversalParams};
