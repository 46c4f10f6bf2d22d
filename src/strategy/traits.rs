use chrono::Duration;

use crate::strategy::state::RunState;
use crate::strategy::types::{OrderIntent, TickContext};
use crate::tracker::{window_duration, DEFAULT_WINDOW_SECONDS};

/// Core strategy trait
///
/// A strategy is a set of thresholds plus the rules that read them. It holds
/// no mutable state of its own: everything that must survive between ticks
/// lives in the engine-owned [`RunState`] handed in on each call.
///
/// # Implementation Notes
///
/// - `on_tick` runs on every book update, potentially thousands of times a
///   second - no blocking, no I/O
/// - Intents go through [`RunState::emit`] so repeats are suppressed while
///   the host's order state is unchanged
/// - The book has already been checked against `required_depth`
pub trait Strategy: Send + Sync {
    /// Unique identifier for this strategy
    fn name(&self) -> &'static str;

    /// Minimum number of book levels the strategy indexes into
    fn required_depth(&self) -> usize {
        3
    }

    /// Length of the sliding window used by the run state's tracker
    fn window(&self) -> Duration {
        window_duration(DEFAULT_WINDOW_SECONDS)
    }

    /// Evaluate one tick, appending any intents to `out`
    fn on_tick(&self, ctx: &TickContext<'_>, state: &mut RunState, out: &mut Vec<OrderIntent>);
}

/// Boxed strategy for dynamic dispatch
pub type BoxedStrategy = Box<dyn Strategy>;
