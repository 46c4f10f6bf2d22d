//! Movement trackers
//!
//! Two ways of turning a stream of prices and book densities into signals:
//!
//! - [`SlidingWindowTracker`]: time-bounded histories, compares the current
//!   sample against the *oldest* sample still inside the window.
//! - [`DensityMomentumCounter`]: counts downward ticks from a fixed anchor
//!   price, with no time window at all.
//!
//! Both share [`percent_change`] so the zero-reference convention lives in
//! one place.

mod counter;
mod window;

pub use counter::{CounterReading, DensityMomentumCounter};
pub use window::{
    window_duration, SlidingWindowTracker, TrackedSample, WindowMovement, DEFAULT_WINDOW_SECONDS,
    MAX_WINDOW_SECONDS,
};

use rust_decimal::Decimal;

use crate::common::types::Price;

/// Relative change of `current` against `reference`, in percent
///
/// A zero reference has no baseline to compare against and yields exactly
/// zero, whatever `current` is.
pub fn percent_change(current: Decimal, reference: Decimal) -> Decimal {
    if reference.is_zero() {
        return Decimal::ZERO;
    }
    (current - reference) / reference * Decimal::ONE_HUNDRED
}

/// Signed, unrounded number of ticks between two prices
///
/// `tick_size` must be positive; instruments are validated before any
/// tracker is built.
pub fn ticks_between(current: Price, reference: Price, tick_size: Price) -> Decimal {
    Decimal::from(current - reference) / Decimal::from(tick_size)
}
