use serde::Serialize;

use crate::common::types::Price;

/// Output of [`DensityMomentumCounter::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CounterReading {
    pub downward_ticks: u64,
}

/// Counts how far price has dropped below a fixed anchor
///
/// The anchor is the first price seen after construction or [`reset`], and it
/// never advances. `downward_ticks` grows with the deepest drop below the
/// anchor and snaps back to zero only when price climbs back to exactly one
/// tick below the anchor. Any other upward move leaves the count untouched.
///
/// The count is the deepest drop, not a running sum of per-update drops:
/// 100, 98, 98 reads 0, 2, 2. Summing would break the snapback sequence
/// 100, 99, 98, 99 reading 0, 1, 2, 0.
///
/// [`reset`]: DensityMomentumCounter::reset
#[derive(Debug, Clone)]
pub struct DensityMomentumCounter {
    tick_size: Price,
    anchor: Option<Price>,
    last_price: Option<Price>,
    downward_ticks: u64,
}

impl DensityMomentumCounter {
    pub fn new(tick_size: Price) -> Self {
        Self {
            tick_size,
            anchor: None,
            last_price: None,
            downward_ticks: 0,
        }
    }

    pub fn update(&mut self, price: Price) -> CounterReading {
        let Some(anchor) = self.anchor else {
            self.anchor = Some(price);
            self.last_price = Some(price);
            return CounterReading::default();
        };

        let ticks_moved = self.rounded_ticks(price - anchor);
        let rising = self.last_price.is_some_and(|last| price > last);

        if rising && price == anchor - self.tick_size {
            self.downward_ticks = 0;
        } else if ticks_moved < 0 {
            self.downward_ticks = self.downward_ticks.max(ticks_moved.unsigned_abs());
        }

        self.last_price = Some(price);
        CounterReading {
            downward_ticks: self.downward_ticks,
        }
    }

    /// Clear anchor and count; the next update re-anchors
    pub fn reset(&mut self) {
        self.anchor = None;
        self.last_price = None;
        self.downward_ticks = 0;
    }

    pub fn anchor(&self) -> Option<Price> {
        self.anchor
    }

    pub fn downward_ticks(&self) -> u64 {
        self.downward_ticks
    }

    /// Round half up, matching the platform's tick rounding
    fn rounded_ticks(&self, distance: Price) -> i64 {
        (2 * distance + self.tick_size).div_euclid(2 * self.tick_size)
    }
}
