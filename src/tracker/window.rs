use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::trace;

use super::{percent_change, ticks_between};
use crate::common::types::Price;

/// Window length used when a policy does not override it
pub const DEFAULT_WINDOW_SECONDS: u64 = 8;

/// Longest window a configuration may ask for
pub const MAX_WINDOW_SECONDS: u64 = 86_400;

/// Window length for `seconds`, saturating at the longest representable duration
pub fn window_duration(seconds: u64) -> Duration {
    i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

/// A single timestamped observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackedSample<T> {
    pub timestamp: DateTime<Utc>,
    pub value: T,
}

/// Movement of the current sample against the oldest one in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WindowMovement {
    /// Signed, unrounded ticks from the reference price
    pub ticks_moved: Decimal,
    pub bid_density_change_percent: Decimal,
    pub ask_density_change_percent: Decimal,
}

/// Time-ordered samples of one series
#[derive(Debug, Clone)]
struct History<T> {
    entries: VecDeque<TrackedSample<T>>,
}

impl<T: Copy> History<T> {
    fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Drop every entry strictly older than `cutoff`
    fn evict_before(&mut self, cutoff: DateTime<Utc>) {
        while self
            .entries
            .front()
            .is_some_and(|entry| entry.timestamp < cutoff)
        {
            self.entries.pop_front();
        }
    }

    fn oldest(&self) -> Option<&TrackedSample<T>> {
        self.entries.front()
    }

    fn newest(&self) -> Option<&TrackedSample<T>> {
        self.entries.back()
    }

    fn push(&mut self, timestamp: DateTime<Utc>, value: T) {
        self.entries.push_back(TrackedSample { timestamp, value });
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Tracks price and bid/ask density over a trailing time window
///
/// Every update is compared against the oldest retained sample, so the
/// signal lags by up to the window length instead of being a tick-to-tick
/// delta. Histories only hold samples younger than the window, which bounds
/// memory by the event rate times the window length.
#[derive(Debug, Clone)]
pub struct SlidingWindowTracker {
    tick_size: Price,
    window: Duration,
    prices: History<Price>,
    bid_densities: History<Decimal>,
    ask_densities: History<Decimal>,
}

impl SlidingWindowTracker {
    pub fn new(tick_size: Price, window: Duration) -> Self {
        Self {
            tick_size,
            window,
            prices: History::new(),
            bid_densities: History::new(),
            ask_densities: History::new(),
        }
    }

    pub fn with_window_seconds(tick_size: Price, window_seconds: u64) -> Self {
        Self::new(tick_size, window_duration(window_seconds))
    }

    /// Record a sample and report movement against the window's reference
    pub fn update(
        &mut self,
        now: DateTime<Utc>,
        price: Price,
        bid_density: Decimal,
        ask_density: Decimal,
    ) -> WindowMovement {
        let stamp = match self.latest_timestamp() {
            Some(latest) if now < latest => {
                trace!(%now, %latest, "timestamp went backwards, skipping eviction");
                latest
            }
            _ => {
                self.evict(now);
                now
            }
        };

        let Some(price_reference) = self.prices.oldest().map(|s| s.value) else {
            self.record(stamp, price, bid_density, ask_density);
            return WindowMovement::default();
        };

        let bid_reference = self
            .bid_densities
            .oldest()
            .map_or(Decimal::ZERO, |s| s.value);
        let ask_reference = self
            .ask_densities
            .oldest()
            .map_or(Decimal::ZERO, |s| s.value);

        let movement = WindowMovement {
            ticks_moved: ticks_between(price, price_reference, self.tick_size),
            bid_density_change_percent: percent_change(bid_density, bid_reference),
            ask_density_change_percent: percent_change(ask_density, ask_reference),
        };

        self.record(stamp, price, bid_density, ask_density);
        movement
    }

    /// Forget every sample; the next update bootstraps a new reference
    pub fn reset(&mut self) {
        self.prices.clear();
        self.bid_densities.clear();
        self.ask_densities.clear();
    }

    /// Number of retained price samples
    pub fn len(&self) -> usize {
        self.prices.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.entries.is_empty()
    }

    /// Retained price samples, oldest first
    pub fn price_samples(&self) -> impl Iterator<Item = &TrackedSample<Price>> {
        self.prices.entries.iter()
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        [
            self.prices.newest().map(|s| s.timestamp),
            self.bid_densities.newest().map(|s| s.timestamp),
            self.ask_densities.newest().map(|s| s.timestamp),
        ]
        .into_iter()
        .flatten()
        .max()
    }

    fn evict(&mut self, now: DateTime<Utc>) {
        // A window reaching past the earliest representable instant keeps everything
        let Some(cutoff) = now.checked_sub_signed(self.window) else {
            return;
        };
        self.prices.evict_before(cutoff);
        self.bid_densities.evict_before(cutoff);
        self.ask_densities.evict_before(cutoff);
    }

    fn record(&mut self, stamp: DateTime<Utc>, price: Price, bid: Decimal, ask: Decimal) {
        self.prices.push(stamp, price);
        self.bid_densities.push(stamp, bid);
        self.ask_densities.push(stamp, ask);
    }
}
