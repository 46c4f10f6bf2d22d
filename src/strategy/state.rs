//! Per-engine run state
//!
//! Everything a strategy remembers between ticks lives here, typed and
//! defaulted. One `RunState` belongs to exactly one engine, i.e. one
//! (instrument, policy) pairing; nothing is shared across instruments.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::types::{OrderIntent, PositionPhase};
use crate::common::instruments::Instrument;
use crate::common::types::{PositionState, Price, Side};
use crate::tracker::{DensityMomentumCounter, SlidingWindowTracker, WindowMovement};

/// Price and density recorded when an entry order was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderAnchor {
    pub price: Price,
    pub density: Decimal,
}

/// Tick-to-tick scratch values used by the density momentum policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MomentumState {
    /// Bid density captured when tracking (re)started; zero means unset
    pub reference_bid_density: Decimal,
    pub last_bid: Option<Price>,
    pub last_bid_density: Decimal,
    pub last_ask_density: Decimal,
    /// Consecutive ticks with bid falling while ask density grows
    pub falling_streak: u32,
    /// Consecutive ticks with bid rising while bid density grows
    pub rising_streak: u32,
}

/// Advisory counters. Decision logic never reads them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub ticks_processed: u64,
    pub conditions_met: u64,
    pub order_attempts: u64,
    pub cancellations: u64,
    pub duplicates_suppressed: u64,
    pub tracker_resets: u64,
}

/// Last intent emitted per side
#[derive(Debug, Clone, Default)]
struct IntentLedger {
    bid: Option<OrderIntent>,
    ask: Option<OrderIntent>,
}

impl IntentLedger {
    fn slot_mut(&mut self, side: Side) -> &mut Option<OrderIntent> {
        match side {
            Side::Bid => &mut self.bid,
            Side::Ask => &mut self.ask,
        }
    }

    fn clear(&mut self) {
        self.bid = None;
        self.ask = None;
    }
}

#[derive(Debug, Clone)]
pub struct RunState {
    pub(crate) window: SlidingWindowTracker,
    pub(crate) counter: DensityMomentumCounter,
    pub(crate) bid_anchor: Option<OrderAnchor>,
    pub(crate) ask_anchor: Option<OrderAnchor>,
    /// Set once the opposing order for the current position was sent
    pub(crate) opposite_placed: bool,
    pub(crate) momentum: MomentumState,
    pub(crate) last_movement: Option<WindowMovement>,
    pub(crate) diagnostics: Diagnostics,
    ledger: IntentLedger,
    observed: Option<PositionState>,
    phase: Option<PositionPhase>,
}

impl RunState {
    pub fn new(instrument: &Instrument, window: Duration) -> Self {
        Self {
            window: SlidingWindowTracker::new(instrument.increment, window),
            counter: DensityMomentumCounter::new(instrument.increment),
            bid_anchor: None,
            ask_anchor: None,
            opposite_placed: false,
            momentum: MomentumState::default(),
            last_movement: None,
            diagnostics: Diagnostics::default(),
            ledger: IntentLedger::default(),
            observed: None,
            phase: None,
        }
    }

    pub fn window(&self) -> &SlidingWindowTracker {
        &self.window
    }

    pub fn counter(&self) -> &DensityMomentumCounter {
        &self.counter
    }

    pub fn anchor(&self, side: Side) -> Option<&OrderAnchor> {
        match side {
            Side::Bid => self.bid_anchor.as_ref(),
            Side::Ask => self.ask_anchor.as_ref(),
        }
    }

    pub fn opposite_placed(&self) -> bool {
        self.opposite_placed
    }

    pub fn momentum(&self) -> &MomentumState {
        &self.momentum
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn phase(&self) -> Option<PositionPhase> {
        self.phase
    }

    pub(crate) fn set_anchor(&mut self, side: Side, anchor: Option<OrderAnchor>) {
        match side {
            Side::Bid => self.bid_anchor = anchor,
            Side::Ask => self.ask_anchor = anchor,
        }
    }

    pub(crate) fn clear_anchors(&mut self) {
        self.bid_anchor = None;
        self.ask_anchor = None;
    }

    /// Record the phase for this tick, returning the previous one if it changed
    pub(crate) fn transition(&mut self, phase: PositionPhase) -> Option<PositionPhase> {
        let previous = self.phase.replace(phase);
        previous.filter(|p| *p != phase)
    }

    /// Record the host's position view; a change invalidates the intent ledger
    pub(crate) fn observe(&mut self, position: &PositionState) -> bool {
        if self.observed.as_ref() == Some(position) {
            return false;
        }
        self.observed = Some(*position);
        self.ledger.clear();
        true
    }

    /// Queue `intent` unless it repeats the last order sent on its side
    ///
    /// The host's position view has not changed since that order went out,
    /// so sending it again would duplicate a request still in flight.
    pub(crate) fn emit(&mut self, intent: OrderIntent, out: &mut Vec<OrderIntent>) -> bool {
        let slot = self.ledger.slot_mut(intent.side);
        if slot.is_some_and(|last| last.same_order(&intent)) {
            self.diagnostics.duplicates_suppressed += 1;
            debug!(side = %intent.side, price = intent.price, "suppressed duplicate intent");
            return false;
        }
        *slot = Some(intent);
        out.push(intent);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::types::IntentReason;

    fn state() -> RunState {
        let instrument = Instrument::new("TEST", 1, 1, 0, "Test", "Test").unwrap();
        RunState::new(&instrument, Duration::seconds(8))
    }

    #[test]
    fn test_emit_suppresses_repeat_until_position_changes() {
        let mut state = state();
        let mut out = Vec::new();
        let bid = OrderIntent::limit(Side::Bid, 99, 4, IntentReason::Quote);

        state.observe(&PositionState::flat());
        assert!(state.emit(bid, &mut out));
        assert!(!state.emit(bid, &mut out));
        assert!(!state.observe(&PositionState::flat()));
        assert!(!state.emit(bid, &mut out));
        assert_eq!(out.len(), 1);
        assert_eq!(state.diagnostics().duplicates_suppressed, 2);

        assert!(state.observe(&PositionState::flat().with_order(Side::Bid, 99)));
        assert!(state.emit(bid, &mut out));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_emit_tracks_sides_independently() {
        let mut state = state();
        let mut out = Vec::new();

        assert!(state.emit(OrderIntent::limit(Side::Bid, 99, 4, IntentReason::Quote), &mut out));
        assert!(state.emit(OrderIntent::limit(Side::Ask, 101, 4, IntentReason::Quote), &mut out));
        assert!(state.emit(OrderIntent::limit(Side::Bid, 98, 4, IntentReason::Quote), &mut out));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_transition_reports_changes_only() {
        let mut state = state();
        assert_eq!(state.transition(PositionPhase::Flat), None);
        assert_eq!(state.transition(PositionPhase::Flat), None);
        assert_eq!(
            state.transition(PositionPhase::Entering),
            Some(PositionPhase::Flat)
        );
        assert_eq!(state.phase(), Some(PositionPhase::Entering));
    }
}
