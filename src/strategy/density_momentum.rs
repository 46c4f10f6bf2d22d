//! Density momentum
//!
//! Counter-driven variant of the reversal idea. While flat it watches the
//! best bid fall away from a fixed anchor and buys the touch once the drop
//! reaches `entry_drop_ticks` with bid density up `entry_density_change_percent`
//! from where tracking started. Independently, consecutive ticks of
//! price-vs-density divergence produce momentum quotes one tick off the touch.
//!
//! Both momentum checks compare the best bid against the previous best bid.
//! The falling check deliberately does not compare the ask against the
//! previous bid, which would read a one-tick spread as a falling market.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::state::RunState;
use super::traits::Strategy;
use super::types::{IntentReason, OrderIntent, PositionPhase, TickContext};
use crate::common::types::Side;
use crate::tracker::percent_change;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityMomentumParams {
    pub entry_drop_ticks: u64,
    pub entry_density_change_percent: Decimal,
    /// Density change below which tracking restarts
    pub reset_density_change_percent: Decimal,
    /// Consecutive divergent ticks needed for a momentum quote
    pub momentum_confirmations: u32,
    pub momentum_offset_ticks: i64,
    pub stop_loss_ticks: u32,
}

impl Default for DensityMomentumParams {
    fn default() -> Self {
        Self {
            entry_drop_ticks: 3,
            entry_density_change_percent: dec!(10),
            reset_density_change_percent: dec!(-5),
            momentum_confirmations: 1,
            momentum_offset_ticks: 1,
            stop_loss_ticks: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DensityMomentum {
    params: DensityMomentumParams,
}

impl DensityMomentum {
    pub fn new(params: DensityMomentumParams) -> Self {
        Self { params }
    }

    fn restart_tracking(state: &mut RunState) {
        state.momentum.reference_bid_density = Decimal::ZERO;
        state.counter.reset();
        state.diagnostics.tracker_resets += 1;
    }

    fn track_drop(&self, ctx: &TickContext<'_>, state: &mut RunState, out: &mut Vec<OrderIntent>) {
        let p = &self.params;
        let bid = ctx.book.best_bid();
        let bid_density = ctx.book.attributes.bid_density;

        let downward = state.counter.update(bid).downward_ticks;

        if state.momentum.reference_bid_density.is_zero() {
            state.momentum.reference_bid_density = bid_density;
            debug!(%bid_density, "started tracking new reference");
        }
        let change = percent_change(bid_density, state.momentum.reference_bid_density);

        if downward >= p.entry_drop_ticks && change >= p.entry_density_change_percent {
            state.diagnostics.conditions_met += 1;
            info!(downward, %change, price = bid, "price drop with rising bid density");

            let intent = OrderIntent::limit(Side::Bid, bid, p.stop_loss_ticks, IntentReason::Entry);
            if state.emit(intent, out) {
                state.diagnostics.order_attempts += 1;
            }
            Self::restart_tracking(state);
        }

        if change < p.reset_density_change_percent || downward > 0 {
            debug!(downward, %change, "resetting drop tracking");
            Self::restart_tracking(state);
        }
    }

    fn confirm_momentum(&self, ctx: &TickContext<'_>, state: &mut RunState, out: &mut Vec<OrderIntent>) {
        let Some(last_bid) = state.momentum.last_bid else {
            return;
        };

        let p = &self.params;
        let bid = ctx.book.best_bid();
        let attributes = ctx.book.attributes;
        let m = &mut state.momentum;

        if bid < last_bid && attributes.ask_density > m.last_ask_density {
            m.falling_streak += 1;
        } else {
            m.falling_streak = 0;
        }

        if bid > last_bid && attributes.bid_density > m.last_bid_density {
            m.rising_streak += 1;
        } else {
            m.rising_streak = 0;
        }

        let mut quotes = Vec::with_capacity(2);
        if m.falling_streak >= p.momentum_confirmations {
            m.falling_streak = 0;
            let price = ctx.instrument.offset(ctx.book.best_ask(), p.momentum_offset_ticks);
            quotes.push(OrderIntent::limit(Side::Ask, price, p.stop_loss_ticks, IntentReason::Momentum));
        }
        if m.rising_streak >= p.momentum_confirmations {
            m.rising_streak = 0;
            let price = ctx.instrument.offset(bid, -p.momentum_offset_ticks);
            quotes.push(OrderIntent::limit(Side::Bid, price, p.stop_loss_ticks, IntentReason::Momentum));
        }

        for intent in quotes {
            state.diagnostics.conditions_met += 1;
            if state.emit(intent, out) {
                info!(side = %intent.side, price = intent.price, "momentum quote");
                state.diagnostics.order_attempts += 1;
            }
        }
    }
}

impl Strategy for DensityMomentum {
    fn name(&self) -> &'static str {
        "density_momentum"
    }

    fn required_depth(&self) -> usize {
        1
    }

    fn on_tick(&self, ctx: &TickContext<'_>, state: &mut RunState, out: &mut Vec<OrderIntent>) {
        if ctx.phase == PositionPhase::Flat {
            self.track_drop(ctx, state, out);
            self.confirm_momentum(ctx, state, out);
        }

        let attributes = ctx.book.attributes;
        let m = &mut state.momentum;
        m.last_bid = Some(ctx.book.best_bid());
        m.last_bid_density = attributes.bid_density;
        m.last_ask_density = attributes.ask_density;
    }
}
