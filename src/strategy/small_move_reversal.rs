//! Small move reversal
//!
//! Fades short moves that liquidity is leaning against:
//!
//! 1. Bid drops `entry_ticks` over the window while bid density grows by
//!    `entry_density_change_percent` -> bid one tick under the best bid
//! 2. Bid rises `entry_ticks` while ask density grows by the same amount ->
//!    ask one tick over the best ask
//!
//! Once filled, a take-profit sits `take_profit_ticks` beyond the entry. A
//! working entry is pulled when the density it was placed against fades by
//! `cancel_density_change_percent`.

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::state::{OrderAnchor, RunState};
use super::traits::Strategy;
use super::types::{IntentReason, OrderIntent, PositionPhase, TickContext};
use crate::common::types::Side;
use crate::tracker::{percent_change, window_duration, WindowMovement, DEFAULT_WINDOW_SECONDS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmallMoveReversalParams {
    pub window_seconds: u64,
    /// Minimum window move, in ticks, in either direction
    pub entry_ticks: Decimal,
    pub entry_density_change_percent: Decimal,
    /// Opposing density growth that marks the window as stale
    pub reversal_density_change_percent: Decimal,
    /// Density fade (negative) at which a working entry is cancelled
    pub cancel_density_change_percent: Decimal,
    /// Distance of the entry order from the touch
    pub entry_offset_ticks: i64,
    pub take_profit_ticks: i64,
    pub stop_loss_ticks: u32,
}

impl Default for SmallMoveReversalParams {
    fn default() -> Self {
        Self {
            window_seconds: DEFAULT_WINDOW_SECONDS,
            entry_ticks: dec!(3),
            entry_density_change_percent: dec!(8),
            reversal_density_change_percent: dec!(5),
            cancel_density_change_percent: dec!(-15),
            entry_offset_ticks: 1,
            take_profit_ticks: 4,
            stop_loss_ticks: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmallMoveReversal {
    params: SmallMoveReversalParams,
}

impl SmallMoveReversal {
    pub fn new(params: SmallMoveReversalParams) -> Self {
        Self { params }
    }

    fn seek_entry(
        &self,
        ctx: &TickContext<'_>,
        movement: WindowMovement,
        state: &mut RunState,
        out: &mut Vec<OrderIntent>,
    ) {
        let p = &self.params;
        let ticks = movement.ticks_moved;
        let bid_change = movement.bid_density_change_percent;
        let ask_change = movement.ask_density_change_percent;

        let entry = if ticks <= -p.entry_ticks && bid_change >= p.entry_density_change_percent {
            Some((Side::Bid, ctx.instrument.offset(ctx.book.best_bid(), -p.entry_offset_ticks)))
        } else if ticks >= p.entry_ticks && ask_change >= p.entry_density_change_percent {
            Some((Side::Ask, ctx.instrument.offset(ctx.book.best_ask(), p.entry_offset_ticks)))
        } else {
            None
        };

        if let Some((side, price)) = entry {
            state.diagnostics.conditions_met += 1;
            info!(%side, price, %ticks, %bid_change, %ask_change, "entry conditions met");

            let intent = OrderIntent::limit(side, price, p.stop_loss_ticks, IntentReason::Entry);
            if state.emit(intent, out) {
                let density = ctx.book.attributes.density(side);
                state.set_anchor(side, Some(OrderAnchor { price, density }));
                state.diagnostics.order_attempts += 1;
            }
        }

        let reversing = (ticks > Decimal::ZERO && bid_change >= p.reversal_density_change_percent)
            || (ticks < Decimal::ZERO && ask_change >= p.reversal_density_change_percent);
        if reversing {
            debug!(%ticks, %bid_change, %ask_change, "reversal, resetting window");
            state.window.reset();
            state.diagnostics.tracker_resets += 1;
        }
    }

    fn take_profit(&self, ctx: &TickContext<'_>, state: &mut RunState, out: &mut Vec<OrderIntent>) {
        let Some(trade) = ctx.position.trade else {
            return;
        };

        let side = trade.side.opposite();
        let offset = match side {
            Side::Ask => self.params.take_profit_ticks,
            Side::Bid => -self.params.take_profit_ticks,
        };
        let price = ctx.instrument.offset(trade.price, offset);
        let intent = OrderIntent::limit(side, price, self.params.stop_loss_ticks, IntentReason::TakeProfit);

        if state.emit(intent, out) {
            info!(%side, price, entry = trade.price, "placing take-profit");
            state.diagnostics.order_attempts += 1;
        }
    }

    fn review_resting(&self, ctx: &TickContext<'_>, state: &mut RunState, out: &mut Vec<OrderIntent>) {
        for side in [Side::Bid, Side::Ask] {
            let (Some(order), Some(anchor)) = (ctx.position.order(side), state.anchor(side).copied())
            else {
                continue;
            };

            let current = ctx.book.attributes.density(side);
            let change = percent_change(current, anchor.density);
            if !anchor.density.is_zero() {
                debug!(%side, price = order.price, %change, "working entry density");
            }

            if change <= self.params.cancel_density_change_percent {
                warn!(%side, price = order.price, %change, "density faded, cancelling entry");
                let intent = OrderIntent::limit(
                    side,
                    order.price,
                    self.params.stop_loss_ticks,
                    IntentReason::Cancel,
                );
                if state.emit(intent, out) {
                    state.diagnostics.cancellations += 1;
                }
                state.set_anchor(side, None);
            }
        }
    }
}

impl Strategy for SmallMoveReversal {
    fn name(&self) -> &'static str {
        "small_move_reversal"
    }

    fn window(&self) -> Duration {
        window_duration(self.params.window_seconds)
    }

    fn on_tick(&self, ctx: &TickContext<'_>, state: &mut RunState, out: &mut Vec<OrderIntent>) {
        let attributes = ctx.book.attributes;
        let movement = state.window.update(
            ctx.now,
            ctx.book.best_bid(),
            attributes.bid_density,
            attributes.ask_density,
        );

        if state.last_movement.map(|m| m.ticks_moved) != Some(movement.ticks_moved) {
            debug!(
                ticks = %movement.ticks_moved,
                bid_change = %movement.bid_density_change_percent,
                ask_change = %movement.ask_density_change_percent,
                "window movement"
            );
        }
        state.last_movement = Some(movement);

        // Anchors belong to entry orders; once filled they are stale
        if ctx.position.trade.is_some() {
            state.clear_anchors();
        }

        match ctx.phase {
            PositionPhase::Flat => self.seek_entry(ctx, movement, state, out),
            PositionPhase::InPositionNoHedge => self.take_profit(ctx, state, out),
            PositionPhase::Entering | PositionPhase::InPositionHedged => {
                self.review_resting(ctx, state, out)
            }
        }
    }
}
