//! Persistent spread: keep a bid and an ask resting behind the touch while
//! flat, and hedge once with a deeper opposing order when a trade opens.
//!
//! Trades often in tight ranges and loses accordingly in trending ones; meant
//! for short, supervised runs.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::state::RunState;
use super::traits::Strategy;
use super::types::{IntentReason, OrderIntent, TickContext};
use crate::common::types::Side;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistentSpreadParams {
    /// Book level (0 = best) used for flat quotes
    pub quote_depth: usize,
    /// Book level used for the opposing order once in a position
    pub hedge_depth: usize,
    pub stop_loss_ticks: u32,
}

impl Default for PersistentSpreadParams {
    fn default() -> Self {
        Self {
            quote_depth: 1,
            hedge_depth: 2,
            stop_loss_ticks: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PersistentSpread {
    params: PersistentSpreadParams,
}

impl PersistentSpread {
    pub fn new(params: PersistentSpreadParams) -> Self {
        Self { params }
    }
}

impl Strategy for PersistentSpread {
    fn name(&self) -> &'static str {
        "persistent_spread"
    }

    fn required_depth(&self) -> usize {
        self.params.quote_depth.max(self.params.hedge_depth) + 1
    }

    fn on_tick(&self, ctx: &TickContext<'_>, state: &mut RunState, out: &mut Vec<OrderIntent>) {
        let stop = self.params.stop_loss_ticks;

        let Some(trade) = ctx.position.trade else {
            state.opposite_placed = false;

            let quote = ctx.book.level(self.params.quote_depth);
            let side = if ctx.position.bid_order.is_none() {
                Side::Bid
            } else if ctx.position.ask_order.is_none() {
                Side::Ask
            } else {
                return;
            };

            let intent = OrderIntent::limit(side, quote.price(side), stop, IntentReason::Quote);
            if state.emit(intent, out) {
                state.diagnostics.order_attempts += 1;
            }
            return;
        };

        if state.opposite_placed {
            return;
        }

        // Only once per position; the flag clears when the trade closes
        state.opposite_placed = true;
        let side = trade.side.opposite();
        let price = ctx.book.level(self.params.hedge_depth).price(side);
        info!(%side, price, entry = trade.price, "placing opposing order for new position");

        if state.emit(OrderIntent::limit(side, price, stop, IntentReason::Hedge), out) {
            state.diagnostics.order_attempts += 1;
        }
    }
}
