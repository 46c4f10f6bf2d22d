use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::instruments::Instrument;
use crate::common::types::{BookSnapshot, PositionState, Price, Side};

/// Why an intent was produced
///
/// Purely informational: every intent is a plain limit order on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IntentReason {
    /// Resting quote while flat
    Quote,
    /// Signal-driven entry order
    Entry,
    /// Opposing order placed once a position opens
    Hedge,
    /// Opposing order at a fixed tick offset from the entry price
    TakeProfit,
    /// Same-side, same-price re-submission that cancels a resting order
    Cancel,
    /// Order from tick-to-tick momentum confirmation
    Momentum,
}

/// A request to place (or replace) a limit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderIntent {
    pub side: Side,
    pub price: Price,
    /// Stop-loss distance in ticks, enforced by the platform
    pub stop_loss_ticks: u32,
    pub reason: IntentReason,
}

impl OrderIntent {
    pub fn limit(side: Side, price: Price, stop_loss_ticks: u32, reason: IntentReason) -> Self {
        Self {
            side,
            price,
            stop_loss_ticks,
            reason,
        }
    }

    /// True when both intents would put the same order on the wire
    pub fn same_order(&self, other: &OrderIntent) -> bool {
        self.side == other.side
            && self.price == other.price
            && self.stop_loss_ticks == other.stop_loss_ticks
    }
}

/// Strategy decision output for one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No action should be taken
    NoGo,
    /// Submit these intents, in order
    Go(Vec<OrderIntent>),
}

impl Decision {
    /// Create a NoGo decision
    pub fn no_go() -> Self {
        Self::NoGo
    }

    /// Create a Go decision, collapsing an empty list to NoGo
    pub fn go(intents: Vec<OrderIntent>) -> Self {
        if intents.is_empty() {
            Self::NoGo
        } else {
            Self::Go(intents)
        }
    }

    /// Returns true if this is a Go decision
    pub fn is_go(&self) -> bool {
        matches!(self, Self::Go(_))
    }

    /// Intents to submit (empty for NoGo)
    pub fn intents(&self) -> &[OrderIntent] {
        match self {
            Self::NoGo => &[],
            Self::Go(intents) => intents,
        }
    }
}

/// Where the position/order lifecycle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PositionPhase {
    /// No trade and no resting orders
    Flat,
    /// Orders working, no trade yet
    Entering,
    /// Trade open without an opposing order
    InPositionNoHedge,
    /// Trade open with an opposing order resting
    InPositionHedged,
}

impl PositionPhase {
    /// Derive the phase from the host's view of trade and orders
    pub fn of(position: &PositionState) -> Self {
        match position.trade {
            None if position.has_orders() => Self::Entering,
            None => Self::Flat,
            Some(trade) if position.order(trade.side.opposite()).is_some() => {
                Self::InPositionHedged
            }
            Some(_) => Self::InPositionNoHedge,
        }
    }
}

/// Read-only inputs handed to a strategy for one tick
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub now: DateTime<Utc>,
    pub instrument: &'a Instrument,
    pub book: &'a BookSnapshot,
    pub position: &'a PositionState,
    pub phase: PositionPhase,
}
