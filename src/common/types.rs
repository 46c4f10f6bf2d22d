//! Market data and position types shared by the tracker, the engine and the host harness

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::{EngineError, Result};

/// Fixed-point price, scaled by the instrument's price convention
pub type Price = i64;

/// Book side of an order or trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// The other side of the book
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Bid => write!(f, "Bid"),
            Side::Ask => write!(f, "Ask"),
        }
    }
}

/// A single price level of the book (market-by-price)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub bid_px: Price,
    pub ask_px: Price,
    #[serde(default)]
    pub bid_sz: u64,
    #[serde(default)]
    pub ask_sz: u64,
}

impl PriceLevel {
    /// Create a level with prices only
    pub fn new(bid_px: Price, ask_px: Price) -> Self {
        Self {
            bid_px,
            ask_px,
            bid_sz: 0,
            ask_sz: 0,
        }
    }

    /// Price on the given side of this level
    pub fn price(&self, side: Side) -> Price {
        match side {
            Side::Bid => self.bid_px,
            Side::Ask => self.ask_px,
        }
    }
}

/// Liquidity attributes published alongside the book
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BookAttributes {
    pub bid_density: Decimal,
    pub ask_density: Decimal,
}

impl BookAttributes {
    pub fn new(bid_density: Decimal, ask_density: Decimal) -> Self {
        Self {
            bid_density,
            ask_density,
        }
    }

    /// Density on the given side
    pub fn density(&self, side: Side) -> Decimal {
        match side {
            Side::Bid => self.bid_density,
            Side::Ask => self.ask_density,
        }
    }
}

/// Point-in-time view of the book, levels ordered best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub levels: Vec<PriceLevel>,
    pub attributes: BookAttributes,
}

impl BookSnapshot {
    pub fn new(levels: Vec<PriceLevel>, attributes: BookAttributes) -> Self {
        Self { levels, attributes }
    }

    /// Fail unless at least `required` levels are present
    pub fn ensure_depth(&self, required: usize) -> Result<()> {
        if self.levels.len() < required {
            return Err(EngineError::InsufficientDepth {
                required,
                actual: self.levels.len(),
            });
        }
        Ok(())
    }

    /// Level at `depth` (0 = best). Callers validate depth first.
    pub fn level(&self, depth: usize) -> &PriceLevel {
        &self.levels[depth]
    }

    pub fn best_bid(&self) -> Price {
        self.level(0).bid_px
    }

    pub fn best_ask(&self) -> Price {
        self.level(0).ask_px
    }
}

/// The user's open trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTrade {
    pub side: Side,
    pub price: Price,
}

/// A working limit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingOrder {
    pub price: Price,
}

/// Trade and resting orders as reported by the host
///
/// At most one order rests per side. The host guarantees consistency; the
/// core does not re-validate combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PositionState {
    #[serde(default)]
    pub trade: Option<UserTrade>,
    #[serde(default)]
    pub bid_order: Option<RestingOrder>,
    #[serde(default)]
    pub ask_order: Option<RestingOrder>,
}

impl PositionState {
    /// No trade and no resting orders
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn with_trade(mut self, side: Side, price: Price) -> Self {
        self.trade = Some(UserTrade { side, price });
        self
    }

    pub fn with_order(mut self, side: Side, price: Price) -> Self {
        let order = Some(RestingOrder { price });
        match side {
            Side::Bid => self.bid_order = order,
            Side::Ask => self.ask_order = order,
        }
        self
    }

    /// Resting order on the given side
    pub fn order(&self, side: Side) -> Option<&RestingOrder> {
        match side {
            Side::Bid => self.bid_order.as_ref(),
            Side::Ask => self.ask_order.as_ref(),
        }
    }

    pub fn has_orders(&self) -> bool {
        self.bid_order.is_some() || self.ask_order.is_some()
    }
}

/// One market-data event as delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTick {
    pub symbol: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub book: BookSnapshot,
    #[serde(default)]
    pub position: PositionState,
}
