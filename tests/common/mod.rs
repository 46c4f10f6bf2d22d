//! Common test utilities and fixtures

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use density_quoter::common::types::{BookAttributes, BookSnapshot, PriceLevel};
use density_quoter::config::types::PolicyConfig;
use density_quoter::{DecisionEngine, Instrument};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Timestamp `ms` milliseconds after the epoch
pub fn at(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

/// Instrument with a tick size of one price unit
pub fn unit_instrument() -> Instrument {
    Instrument::new("TEST", 1, 1, 0, "Test future", "Test").unwrap()
}

/// Three-level book stepping one tick away from the touch on each side
pub fn book(bid: i64, ask: i64, bid_density: Decimal, ask_density: Decimal) -> BookSnapshot {
    let levels = (0..3)
        .map(|i| PriceLevel::new(bid - i, ask + i))
        .collect();
    BookSnapshot::new(levels, BookAttributes::new(bid_density, ask_density))
}

/// Book with even densities of 10 on both sides
pub fn even_book(bid: i64, ask: i64) -> BookSnapshot {
    book(bid, ask, dec!(10), dec!(10))
}

/// Book carrying only `depth` levels
pub fn shallow_book(depth: usize) -> BookSnapshot {
    let levels = (0..depth as i64)
        .map(|i| PriceLevel::new(100 - i, 101 + i))
        .collect();
    BookSnapshot::new(levels, BookAttributes::new(dec!(10), dec!(10)))
}

/// Engine for the unit instrument running `policy`
pub fn engine(policy: PolicyConfig) -> DecisionEngine {
    DecisionEngine::new(unit_instrument(), policy.build()).unwrap()
}

/// Sample replay lines, one JSON-encoded tick per line
pub mod replay_lines {
    pub fn tick(symbol: &str, ms: i64, bid: i64, step: i64) -> String {
        format!(
            r#"{{"symbol":"{symbol}","timestamp":{ms},"book":{{"levels":[{{"bid_px":{b0},"ask_px":{a0}}},{{"bid_px":{b1},"ask_px":{a1}}},{{"bid_px":{b2},"ask_px":{a2}}}],"attributes":{{"bid_density":10,"ask_density":10}}}}}}"#,
            b0 = bid,
            b1 = bid - step,
            b2 = bid - 2 * step,
            a0 = bid + step,
            a1 = bid + 2 * step,
            a2 = bid + 3 * step,
        )
    }
}
