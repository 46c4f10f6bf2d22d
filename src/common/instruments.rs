//! Static instrument reference data
//!
//! Prices on the platform are fixed-point integers; `increment` is the tick
//! size in the same units and drives every tick-count calculation.

use serde::{Deserialize, Serialize};

use super::errors::{EngineError, Result};
use super::types::Price;

/// Reference data for a tradeable instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    /// Smallest valid price step
    pub increment: Price,
    pub min_price: Price,
    pub commission: i64,
    /// Quoting denominator for fractional treasuries (32nds, 64ths)
    #[serde(default)]
    pub fraction: Option<u32>,
    pub name: String,
    pub industry: String,
}

impl Instrument {
    /// Build an instrument, rejecting a non-positive increment
    pub fn new(
        symbol: impl Into<String>,
        increment: Price,
        min_price: Price,
        commission: i64,
        name: impl Into<String>,
        industry: impl Into<String>,
    ) -> Result<Self> {
        let instrument = Self {
            symbol: symbol.into(),
            increment,
            min_price,
            commission,
            fraction: None,
            name: name.into(),
            industry: industry.into(),
        };
        instrument.validate()?;
        Ok(instrument)
    }

    /// Tick size must be strictly positive for tick arithmetic
    pub fn validate(&self) -> Result<()> {
        if self.increment <= 0 {
            return Err(EngineError::InvalidInstrument(format!(
                "{}: increment must be positive, got {}",
                self.symbol, self.increment
            )));
        }
        Ok(())
    }

    /// Price `ticks` increments away from `price` (negative moves down)
    pub fn offset(&self, price: Price, ticks: i64) -> Price {
        price + self.increment * ticks
    }

    /// Look up a built-in instrument by symbol
    pub fn lookup(symbol: &str) -> Option<Self> {
        let (increment, min_price, commission, fraction, name, industry) = match symbol {
            "CL" => (10_000_000, 100_000, 20_200, None, "Crude Oil", "Energy"),
            "ZW" => (250_000_000, 125_000, 26_200, None, "Chicago SRW Wheat", "Agriculture"),
            "NQ" => (250_000_000, 50_000, 19_000, None, "E-mini Nasdaq-100", "Indices"),
            "GC" => (100_000_000, 100_000, 21_200, None, "Gold", "Metals"),
            "ZB" => (31_250_000, 312_500, 13_900, Some(32), "30-Year U.S. Treasury Bond", "Fixed Income"),
            "ES" => (250_000_000, 125_000, 19_000, None, "E-mini S&P 500", "Indices"),
            "MES" => (250_000_000, 12_500, 5_000, None, "Micro E-mini S&P 500", "Indices"),
            "ZN" => (15_625_000, 156_250, 13_200, Some(64), "10-Year U.S. Treasury Note", "Fixed Income"),
            "UB" => (31_250_000, 312_500, 14_700, Some(32), "Ultra U.S. Treasury Bond", "Fixed Income"),
            "TN" => (15_625_000, 156_250, 13_200, Some(64), "Ultra 10-Year U.S. Treasury Note", "Fixed Income"),
            "6E" => (50_000, 62_500, 21_200, None, "Euro FX", "Forex"),
            "6J" => (500, 62_500, 21_200, None, "Japanese Yen", "Forex"),
            "NKD" => (5_000_000_000, 250_000, 26_700, None, "Nikkei 225", "Indices"),
            "NIY" => (5_000_000_000, 163_000, 26_700, None, "Nikkei 225 Yen", "Indices"),
            "BTC" => (5_000_000_000, 250_000, 72_600, None, "Bitcoin", "Cryptocurrency"),
            _ => return None,
        };

        Some(Self {
            symbol: symbol.to_string(),
            increment,
            min_price,
            commission,
            fraction,
            name: name.to_string(),
            industry: industry.to_string(),
        })
    }
}
