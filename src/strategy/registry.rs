use std::collections::HashMap;

use tracing::{info, warn};

use super::engine::DecisionEngine;
use super::types::Decision;
use crate::common::errors::{EngineError, Result};
use crate::common::instruments::Instrument;
use crate::common::types::MarketTick;
use crate::config::types::{AppConfig, EngineConfig};

/// One decision engine per symbol, created on first sight
///
/// Engines never share run state; a tick only ever touches the engine of
/// its own symbol.
#[derive(Debug)]
pub struct EngineRegistry {
    config: EngineConfig,
    instruments: HashMap<String, Instrument>,
    engines: HashMap<String, DecisionEngine>,
    rejected: u64,
}

impl EngineRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            instruments: HashMap::new(),
            engines: HashMap::new(),
            rejected: 0,
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        let mut registry = Self::new(config.engine.clone());
        for instrument in config.instruments.values() {
            registry.add_instrument(instrument.clone());
        }
        registry
    }

    /// Register an instrument, taking precedence over the built-in table
    pub fn add_instrument(&mut self, instrument: Instrument) {
        self.instruments.insert(instrument.symbol.clone(), instrument);
    }

    fn resolve(&self, symbol: &str) -> Result<Instrument> {
        self.instruments
            .get(symbol)
            .cloned()
            .or_else(|| Instrument::lookup(symbol))
            .ok_or_else(|| EngineError::UnknownInstrument(symbol.to_string()))
    }

    /// Route a tick to its symbol's engine
    pub fn on_tick(&mut self, tick: &MarketTick) -> Result<Decision> {
        if !self.engines.contains_key(&tick.symbol) {
            let instrument = match self.resolve(&tick.symbol) {
                Ok(instrument) => instrument,
                Err(e) => {
                    self.rejected += 1;
                    warn!(symbol = %tick.symbol, error = %e, "rejecting tick");
                    return Err(e);
                }
            };
            let engine = DecisionEngine::from_config(instrument, &self.config)?;
            info!(symbol = %tick.symbol, strategy = engine.strategy_name(), "engine created");
            self.engines.insert(tick.symbol.clone(), engine);
        }

        let Some(engine) = self.engines.get_mut(&tick.symbol) else {
            return Err(EngineError::UnknownInstrument(tick.symbol.clone()));
        };

        match engine.on_market_tick(tick) {
            Ok(decision) => Ok(decision),
            Err(e) => {
                self.rejected += 1;
                warn!(symbol = %tick.symbol, error = %e, "rejecting tick");
                Err(e)
            }
        }
    }

    pub fn engine(&self, symbol: &str) -> Option<&DecisionEngine> {
        self.engines.get(symbol)
    }

    pub fn engines(&self) -> impl Iterator<Item = &DecisionEngine> {
        self.engines.values()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Ticks refused for an unknown symbol or a shallow book
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
