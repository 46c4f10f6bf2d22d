use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::state::{Diagnostics, RunState};
use super::traits::BoxedStrategy;
use super::types::{Decision, PositionPhase, TickContext};
use crate::common::errors::Result;
use crate::common::instruments::Instrument;
use crate::common::types::{BookSnapshot, MarketTick, PositionState};
use crate::config::types::EngineConfig;

/// Book depth every tick must carry, whatever the policy indexes
pub const MIN_BOOK_DEPTH: usize = 3;

/// Decision engine for one (instrument, strategy) pairing
///
/// Owns the run state exclusively. Ticks must be fed in arrival order from a
/// single thread; multiplexing several instruments means one engine each.
pub struct DecisionEngine {
    instrument: Instrument,
    strategy: BoxedStrategy,
    state: RunState,
    min_depth: usize,
}

impl DecisionEngine {
    /// Build an engine, rejecting instruments unusable for tick arithmetic
    pub fn new(instrument: Instrument, strategy: BoxedStrategy) -> Result<Self> {
        instrument.validate()?;
        let state = RunState::new(&instrument, strategy.window());
        let min_depth = strategy.required_depth().max(MIN_BOOK_DEPTH);

        Ok(Self {
            instrument,
            strategy,
            state,
            min_depth,
        })
    }

    /// Build an engine from configuration
    pub fn from_config(instrument: Instrument, config: &EngineConfig) -> Result<Self> {
        config.policy.validate()?;
        let mut engine = Self::new(instrument, config.policy.build())?;
        engine.min_depth = engine.min_depth.max(config.min_book_depth);
        Ok(engine)
    }

    /// Evaluate one book update
    ///
    /// A book shallower than the required depth rejects the tick: an error
    /// is returned and neither intents nor state changes are produced.
    pub fn on_tick(
        &mut self,
        now: DateTime<Utc>,
        book: &BookSnapshot,
        position: &PositionState,
    ) -> Result<Decision> {
        book.ensure_depth(self.min_depth)?;

        let symbol = self.instrument.symbol.as_str();
        let phase = PositionPhase::of(position);
        if let Some(previous) = self.state.transition(phase) {
            info!(symbol, from = ?previous, to = ?phase, "phase transition");
        }
        if self.state.observe(position) {
            debug!(symbol, ?position, "position state changed");
        }
        self.state.diagnostics.ticks_processed += 1;

        let ctx = TickContext {
            now,
            instrument: &self.instrument,
            book,
            position,
            phase,
        };
        let mut intents = Vec::new();
        self.strategy.on_tick(&ctx, &mut self.state, &mut intents);

        for intent in &intents {
            info!(
                symbol,
                strategy = self.strategy.name(),
                side = %intent.side,
                price = intent.price,
                stop_loss_ticks = intent.stop_loss_ticks,
                reason = ?intent.reason,
                "order intent"
            );
        }

        Ok(Decision::go(intents))
    }

    /// Evaluate a host tick
    pub fn on_market_tick(&mut self, tick: &MarketTick) -> Result<Decision> {
        self.on_tick(tick.timestamp, &tick.book, &tick.position)
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        self.state.diagnostics()
    }

    pub fn min_depth(&self) -> usize {
        self.min_depth
    }
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("instrument", &self.instrument.symbol)
            .field("strategy", &self.strategy.name())
            .field("min_depth", &self.min_depth)
            .finish()
    }
}
