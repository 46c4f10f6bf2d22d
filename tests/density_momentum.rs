//! Density momentum policy behaviour through the decision engine

mod common;

use common::{at, book, engine};
use density_quoter::config::types::PolicyConfig;
use density_quoter::strategy::DensityMomentumParams;
use density_quoter::{Decision, DecisionEngine, IntentReason, OrderIntent, PositionState, Side};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn momentum_engine(params: DensityMomentumParams) -> DecisionEngine {
    engine(PolicyConfig::DensityMomentum(params))
}

#[test]
fn test_sharp_drop_with_density_enters_at_bid() {
    let mut engine = momentum_engine(DensityMomentumParams::default());
    let flat = PositionState::flat();

    engine
        .on_tick(at(0), &book(100, 101, dec!(10), dec!(10)), &flat)
        .unwrap();
    let decision = engine
        .on_tick(at(500), &book(97, 98, dec!(11), dec!(10)), &flat)
        .unwrap();

    assert_eq!(
        decision,
        Decision::Go(vec![OrderIntent::limit(Side::Bid, 97, 4, IntentReason::Entry)])
    );
    assert_eq!(engine.state().counter().anchor(), None);
    assert!(engine.state().momentum().reference_bid_density.is_zero());
}

#[test]
fn test_any_downward_tick_restarts_tracking() {
    let mut engine = momentum_engine(DensityMomentumParams::default());
    let flat = PositionState::flat();

    engine
        .on_tick(at(0), &book(100, 101, dec!(10), dec!(10)), &flat)
        .unwrap();
    let decision = engine
        .on_tick(at(500), &book(99, 100, dec!(10), dec!(10)), &flat)
        .unwrap();

    assert_eq!(decision, Decision::NoGo);
    assert_eq!(engine.state().counter().anchor(), None);
    assert_eq!(engine.diagnostics().tracker_resets, 1);
}

#[test]
fn test_falling_bid_with_ask_density_quotes_above_ask() {
    let mut engine = momentum_engine(DensityMomentumParams::default());
    let flat = PositionState::flat();

    engine
        .on_tick(at(0), &book(100, 101, dec!(10), dec!(10)), &flat)
        .unwrap();
    let decision = engine
        .on_tick(at(500), &book(99, 100, dec!(10), dec!(12)), &flat)
        .unwrap();

    assert_eq!(
        decision.intents(),
        &[OrderIntent::limit(Side::Ask, 101, 4, IntentReason::Momentum)]
    );
}

#[test]
fn test_rising_bid_with_bid_density_quotes_below_bid() {
    let mut engine = momentum_engine(DensityMomentumParams::default());
    let flat = PositionState::flat();

    engine
        .on_tick(at(0), &book(100, 101, dec!(10), dec!(10)), &flat)
        .unwrap();
    let decision = engine
        .on_tick(at(500), &book(101, 102, dec!(12), dec!(10)), &flat)
        .unwrap();

    assert_eq!(
        decision.intents(),
        &[OrderIntent::limit(Side::Bid, 100, 4, IntentReason::Momentum)]
    );
}

#[test]
fn test_confirmations_require_consecutive_ticks() {
    let mut engine = momentum_engine(DensityMomentumParams {
        momentum_confirmations: 2,
        ..Default::default()
    });
    let flat = PositionState::flat();

    engine
        .on_tick(at(0), &book(100, 101, dec!(10), dec!(10)), &flat)
        .unwrap();
    let first = engine
        .on_tick(at(500), &book(99, 100, dec!(10), dec!(11)), &flat)
        .unwrap();
    assert_eq!(first, Decision::NoGo);
    assert_eq!(engine.state().momentum().falling_streak, 1);

    let second = engine
        .on_tick(at(1_000), &book(98, 99, dec!(10), dec!(12)), &flat)
        .unwrap();
    assert_eq!(
        second.intents(),
        &[OrderIntent::limit(Side::Ask, 100, 4, IntentReason::Momentum)]
    );
    assert_eq!(engine.state().momentum().falling_streak, 0);
}

#[test]
fn test_silent_in_position_but_keeps_last_values() {
    let mut engine = momentum_engine(DensityMomentumParams::default());
    let long = PositionState::flat().with_trade(Side::Bid, 97);

    engine
        .on_tick(at(0), &book(100, 101, dec!(10), dec!(10)), &long)
        .unwrap();
    let decision = engine
        .on_tick(at(500), &book(99, 100, dec!(10), dec!(12)), &long)
        .unwrap();

    assert_eq!(decision, Decision::NoGo);
    assert_eq!(engine.state().momentum().last_bid, Some(99));
    assert_eq!(engine.state().momentum().last_ask_density, dec!(12));
}

/// The host is trusted to report consistent position state; odd
/// combinations are taken at face value rather than rejected.
#[test]
fn test_host_position_state_is_trusted() {
    let mut engine = momentum_engine(DensityMomentumParams::default());
    let both_resting = PositionState::flat()
        .with_order(Side::Bid, 99)
        .with_order(Side::Ask, 102);

    engine
        .on_tick(at(0), &book(100, 101, dec!(10), dec!(10)), &both_resting)
        .unwrap();
    let decision = engine
        .on_tick(at(500), &book(97, 98, dec!(20), dec!(20)), &both_resting)
        .unwrap();

    assert_eq!(decision, Decision::NoGo);
    assert_eq!(engine.state().momentum().last_bid, Some(97));
}
