//! Multi-instrument routing and the replay harness

mod common;

use common::replay_lines;
use density_quoter::common::channels::create_tick_channel_with_size;
use density_quoter::config::types::{EngineConfig, PolicyConfig};
use density_quoter::strategy::PersistentSpreadParams;
use density_quoter::{
    dispatch, EngineError, EngineRegistry, IntentReason, MarketTick, RecordingSink, ReplayFeed,
    Side, TickSource,
};
use pretty_assertions::assert_eq;
use std::io::Write;

fn spread_config() -> EngineConfig {
    EngineConfig {
        policy: PolicyConfig::PersistentSpread(PersistentSpreadParams::default()),
        ..Default::default()
    }
}

fn write_replay(name: &str, lines: &[String]) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}

#[tokio::test]
async fn test_replay_routes_each_symbol_to_its_own_engine() {
    let es = 250_000_000;
    let cl = 10_000_000;
    let path = write_replay(
        "density_quoter_registry_replay.jsonl",
        &[
            replay_lines::tick("ES", 0, 5_000 * es, es),
            replay_lines::tick("CL", 0, 70 * cl, cl),
            replay_lines::tick("ES", 100, 5_000 * es, es),
            replay_lines::tick("XYZ", 150, 100, 1),
            replay_lines::tick("CL", 200, 70 * cl, cl),
        ],
    );

    let (tx, mut rx) = create_tick_channel_with_size(16);
    let mut feed = ReplayFeed::new(&path);
    let feed_task = tokio::spawn(async move { feed.start(tx).await });

    let mut registry = EngineRegistry::new(spread_config());
    let mut sink = RecordingSink::new();
    let mut errors = Vec::new();
    while let Some(tick) = rx.recv().await {
        match registry.on_tick(&tick) {
            Ok(decision) => {
                dispatch(&mut sink, &tick.symbol, &decision);
            }
            Err(e) => errors.push(e),
        }
    }
    feed_task.await.unwrap().unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.rejected(), 1);
    assert!(matches!(&errors[..], [EngineError::UnknownInstrument(s)] if s == "XYZ"));

    let es_intents: Vec<_> = sink.for_symbol("ES").collect();
    assert_eq!(es_intents.len(), 1);
    assert_eq!(es_intents[0].side, Side::Bid);
    assert_eq!(es_intents[0].price, 5_000 * es - es);
    assert_eq!(es_intents[0].reason, IntentReason::Quote);

    let cl_intents: Vec<_> = sink.for_symbol("CL").collect();
    assert_eq!(cl_intents.len(), 1);
    assert_eq!(cl_intents[0].price, 70 * cl - cl);

    assert_eq!(registry.engine("ES").unwrap().diagnostics().ticks_processed, 2);
    assert_eq!(registry.engine("CL").unwrap().diagnostics().ticks_processed, 2);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_window_state_is_per_symbol() {
    let mut registry = EngineRegistry::new(EngineConfig::default());
    let tick = |line: String| -> MarketTick { serde_json::from_str(&line).unwrap() };
    let es = 250_000_000;
    let cl = 10_000_000;

    for ms in 0..5 {
        registry
            .on_tick(&tick(replay_lines::tick("ES", ms * 100, 5_000 * es, es)))
            .unwrap();
    }
    registry
        .on_tick(&tick(replay_lines::tick("CL", 0, 70 * cl, cl)))
        .unwrap();

    assert_eq!(registry.engine("ES").unwrap().state().window().len(), 5);
    assert_eq!(registry.engine("CL").unwrap().state().window().len(), 1);
}
