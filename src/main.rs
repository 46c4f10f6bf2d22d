//! DensityQuoter - Main Entry Point
//!
//! Replays recorded market ticks through the decision engines and logs the
//! limit-order intents they produce.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use density_quoter::common::channels::create_tick_channel_with_size;
use density_quoter::config::load_config;
use density_quoter::{dispatch, EngineRegistry, LogSink, ReplayFeed, TickSource};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); defaults to `settings.log_level`
    #[arg(long)]
    log_level: Option<String>,

    /// JSON-lines file of market ticks to replay
    #[arg(short, long, env = "APP_REPLAY")]
    replay: String,
}

/// Pick the log level, the CLI flag taking precedence over configuration
fn resolve_level(cli: Option<&str>, configured: &str) -> Level {
    match cli.unwrap_or(configured).to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let config = load_config(Some(&args.config)).context("loading configuration")?;

    // Initialize logging
    let level = resolve_level(args.log_level.as_deref(), &config.settings.log_level);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting DensityQuoter");
    info!("Configuration file: {}", args.config);
    info!(policy = ?config.engine.policy, "Configuration loaded");

    let mut registry = EngineRegistry::from_app_config(&config);
    let mut sink = LogSink::new();

    let (tx, mut rx) = create_tick_channel_with_size(config.settings.channel_size);
    let mut feed = ReplayFeed::new(&args.replay);
    info!("Starting tick source {}", feed.source_name());
    let feed_task = tokio::spawn(async move { feed.start(tx).await });

    while let Some(tick) = rx.recv().await {
        match registry.on_tick(&tick) {
            Ok(decision) => {
                dispatch(&mut sink, &tick.symbol, &decision);
            }
            Err(e) => warn!("Tick for {} rejected: {}", tick.symbol, e),
        }
    }

    match feed_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Replay failed: {}", e),
        Err(e) => error!("Replay task panicked: {}", e),
    }

    for engine in registry.engines() {
        let d = engine.diagnostics();
        info!(
            symbol = %engine.instrument().symbol,
            strategy = engine.strategy_name(),
            ticks = d.ticks_processed,
            conditions_met = d.conditions_met,
            order_attempts = d.order_attempts,
            cancellations = d.cancellations,
            duplicates_suppressed = d.duplicates_suppressed,
            tracker_resets = d.tracker_resets,
            "Engine summary"
        );
    }
    info!(
        "Replay complete: {} intents submitted, {} ticks rejected",
        sink.submitted(),
        registry.rejected()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_used_without_flag() {
        assert_eq!(resolve_level(None, "debug"), Level::DEBUG);
        assert_eq!(resolve_level(Some("WARN"), "debug"), Level::WARN);
        assert_eq!(resolve_level(None, "verbose"), Level::INFO);
    }
}
