use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::common::errors::{EngineError, Result};
use crate::common::traits::TickSource;
use crate::common::types::MarketTick;

/// Tick source reading one JSON-encoded `MarketTick` per line
///
/// Blank lines are ignored. Lines that fail to parse are logged and skipped
/// so one corrupt record does not end a long replay.
#[derive(Debug, Clone)]
pub struct ReplayFeed {
    path: PathBuf,
    name: String,
    skipped: usize,
}

impl ReplayFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("replay:{}", path.display());
        Self {
            path,
            name,
            skipped: 0,
        }
    }

    /// Lines that could not be parsed during the last run
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[async_trait]
impl TickSource for ReplayFeed {
    async fn start(&mut self, sender: mpsc::Sender<MarketTick>) -> Result<()> {
        info!("Replaying ticks from {}", self.path.display());

        let file = File::open(&self.path).await?;
        let mut lines = BufReader::new(file).lines();
        let mut line_no = 0usize;
        let mut sent = 0usize;
        self.skipped = 0;

        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let tick: MarketTick = match serde_json::from_str(line) {
                Ok(tick) => tick,
                Err(e) => {
                    warn!("Failed to parse tick on line {}: {}", line_no, e);
                    self.skipped += 1;
                    continue;
                }
            };

            sender
                .send(tick)
                .await
                .map_err(|e| EngineError::ChannelSend(e.to_string()))?;
            sent += 1;
        }

        debug!(sent, skipped = self.skipped, "replay exhausted");
        info!("Replay finished: {} ticks sent", sent);
        Ok(())
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::channels::create_tick_channel_with_size;
    use std::io::Write;

    fn tick_line(symbol: &str, ms: i64, bid: i64) -> String {
        format!(
            r#"{{"symbol":"{symbol}","timestamp":{ms},"book":{{"levels":[{{"bid_px":{bid},"ask_px":{ask}}}],"attributes":{{"bid_density":10,"ask_density":10}}}}}}"#,
            ask = bid + 1
        )
    }

    fn write_replay(name: &str, lines: &[String]) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[tokio::test]
    async fn test_replays_ticks_in_file_order() {
        let path = write_replay(
            "density_quoter_source_order.jsonl",
            &[tick_line("ES", 0, 100), String::new(), tick_line("ES", 1000, 99)],
        );
        let (tx, mut rx) = create_tick_channel_with_size(8);

        let mut feed = ReplayFeed::new(&path);
        feed.start(tx).await.unwrap();

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.book.best_bid(), 100);
        assert_eq!(second.timestamp.timestamp_millis(), 1000);
        assert!(rx.recv().await.is_none());
        assert_eq!(feed.skipped(), 0);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_skips_malformed_lines() {
        let path = write_replay(
            "density_quoter_source_malformed.jsonl",
            &["{not json".to_string(), tick_line("CL", 5, 42)],
        );
        let (tx, mut rx) = create_tick_channel_with_size(8);

        let mut feed = ReplayFeed::new(&path);
        feed.start(tx).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().symbol, "CL");
        assert_eq!(feed.skipped(), 1);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let (tx, _rx) = create_tick_channel_with_size(1);
        let mut feed = ReplayFeed::new("/nonexistent/ticks.jsonl");

        assert!(matches!(feed.start(tx).await, Err(EngineError::Io(_))));
        assert!(feed.source_name().starts_with("replay:"));
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_channel_error() {
        let path = write_replay("density_quoter_source_closed.jsonl", &[tick_line("ES", 0, 100)]);
        let (tx, rx) = create_tick_channel_with_size(1);
        drop(rx);

        let mut feed = ReplayFeed::new(&path);
        assert!(matches!(feed.start(tx).await, Err(EngineError::ChannelSend(_))));

        std::fs::remove_file(path).ok();
    }
}
