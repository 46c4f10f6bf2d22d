use tracing::info;

use crate::common::traits::IntentSink;
use crate::strategy::types::OrderIntent;

/// Sink that only logs intents; used by the replay binary
#[derive(Debug, Default)]
pub struct LogSink {
    submitted: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }
}

impl IntentSink for LogSink {
    fn submit(&mut self, symbol: &str, intent: &OrderIntent) {
        self.submitted += 1;
        info!(
            symbol,
            side = %intent.side,
            price = intent.price,
            stop_loss_ticks = intent.stop_loss_ticks,
            reason = ?intent.reason,
            "placeLimitOrder"
        );
    }
}

/// Sink that keeps every intent in memory, in submission order
#[derive(Debug, Default)]
pub struct RecordingSink {
    intents: Vec<(String, OrderIntent)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intents(&self) -> &[(String, OrderIntent)] {
        &self.intents
    }

    /// Intents recorded for one symbol
    pub fn for_symbol<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a OrderIntent> + 'a {
        self.intents
            .iter()
            .filter(move |(s, _)| s == symbol)
            .map(|(_, intent)| intent)
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

impl IntentSink for RecordingSink {
    fn submit(&mut self, symbol: &str, intent: &OrderIntent) {
        self.intents.push((symbol.to_string(), *intent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::traits::dispatch;
    use crate::common::types::Side;
    use crate::strategy::types::{Decision, IntentReason};

    #[test]
    fn test_recording_sink_keeps_order_per_symbol() {
        let mut sink = RecordingSink::new();
        let bid = OrderIntent::limit(Side::Bid, 99, 4, IntentReason::Entry);
        let ask = OrderIntent::limit(Side::Ask, 105, 4, IntentReason::TakeProfit);

        dispatch(&mut sink, "ES", &Decision::go(vec![bid]));
        dispatch(&mut sink, "CL", &Decision::go(vec![ask]));
        dispatch(&mut sink, "ES", &Decision::go(vec![ask]));

        assert_eq!(sink.len(), 3);
        let es: Vec<_> = sink.for_symbol("ES").copied().collect();
        assert_eq!(es, vec![bid, ask]);
    }

    #[test]
    fn test_log_sink_counts_submissions() {
        let mut sink = LogSink::new();
        let intent = OrderIntent::limit(Side::Bid, 99, 4, IntentReason::Quote);

        assert_eq!(dispatch(&mut sink, "ES", &Decision::go(vec![intent, intent])), 2);
        assert_eq!(sink.submitted(), 2);
    }
}
