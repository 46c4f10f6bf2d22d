//! Replay harness
//!
//! Feeds recorded ticks through the engines and collects the resulting
//! intents. Stands in for the hosting platform when running offline.

pub mod sink;
pub mod source;

pub use sink::{LogSink, RecordingSink};
pub use source::ReplayFeed;
