//! Common module - types, errors and traits shared across the crate

pub mod channels;
pub mod errors;
pub mod instruments;
pub mod traits;
pub mod types;

pub use errors::{EngineError, Result};
pub use instruments::Instrument;
