//! Configuration module - application settings and policy thresholds

pub mod loader;
pub mod types;

pub use loader::load_config;
pub use types::{AppConfig, AppSettings, EngineConfig, PolicyConfig};
