//! Infrastructure layer for ToxScreen
//!
//! Configuration loading and the adapters that wire application ports to the
//! local inference server.

pub mod adapters;
pub mod config;

pub use adapters::OpenAiInferenceAdapter;
pub use config::{AppConfig, ScreeningConfig, ServerConfig};
