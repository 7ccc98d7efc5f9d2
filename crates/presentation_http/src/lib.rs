//! HTTP presentation layer for ToxScreen
//!
//! Serves the single-page browser UI and the JSON screening API.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
