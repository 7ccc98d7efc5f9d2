//! Application state shared across handlers

use std::sync::Arc;

use application::ScreeningService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Screening service for text classification
    pub screening_service: Arc<ScreeningService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
