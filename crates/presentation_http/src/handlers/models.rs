//! Model listing handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

/// Models list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    /// Models available on the inference server
    pub models: Vec<String>,
    /// Model this deployment is bound to
    pub current: String,
}

/// List the models the inference server has available
pub async fn list_models(State(state): State<AppState>) -> Result<Json<ModelsResponse>, ApiError> {
    let models = state.screening_service.list_available_models().await?;

    Ok(Json(ModelsResponse {
        models,
        current: state.screening_service.current_model(),
    }))
}
