//! Inference port - Interface for LLM inference

use async_trait::async_trait;
use domain::ChatMessage;

use crate::error::ApplicationError;

/// Result of an inference call
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Raw completion text (first candidate)
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if available)
    pub tokens_used: Option<u32>,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// Port for inference operations
///
/// The adapter behind this port owns the session handle and the fixed
/// generation options; callers only provide the ordered message list.
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Submit an ordered message list and return the completion text
    async fn ask(&self, messages: &[ChatMessage]) -> Result<InferenceResult, ApplicationError>;

    /// Check if the inference backend is healthy
    async fn is_healthy(&self) -> bool;

    /// Get the name of the current model
    fn current_model(&self) -> String;

    /// List available models on the backend
    async fn list_available_models(&self) -> Result<Vec<String>, ApplicationError>;
}
