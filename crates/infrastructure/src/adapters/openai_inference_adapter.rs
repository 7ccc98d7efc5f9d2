//! Inference adapter - Implements InferencePort using ai_core
//!
//! Works with any local server exposing the OpenAI-compatible chat API
//! (standard Ollama, llama.cpp server, vLLM).

use std::sync::Arc;
use std::time::Instant;

use ai_core::{
    InferenceConfig, InferenceError, InferenceRequest, ModelSession, OpenAiInferenceEngine,
    ResponseFormat, SessionState,
};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult},
    prompt,
};
use async_trait::async_trait;
use domain::ChatMessage;
use tracing::{debug, instrument};

/// Adapter binding the application's inference port to the model session
#[derive(Debug)]
pub struct OpenAiInferenceAdapter {
    session: Arc<ModelSession>,
    structured_output: bool,
}

impl OpenAiInferenceAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let structured_output = config.structured_output;
        let engine = OpenAiInferenceEngine::new(config.clone())
            .map_err(|e| ApplicationError::Inference(e.to_string()))?;
        let session = ModelSession::new(Arc::new(engine), config)
            .map_err(|e| ApplicationError::Inference(e.to_string()))?;

        Ok(Self {
            session: Arc::new(session),
            structured_output,
        })
    }

    /// Handle to the session, for driving the load at startup
    pub fn session(&self) -> Arc<ModelSession> {
        Arc::clone(&self.session)
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::EmptyResponse => ApplicationError::EmptyResponse,
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Inference server unreachable: {msg}"))
            },
            InferenceError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("Inference timeout after {ms}ms"))
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

#[async_trait]
impl InferencePort for OpenAiInferenceAdapter {
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    async fn ask(&self, messages: &[ChatMessage]) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();

        let mut request = InferenceRequest::from_messages(messages);
        if self.structured_output {
            request =
                request.with_response_format(ResponseFormat::json_schema(prompt::response_schema()));
        }

        let response = self.session.ask(request).await.map_err(Self::map_error)?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            latency_ms = latency_ms,
            "Inference completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.session.state() == SessionState::Ready
            && self.session.health().await.unwrap_or(false)
    }

    fn current_model(&self) -> String {
        self.session.model().to_string()
    }

    async fn list_available_models(&self) -> Result<Vec<String>, ApplicationError> {
        self.session.list_models().await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_exposes_configured_model() {
        let adapter = OpenAiInferenceAdapter::new(InferenceConfig::llama_1b()).unwrap();
        assert_eq!(adapter.current_model(), "llama3.2:1b");
    }

    #[test]
    fn session_handle_starts_unloaded() {
        let adapter = OpenAiInferenceAdapter::new(InferenceConfig::default()).unwrap();
        assert_eq!(adapter.session().state(), SessionState::Unloaded);
    }

    #[tokio::test]
    async fn ask_before_load_maps_to_inference_error() {
        let adapter = OpenAiInferenceAdapter::new(InferenceConfig::default()).unwrap();
        let messages = vec![ChatMessage::user("hola")];
        let result = adapter.ask(&messages).await;
        assert!(matches!(result, Err(ApplicationError::Inference(_))));
    }

    #[test]
    fn empty_response_maps_to_dedicated_variant() {
        let mapped = OpenAiInferenceAdapter::map_error(InferenceError::EmptyResponse);
        assert!(matches!(mapped, ApplicationError::EmptyResponse));
    }

    #[test]
    fn connection_failure_maps_to_external_service() {
        let mapped = OpenAiInferenceAdapter::map_error(InferenceError::ConnectionFailed(
            "refused".to_string(),
        ));
        assert!(matches!(mapped, ApplicationError::ExternalService(_)));
    }

    #[test]
    fn timeout_maps_to_external_service() {
        let mapped = OpenAiInferenceAdapter::map_error(InferenceError::Timeout(5000));
        let ApplicationError::ExternalService(msg) = mapped else {
            unreachable!("Expected ExternalService");
        };
        assert!(msg.contains("5000ms"));
    }
}
