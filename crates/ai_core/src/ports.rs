//! Port definitions for inference engine
//!
//! Defines the traits (ports) that inference adapters must implement.

use async_trait::async_trait;
use domain::{ChatMessage, MessageRole};
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Request for inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    /// Messages in the conversation
    pub messages: Vec<InferenceMessage>,
    /// Model to use (overrides config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Whether to stream the response (always false for screening calls)
    #[serde(default)]
    pub stream: bool,
    /// Optional JSON-shape constraint on the reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// A message in the inference request (OpenAI-compatible format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceMessage {
    pub role: String,
    pub content: String,
}

impl From<&ChatMessage> for InferenceMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: match msg.role {
                MessageRole::User => "user".to_string(),
                MessageRole::Assistant => "assistant".to_string(),
                MessageRole::System => "system".to_string(),
            },
            content: msg.content.clone(),
        }
    }
}

/// Constraint instructing the engine to emit JSON, optionally against a schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Constraint kind; the only supported value is `json_object`
    #[serde(rename = "type")]
    pub format_type: String,
    /// Optional JSON schema string the reply must satisfy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl ResponseFormat {
    /// Plain JSON-object constraint, no schema
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
            schema: None,
        }
    }

    /// JSON-object constraint with a schema string
    pub fn json_schema(schema: impl Into<String>) -> Self {
        Self {
            format_type: "json_object".to_string(),
            schema: Some(schema.into()),
        }
    }
}

impl InferenceRequest {
    /// Create a simple single-turn request
    pub fn simple(user_message: impl Into<String>) -> Self {
        Self {
            messages: vec![InferenceMessage {
                role: "user".to_string(),
                content: user_message.into(),
            }],
            model: None,
            max_tokens: None,
            temperature: None,
            stream: false,
            response_format: None,
        }
    }

    /// Create a request with system prompt
    pub fn with_system(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![
                InferenceMessage {
                    role: "system".to_string(),
                    content: system.into(),
                },
                InferenceMessage {
                    role: "user".to_string(),
                    content: user.into(),
                },
            ],
            model: None,
            max_tokens: None,
            temperature: None,
            stream: false,
            response_format: None,
        }
    }

    /// Create a request from an ordered list of domain messages
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        Self {
            messages: messages.iter().map(InferenceMessage::from).collect(),
            model: None,
            max_tokens: None,
            temperature: None,
            stream: false,
            response_format: None,
        }
    }

    /// Set the model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set temperature
    pub const fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set the maximum number of tokens to generate
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Constrain the reply shape
    #[must_use]
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }
}

/// Response from inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResponse {
    /// Generated content (first candidate)
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Port for inference engine implementations
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Generate a complete response (non-streaming)
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError>;

    /// Check if the inference server is healthy
    async fn health_check(&self) -> Result<bool, InferenceError>;

    /// List available models
    async fn list_models(&self) -> Result<Vec<String>, InferenceError>;

    /// Get the current default model
    fn default_model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_request_simple() {
        let req = InferenceRequest::simple("Hello");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
        assert_eq!(req.messages[0].content, "Hello");
        assert!(!req.stream);
        assert!(req.response_format.is_none());
    }

    #[test]
    fn inference_request_with_system() {
        let req = InferenceRequest::with_system("You are a classifier", "Hi");
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, "system");
        assert_eq!(req.messages[0].content, "You are a classifier");
        assert_eq!(req.messages[1].role, "user");
        assert_eq!(req.messages[1].content, "Hi");
    }

    #[test]
    fn inference_request_from_messages_preserves_order() {
        let messages = vec![
            ChatMessage::system("rules"),
            ChatMessage::user("first"),
            ChatMessage::assistant("reply"),
        ];
        let req = InferenceRequest::from_messages(&messages);
        assert_eq!(req.messages.len(), 3);
        assert_eq!(req.messages[0].role, "system");
        assert_eq!(req.messages[1].role, "user");
        assert_eq!(req.messages[2].role, "assistant");
    }

    #[test]
    fn inference_request_with_model() {
        let req = InferenceRequest::simple("Test").with_model("my-model");
        assert_eq!(req.model, Some("my-model".to_string()));
    }

    #[test]
    fn inference_request_chaining() {
        let req = InferenceRequest::simple("Test")
            .with_model("llama")
            .with_temperature(0.3)
            .with_max_tokens(150);
        assert_eq!(req.model, Some("llama".to_string()));
        assert_eq!(req.temperature, Some(0.3));
        assert_eq!(req.max_tokens, Some(150));
    }

    #[test]
    fn response_format_json_object() {
        let format = ResponseFormat::json_object();
        assert_eq!(format.format_type, "json_object");
        assert!(format.schema.is_none());
    }

    #[test]
    fn response_format_with_schema() {
        let format = ResponseFormat::json_schema(r#"{"type":"object"}"#);
        assert_eq!(format.format_type, "json_object");
        assert_eq!(format.schema.as_deref(), Some(r#"{"type":"object"}"#));
    }

    #[test]
    fn response_format_serializes_type_key() {
        let req =
            InferenceRequest::simple("Test").with_response_format(ResponseFormat::json_object());
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""response_format":{"type":"json_object"}"#));
    }

    #[test]
    fn inference_message_from_chat_message_user() {
        let msg = ChatMessage::user("Hello");
        let inf_msg = InferenceMessage::from(&msg);
        assert_eq!(inf_msg.role, "user");
        assert_eq!(inf_msg.content, "Hello");
    }

    #[test]
    fn inference_message_from_chat_message_system() {
        let msg = ChatMessage::system("You are a classifier");
        let inf_msg = InferenceMessage::from(&msg);
        assert_eq!(inf_msg.role, "system");
        assert_eq!(inf_msg.content, "You are a classifier");
    }

    #[test]
    fn inference_request_skip_none_fields() {
        let req = InferenceRequest::simple("Test");
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("model"));
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("temperature"));
        assert!(!json.contains("response_format"));
    }

    #[test]
    fn inference_response_creation() {
        let resp = InferenceResponse {
            content: r#"{"categoria":"texto_neutral","confianza":0.2}"#.to_string(),
            model: "llama3.2:1b".to_string(),
            usage: None,
            finish_reason: Some("stop".to_string()),
        };
        assert!(resp.content.contains("texto_neutral"));
        assert_eq!(resp.model, "llama3.2:1b");
    }

    #[test]
    fn inference_response_with_usage() {
        let resp = InferenceResponse {
            content: "{}".to_string(),
            model: "llama3.2:1b".to_string(),
            usage: Some(TokenUsage {
                prompt_tokens: 420,
                completion_tokens: 21,
                total_tokens: 441,
            }),
            finish_reason: None,
        };
        let usage = resp.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 420);
        assert_eq!(usage.completion_tokens, 21);
        assert_eq!(usage.total_tokens, 441);
    }
}
