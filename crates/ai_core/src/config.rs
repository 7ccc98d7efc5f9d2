//! Configuration for inference engine

use serde::{Deserialize, Serialize};

/// Configuration for the inference engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the inference server (Ollama-compatible)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model the session is bound to for the whole app lifetime
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Top-p (nucleus) sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Constrain replies to JSON via the server's response_format support
    #[serde(default = "default_true")]
    pub structured_output: bool,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2:1b".to_string()
}

const fn default_timeout_ms() -> u64 {
    60000 // 60 seconds
}

const fn default_max_tokens() -> u32 {
    150
}

const fn default_temperature() -> f32 {
    0.1 // Low temp for structured output
}

const fn default_top_p() -> f32 {
    0.9
}

const fn default_true() -> bool {
    true
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            structured_output: default_true(),
        }
    }
}

impl InferenceConfig {
    /// Config for llama3.2 1B (the default screening model)
    pub fn llama_1b() -> Self {
        Self {
            model: "llama3.2:1b".to_string(),
            ..Default::default()
        }
    }

    /// Config for qwen2.5 1.5B instruct
    pub fn qwen_1_5b() -> Self {
        Self {
            model: "qwen2.5:1.5b-instruct".to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = InferenceConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "llama3.2:1b");
        assert_eq!(config.timeout_ms, 60000);
        assert_eq!(config.max_tokens, 150);
        assert!((config.temperature - 0.1).abs() < 0.01);
        assert!((config.top_p - 0.9).abs() < 0.01);
        assert!(config.structured_output);
    }

    #[test]
    fn llama_config() {
        let config = InferenceConfig::llama_1b();
        assert_eq!(config.model, "llama3.2:1b");
        assert_eq!(config.base_url, "http://localhost:11434");
    }

    #[test]
    fn qwen_config() {
        let config = InferenceConfig::qwen_1_5b();
        assert_eq!(config.model, "qwen2.5:1.5b-instruct");
    }

    #[test]
    fn config_serialization() {
        let config = InferenceConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("base_url"));
        assert!(json.contains("model"));
        assert!(json.contains("structured_output"));
    }

    #[test]
    fn config_deserialization() {
        let json = r#"{"base_url":"http://custom:8080","model":"my-model"}"#;
        let config: InferenceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "http://custom:8080");
        assert_eq!(config.model, "my-model");
    }

    #[test]
    fn config_deserialization_with_defaults() {
        let json = r"{}";
        let config: InferenceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.max_tokens, 150);
        assert!(config.structured_output);
    }

    #[test]
    fn higher_temperature_is_representable() {
        // The exploratory sampling variant stays reachable through config.
        let json = r#"{"temperature":0.8}"#;
        let config: InferenceConfig = serde_json::from_str(json).unwrap();
        assert!((config.temperature - 0.8).abs() < 0.01);
    }

    #[test]
    fn config_clone() {
        let config = InferenceConfig::qwen_1_5b();
        let cloned = config.clone();
        assert_eq!(config.model, cloned.model);
        assert_eq!(config.base_url, cloned.base_url);
    }
}
