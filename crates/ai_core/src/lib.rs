//! AI Core - Inference engine and model session management
//!
//! Talks to a locally-served small language model through its
//! OpenAI-compatible chat completions API (Ollama and friends), and owns the
//! lifecycle of the one model session the application uses.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;
pub mod session;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAiInferenceEngine;
pub use ports::{
    InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, ResponseFormat,
    TokenUsage,
};
pub use session::{LoadProgress, ModelSession, SessionState};
