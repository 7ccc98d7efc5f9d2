//! OpenAI-compatible inference engine implementation
//!
//! Connects to any local server exposing the OpenAI chat completions API
//! (Ollama, llama.cpp server, vLLM, ...).

mod client;

pub use client::OpenAiInferenceEngine;
