//! Model session lifecycle
//!
//! One session per process, bound to one model identifier. The session is
//! created Unloaded, moves to Loading while the server pulls the model
//! weights, then to Ready (or Failed). Only a Ready session accepts `ask`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use parking_lot::RwLock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{InferenceEngine, InferenceRequest, InferenceResponse};

/// Lifecycle state of the model session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Created, load not yet started
    Unloaded,
    /// Model weights are being fetched/initialized
    Loading,
    /// Session accepts `ask` calls
    Ready,
    /// Load failed; the session stays unusable until a fresh load succeeds
    Failed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// One progress report emitted while the model loads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadProgress {
    /// Server-reported phase ("pulling manifest", "verifying sha256 digest", ...)
    pub status: String,
    /// Bytes fetched so far, when the phase reports them
    #[serde(default)]
    pub completed: Option<u64>,
    /// Total bytes for the phase, when known
    #[serde(default)]
    pub total: Option<u64>,
}

impl LoadProgress {
    /// Completion ratio in [0, 1] when both counters are present
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        match (self.completed, self.total) {
            #[allow(clippy::cast_precision_loss)]
            (Some(completed), Some(total)) if total > 0 => {
                Some(completed as f64 / total as f64)
            },
            _ => None,
        }
    }
}

/// One line of the server's NDJSON pull stream
#[derive(Debug, Deserialize)]
struct PullLine {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    completed: Option<u64>,
    #[serde(default)]
    total: Option<u64>,
}

/// Owns the lifecycle of one inference engine instance bound to one model.
///
/// Explicitly passed to whoever needs to ask the model, so tests can
/// substitute a fake engine underneath.
pub struct ModelSession {
    engine: Arc<dyn InferenceEngine>,
    client: Client,
    config: InferenceConfig,
    state: RwLock<SessionState>,
    init: OnceCell<()>,
}

impl fmt::Debug for ModelSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSession")
            .field("model", &self.config.model)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl ModelSession {
    /// Create an unloaded session over the given engine
    pub fn new(
        engine: Arc<dyn InferenceEngine>,
        config: InferenceConfig,
    ) -> Result<Self, InferenceError> {
        // No overall timeout: pulling weights can legitimately take minutes.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            engine,
            client,
            config,
            state: RwLock::new(SessionState::Unloaded),
            init: OnceCell::new(),
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    /// The model identifier this session is bound to
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Load the model, invoking `on_progress` for each server progress line.
    ///
    /// Concurrent callers share a single in-flight load: the second call
    /// awaits the first one's result instead of starting another pull.
    #[instrument(skip(self, on_progress), fields(model = %self.config.model))]
    pub async fn load<F>(&self, on_progress: F) -> Result<(), InferenceError>
    where
        F: Fn(&LoadProgress) + Send + Sync,
    {
        self.init
            .get_or_try_init(|| async {
                *self.state.write() = SessionState::Loading;
                info!("Loading model");

                match self.pull_model(&on_progress).await {
                    Ok(()) => {
                        *self.state.write() = SessionState::Ready;
                        info!("Model ready");
                        Ok(())
                    },
                    Err(e) => {
                        *self.state.write() = SessionState::Failed;
                        warn!(error = %e, "Model load failed");
                        Err(e)
                    },
                }
            })
            .await
            .map(|_| ())
    }

    /// Submit a prompt to the loaded model and return the first candidate.
    ///
    /// Fails with [`InferenceError::SessionNotReady`] unless the session has
    /// completed loading.
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    pub async fn ask(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let state = self.state();
        if state != SessionState::Ready {
            return Err(InferenceError::SessionNotReady(state));
        }

        self.engine.generate(request).await
    }

    /// Check whether the underlying inference server is reachable
    pub async fn health(&self) -> Result<bool, InferenceError> {
        self.engine.health_check().await
    }

    /// List models available on the server
    pub async fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        self.engine.list_models().await
    }

    /// Stream the server's pull endpoint, forwarding progress lines
    async fn pull_model<F>(&self, on_progress: &F) -> Result<(), InferenceError>
    where
        F: Fn(&LoadProgress) + Send + Sync,
    {
        let url = format!("{}/api/pull", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "model": self.config.model, "stream": true }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::LoadFailed(format!(
                "Status {status}: {body}"
            )));
        }

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| InferenceError::StreamError(e.to_string()))?;
            let text = std::str::from_utf8(&bytes)
                .map_err(|e| InferenceError::StreamError(format!("Invalid UTF-8: {e}")))?;
            buffer.push_str(text);

            while let Some(pos) = buffer.find('\n') {
                let line: String = buffer.drain(..=pos).collect();
                Self::handle_pull_line(line.trim(), on_progress)?;
            }
        }

        // The stream may end without a trailing newline.
        Self::handle_pull_line(buffer.trim(), on_progress)?;

        Ok(())
    }

    fn handle_pull_line<F>(line: &str, on_progress: &F) -> Result<(), InferenceError>
    where
        F: Fn(&LoadProgress),
    {
        if line.is_empty() {
            return Ok(());
        }

        let parsed: PullLine = serde_json::from_str(line)
            .map_err(|e| InferenceError::InvalidResponse(format!("JSON parse error: {e}")))?;

        if let Some(error) = parsed.error {
            return Err(InferenceError::LoadFailed(error));
        }

        let progress = LoadProgress {
            status: parsed.status.unwrap_or_default(),
            completed: parsed.completed,
            total: parsed.total,
        };

        debug!(status = %progress.status, completed = ?progress.completed, "Load progress");
        on_progress(&progress);

        Ok(())
    }
}
