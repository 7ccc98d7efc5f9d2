//! Screening service - classifies one text per request
//!
//! Per-request flow: Idle → Pending → Resolved(Classification | Fallback).
//! No retries and no cancellation; a failure resolves the request and the
//! next attempt is user-initiated.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use domain::{Classification, Confidence, Fallback, FallbackReason, Screening, ToxicityCategory};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{error::ApplicationError, ports::InferencePort, prompt};

/// Service that screens user text through the model session.
///
/// At most one screening is in flight at a time: the trigger control in the
/// UI is disabled while pending, and this service enforces the same rule for
/// programmatic callers by returning [`ApplicationError::Busy`].
pub struct ScreeningService {
    inference: Arc<dyn InferencePort>,
    in_flight: AtomicBool,
}

impl fmt::Debug for ScreeningService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreeningService")
            .field("in_flight", &self.in_flight.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag when the pending request resolves
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl ScreeningService {
    /// Create a new screening service
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self {
            inference,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Screen a single piece of text.
    ///
    /// Malformed model output resolves to [`Screening::Fallback`]; only
    /// transport-level failures and the busy/input guards surface as errors.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn screen(&self, text: &str) -> Result<Screening, ApplicationError> {
        if text.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "Text cannot be empty".to_string(),
            ));
        }

        let _guard = self.try_begin()?;

        let messages = prompt::build_prompt(text);

        let result = match self.inference.ask(&messages).await {
            Ok(result) => result,
            Err(ApplicationError::EmptyResponse) => {
                warn!("Engine returned no completion");
                return Ok(Screening::Fallback(Fallback::no_response()));
            },
            Err(e) => return Err(e),
        };

        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = result.latency_ms,
            "Screening reply received"
        );

        Ok(interpret_reply(&result.content))
    }

    /// Check if the underlying inference is healthy
    pub async fn is_healthy(&self) -> bool {
        self.inference.is_healthy().await
    }

    /// Get the current model name
    pub fn current_model(&self) -> String {
        self.inference.current_model()
    }

    /// List available models on the backend
    pub async fn list_available_models(&self) -> Result<Vec<String>, ApplicationError> {
        self.inference.list_available_models().await
    }

    /// Acquire the single in-flight slot or fail with Busy
    fn try_begin(&self) -> Result<InFlightGuard<'_>, ApplicationError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ApplicationError::Busy);
        }

        Ok(InFlightGuard {
            flag: &self.in_flight,
        })
    }
}

/// Validate a raw model reply into a screening outcome.
///
/// The contract is one JSON object with a `categoria` from the fixed set and
/// a numeric `confianza` in [0, 1]. Anything else becomes a fallback carrying
/// the raw text; nothing is coerced.
fn interpret_reply(raw: &str) -> Screening {
    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        return Screening::Fallback(Fallback::new(FallbackReason::InvalidJson, raw));
    };

    // An object, not an array or scalar.
    let Some(object) = value.as_object() else {
        return Screening::Fallback(Fallback::new(FallbackReason::WrongShape, raw));
    };

    let Some(label) = object.get("categoria").and_then(Value::as_str) else {
        return Screening::Fallback(Fallback::new(FallbackReason::WrongShape, raw));
    };

    let Some(number) = object.get("confianza").and_then(Value::as_f64) else {
        return Screening::Fallback(Fallback::new(FallbackReason::WrongShape, raw));
    };

    let Ok(category) = ToxicityCategory::parse_label(label) else {
        return Screening::Fallback(Fallback::new(FallbackReason::WrongShape, raw));
    };

    let Ok(confidence) = Confidence::new(number) else {
        return Screening::Fallback(Fallback::new(FallbackReason::WrongShape, raw));
    };

    let mut classification = Classification::new(category, confidence);
    if let Some(explanation) = object.get("explicacion").and_then(Value::as_str) {
        classification = classification.with_explanation(explanation);
    }

    Screening::Classified(classification)
}
