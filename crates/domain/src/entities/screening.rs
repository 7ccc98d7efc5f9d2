//! Screening outcome entities

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{Confidence, ToxicityCategory};

/// Confidence above which a classification is flagged as a potential
/// aggression. Strictly greater-than: exactly 0.5 does not alert.
pub const ALERT_THRESHOLD: f64 = 0.5;

/// A validated classification produced from a model reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Category drawn from the fixed set
    pub category: ToxicityCategory,
    /// Model-reported certainty
    pub confidence: Confidence,
    /// Optional model-provided rationale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Classification {
    /// Create a classification without an explanation
    pub const fn new(category: ToxicityCategory, confidence: Confidence) -> Self {
        Self {
            category,
            confidence,
            explanation: None,
        }
    }

    /// Attach a model-provided explanation
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Whether this result should raise the potential-aggression alert
    #[must_use]
    pub fn is_alert(&self) -> bool {
        self.confidence.exceeds(ALERT_THRESHOLD)
    }
}

/// Why a model reply could not be turned into a [`Classification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// Reply text was not valid JSON
    InvalidJson,
    /// Valid JSON but not a single object with the required fields
    WrongShape,
    /// The engine returned no completion at all
    NoResponse,
}

impl FallbackReason {
    /// Human-readable diagnostic shown in place of a structured result
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InvalidJson => "Error al parsear la respuesta del modelo.",
            Self::WrongShape => "El modelo no retornó el formato JSON correcto.",
            Self::NoResponse => "No se recibió respuesta del modelo.",
        }
    }
}

/// Diagnostic retained when validation fails: the reason plus the raw reply
/// text, so the user can still see what the model said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallback {
    /// What went wrong
    pub reason: FallbackReason,
    /// Raw model output (empty for [`FallbackReason::NoResponse`])
    pub raw: String,
}

impl Fallback {
    /// Fallback carrying the offending raw reply
    pub fn new(reason: FallbackReason, raw: impl Into<String>) -> Self {
        Self {
            reason,
            raw: raw.into(),
        }
    }

    /// The fixed fallback for an empty engine reply
    #[must_use]
    pub const fn no_response() -> Self {
        Self {
            reason: FallbackReason::NoResponse,
            raw: String::new(),
        }
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw.is_empty() {
            write!(f, "{}", self.reason.message())
        } else {
            write!(f, "{} Respuesta: {}", self.reason.message(), self.raw)
        }
    }
}

/// Outcome of screening one piece of text.
///
/// Malformed model output is data, not an error: it resolves to
/// [`Screening::Fallback`] and the request still completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Screening {
    /// The reply validated against the contract
    Classified(Classification),
    /// The reply could not be validated; diagnostic retained
    Fallback(Fallback),
}

impl Screening {
    /// The classification, if validation succeeded
    #[must_use]
    pub const fn classification(&self) -> Option<&Classification> {
        match self {
            Self::Classified(c) => Some(c),
            Self::Fallback(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confidence(value: f64) -> Confidence {
        Confidence::new(value).unwrap()
    }

    #[test]
    fn alert_requires_strictly_more_than_threshold() {
        let at = Classification::new(ToxicityCategory::Prejudice, confidence(0.5));
        assert!(!at.is_alert());

        let above = Classification::new(ToxicityCategory::Prejudice, confidence(0.51));
        assert!(above.is_alert());
    }

    #[test]
    fn low_confidence_neutral_does_not_alert() {
        let c = Classification::new(ToxicityCategory::Neutral, confidence(0.2));
        assert!(!c.is_alert());
    }

    #[test]
    fn with_explanation_sets_field() {
        let c = Classification::new(ToxicityCategory::RoleInsult, confidence(0.8))
            .with_explanation("ataque al rol de support");
        assert_eq!(c.explanation.as_deref(), Some("ataque al rol de support"));
    }

    #[test]
    fn classification_serializes_wire_names() {
        let c = Classification::new(ToxicityCategory::Neutral, confidence(0.2));
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("texto_neutral"));
        assert!(json.contains("0.2"));
        assert!(!json.contains("explanation"));
    }

    #[test]
    fn fallback_display_includes_raw() {
        let f = Fallback::new(FallbackReason::InvalidJson, "not json");
        let text = f.to_string();
        assert!(text.contains("Error al parsear"));
        assert!(text.contains("not json"));
    }

    #[test]
    fn no_response_fallback_is_fixed() {
        let f = Fallback::no_response();
        assert_eq!(f.reason, FallbackReason::NoResponse);
        assert!(f.raw.is_empty());
        assert_eq!(f.to_string(), "No se recibió respuesta del modelo.");
    }

    #[test]
    fn screening_classification_accessor() {
        let c = Classification::new(ToxicityCategory::Neutral, confidence(0.9));
        let screening = Screening::Classified(c.clone());
        assert_eq!(screening.classification(), Some(&c));

        let fallback = Screening::Fallback(Fallback::no_response());
        assert!(fallback.classification().is_none());
    }

    #[test]
    fn screening_serializes_with_status_tag() {
        let screening = Screening::Fallback(Fallback::new(FallbackReason::WrongShape, "[]"));
        let json = serde_json::to_string(&screening).unwrap();
        assert!(json.contains("\"status\":\"fallback\""));
        assert!(json.contains("wrong_shape"));
    }
}
