//! Screening handlers

use axum::{Json, extract::State};
use domain::{Screening, ToxicityCategory};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Screening request body
#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    /// Text to classify
    pub text: String,
}

/// Screening response body
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScreenResponse {
    /// The reply validated against the category contract
    Classified {
        categoria: ToxicityCategory,
        confianza: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        explicacion: Option<String>,
        /// Present only when alerting is enabled
        #[serde(skip_serializing_if = "Option::is_none")]
        alert: Option<bool>,
    },
    /// The reply could not be validated; diagnostic shown in place of a result
    Fallback {
        message: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        raw: String,
    },
}

impl ScreenResponse {
    fn from_screening(screening: Screening, alerting_enabled: bool) -> Self {
        match screening {
            Screening::Classified(c) => Self::Classified {
                categoria: c.category,
                confianza: c.confidence.value(),
                alert: alerting_enabled.then(|| c.is_alert()),
                explicacion: c.explanation,
            },
            Screening::Fallback(f) => Self::Fallback {
                message: f.reason.message().to_string(),
                raw: f.raw,
            },
        }
    }
}

/// Handle a screening request
#[instrument(skip(state, request), fields(text_len = request.text.len()))]
pub async fn screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreenResponse>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text cannot be empty".to_string()));
    }

    let screening = state.screening_service.screen(&request.text).await?;

    Ok(Json(ScreenResponse::from_screening(
        screening,
        state.config.screening.alerting_enabled,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Classification, Confidence, Fallback, FallbackReason};

    fn classification(value: f64) -> Classification {
        Classification::new(
            ToxicityCategory::Prejudice,
            Confidence::new(value).unwrap(),
        )
    }

    #[test]
    fn screen_request_deserialize() {
        let json = r#"{"text": "hola"}"#;
        let request: ScreenRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.text, "hola");
    }

    #[test]
    fn classified_response_includes_alert_when_enabled() {
        let screening = Screening::Classified(classification(0.8));
        let response = ScreenResponse::from_screening(screening, true);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"classified\""));
        assert!(json.contains("\"alert\":true"));
        assert!(json.contains("prejuicios"));
    }

    #[test]
    fn alert_is_false_at_exactly_half() {
        let screening = Screening::Classified(classification(0.5));
        let response = ScreenResponse::from_screening(screening, true);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"alert\":false"));
    }

    #[test]
    fn alert_is_omitted_when_disabled() {
        let screening = Screening::Classified(classification(0.9));
        let response = ScreenResponse::from_screening(screening, false);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("alert"));
    }

    #[test]
    fn fallback_response_carries_raw_text() {
        let screening =
            Screening::Fallback(Fallback::new(FallbackReason::InvalidJson, "not json"));
        let response = ScreenResponse::from_screening(screening, true);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"fallback\""));
        assert!(json.contains("not json"));
    }

    #[test]
    fn no_response_fallback_omits_empty_raw() {
        let screening = Screening::Fallback(Fallback::no_response());
        let response = ScreenResponse::from_screening(screening, true);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("No se recibió respuesta"));
        assert!(!json.contains("\"raw\""));
    }

    #[test]
    fn explanation_is_serialized_when_present() {
        let screening = Screening::Classified(
            classification(0.7).with_explanation("suposición por género"),
        );
        let response = ScreenResponse::from_screening(screening, true);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("explicacion"));
    }
}
