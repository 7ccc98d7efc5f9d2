//! Confidence value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Model-reported certainty in an assigned category.
///
/// Always a finite number in `[0, 1]`; anything else is rejected at
/// construction so downstream code never has to re-validate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Validate and wrap a raw confidence value
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::invalid_confidence(value))
        }
    }

    /// The inner value
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Strictly-greater-than comparison against a threshold
    #[must_use]
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.0 > threshold
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Confidence {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(Confidence::new(0.0).is_ok());
        assert!(Confidence::new(1.0).is_ok());
        assert!(Confidence::new(0.5).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Confidence::new(-0.01).is_err());
        assert!(Confidence::new(1.01).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Confidence::new(f64::NAN).is_err());
        assert!(Confidence::new(f64::INFINITY).is_err());
        assert!(Confidence::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn value_round_trips() {
        let c = Confidence::new(0.73).unwrap();
        assert!((c.value() - 0.73).abs() < f64::EPSILON);
    }

    #[test]
    fn exceeds_is_strict() {
        let c = Confidence::new(0.5).unwrap();
        assert!(!c.exceeds(0.5));

        let c = Confidence::new(0.51).unwrap();
        assert!(c.exceeds(0.5));
    }

    #[test]
    fn display_prints_raw_value() {
        let c = Confidence::new(0.2).unwrap();
        assert_eq!(format!("{c}"), "0.2");
    }

    #[test]
    fn serializes_as_plain_number() {
        let c = Confidence::new(0.9).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "0.9");
    }

    #[test]
    fn deserialization_validates() {
        let c: Confidence = serde_json::from_str("0.4").unwrap();
        assert!((c.value() - 0.4).abs() < f64::EPSILON);

        assert!(serde_json::from_str::<Confidence>("1.5").is_err());
        assert!(serde_json::from_str::<Confidence>("-1").is_err());
    }
}
