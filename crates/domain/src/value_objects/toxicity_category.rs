//! Toxicity category value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// One label from the fixed, closed set of toxicity classification outcomes.
///
/// The wire labels are the Spanish strings the model is prompted with; they
/// are part of the contract and must not drift from the prompt text.
/// Construction from untrusted text goes through [`ToxicityCategory::parse_label`],
/// which rejects anything outside the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToxicityCategory {
    /// Mockery or attacks aimed at the player's (feminine) nickname
    #[serde(rename = "insulto_al_nickname")]
    NicknameInsult,
    /// Attacks tied to an in-game role (support, healer, ...)
    #[serde(rename = "insulto_por_rol_en_juego")]
    RoleInsult,
    /// References to domestic chores or gendered household stereotypes
    #[serde(rename = "insulto_asociado_a_un_esterotipo_domestico")]
    DomesticStereotype,
    /// Assumptions about gaming ability based on gender
    #[serde(rename = "prejuicios")]
    Prejudice,
    /// Direct insults, slurs or threats
    #[serde(rename = "lenguaje_ofensivo_o_amenaza")]
    OffensiveOrThreat,
    /// Anything that fits none of the above
    #[serde(rename = "texto_neutral")]
    Neutral,
}

impl ToxicityCategory {
    /// The wire label as it appears in prompts and model replies
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NicknameInsult => "insulto_al_nickname",
            Self::RoleInsult => "insulto_por_rol_en_juego",
            Self::DomesticStereotype => "insulto_asociado_a_un_esterotipo_domestico",
            Self::Prejudice => "prejuicios",
            Self::OffensiveOrThreat => "lenguaje_ofensivo_o_amenaza",
            Self::Neutral => "texto_neutral",
        }
    }

    /// Parse an untrusted label into a category.
    ///
    /// This is the only construction path from free text; labels outside the
    /// closed set are rejected, never coerced.
    pub fn parse_label(label: &str) -> Result<Self, DomainError> {
        Self::all()
            .into_iter()
            .find(|c| c.label() == label)
            .ok_or_else(|| DomainError::UnknownCategory(label.to_string()))
    }

    /// All categories, prompt declaration order
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::NicknameInsult,
            Self::RoleInsult,
            Self::DomesticStereotype,
            Self::Prejudice,
            Self::OffensiveOrThreat,
            Self::Neutral,
        ]
    }

    /// Whether this category denotes toxic speech (everything but neutral)
    #[must_use]
    pub const fn is_toxic(&self) -> bool {
        !matches!(self, Self::Neutral)
    }
}

impl fmt::Display for ToxicityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ToxicityCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s)
    }
}
