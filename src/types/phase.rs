//! Manipulation-cycle phase definitions

use serde::{Deserialize, Serialize};

/// Behavioral phase the persona is currently in.
///
/// `Neutral` is only the pre-first-turn value; the transition function never
/// selects it. Anything a host pushes that is not a known name is kept
/// verbatim in `Unrecognized` and matches no phase-gated rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    LoveBombing,
    Devaluation,
    Gaslighting,
    TraumaBonding,
    Neutral,
    Unrecognized(String),
}

impl Phase {
    /// Wire name (snake_case, as hosts persist it)
    pub fn as_str(&self) -> &str {
        match self {
            Phase::LoveBombing => "love_bombing",
            Phase::Devaluation => "devaluation",
            Phase::Gaslighting => "gaslighting",
            Phase::TraumaBonding => "trauma_bonding",
            Phase::Neutral => "neutral",
            Phase::Unrecognized(raw) => raw,
        }
    }

    /// Terminal color for this phase
    pub fn color(&self) -> colored::Color {
        match self {
            Phase::LoveBombing => colored::Color::Magenta,
            Phase::Devaluation => colored::Color::Yellow,
            Phase::Gaslighting => colored::Color::Cyan,
            Phase::TraumaBonding => colored::Color::Red,
            Phase::Neutral | Phase::Unrecognized(_) => colored::Color::BrightBlack,
        }
    }

    /// Get emoji for phase
    pub fn emoji(&self) -> &'static str {
        match self {
            Phase::LoveBombing => "💘",
            Phase::Devaluation => "🥀",
            Phase::Gaslighting => "🌫",
            Phase::TraumaBonding => "⛓",
            Phase::Neutral => "⏳",
            Phase::Unrecognized(_) => "❔",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Phase::Unrecognized(_))
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::LoveBombing
    }
}

impl From<String> for Phase {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "love_bombing" => Phase::LoveBombing,
            "devaluation" => Phase::Devaluation,
            "gaslighting" => Phase::Gaslighting,
            "trauma_bonding" => Phase::TraumaBonding,
            "neutral" => Phase::Neutral,
            _ => Phase::Unrecognized(raw),
        }
    }
}

impl From<&str> for Phase {
    fn from(raw: &str) -> Self {
        Phase::from(raw.to_string())
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
