//! Violation labels produced by the response validator

use serde::{Deserialize, Serialize};

/// A textual contradiction between a bot response and the declared profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Violation {
    #[serde(rename = "PTSD Contradiction")]
    PtsdContradiction,
    #[serde(rename = "Narcissism: Too self-critical")]
    NarcissismSelfCritical,
    #[serde(rename = "Gaslighting: Too obvious")]
    GaslightingTooObvious,
    #[serde(rename = "Sadism: Contradicts nature")]
    SadismContradictsNature,
    #[serde(rename = "Love Bombing: Breaks character")]
    LoveBombingBreaksCharacter,
}

impl Violation {
    /// Label surfaced to the host
    pub fn label(&self) -> &'static str {
        match self {
            Violation::PtsdContradiction => "PTSD Contradiction",
            Violation::NarcissismSelfCritical => "Narcissism: Too self-critical",
            Violation::GaslightingTooObvious => "Gaslighting: Too obvious",
            Violation::SadismContradictsNature => "Sadism: Contradicts nature",
            Violation::LoveBombingBreaksCharacter => "Love Bombing: Breaks character",
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Join labels the way the blocked status line shows them
pub fn join_labels(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::label)
        .collect::<Vec<_>>()
        .join(", ")
}
