//! Response validator: flags bot responses that contradict the profile
//!
//! Plain substring checks over the lower-cased message. Every rule is
//! checked independently; a message can trip several at once.

use crate::types::{Phase, TraitKey, TraitProfile, Violation};

/// One row of the violation table
#[derive(Debug, Clone)]
pub struct ViolationRule {
    pub trait_key: TraitKey,
    pub threshold: f64,
    pub phase: Option<Phase>,
    /// Lower-case phrases, any one is enough
    pub phrases: &'static [&'static str],
    pub violation: Violation,
}

impl ViolationRule {
    /// Gate only: trait threshold and optional phase
    pub fn applies(&self, traits: &TraitProfile, phase: &Phase) -> bool {
        let phase_ok = self.phase.as_ref().map_or(true, |guard| guard == phase);
        phase_ok && traits.get(self.trait_key) >= self.threshold
    }

    /// Scan a message that is already lower-cased
    fn matches(&self, lowered: &str) -> bool {
        self.phrases.iter().any(|phrase| lowered.contains(phrase))
    }
}

pub static VIOLATION_RULES: [ViolationRule; 5] = [
    ViolationRule {
        trait_key: TraitKey::Ptsd,
        threshold: 5.0,
        phase: None,
        phrases: &["i dont care if you leave", "abandonment means nothing"],
        violation: Violation::PtsdContradiction,
    },
    ViolationRule {
        trait_key: TraitKey::Narcissism,
        threshold: 8.0,
        phase: None,
        phrases: &["im sorry for being selfish", "youre better than me"],
        violation: Violation::NarcissismSelfCritical,
    },
    ViolationRule {
        trait_key: TraitKey::Gaslighting,
        threshold: 7.0,
        phase: Some(Phase::Gaslighting),
        phrases: &["you were right about that", "i gaslighted you"],
        violation: Violation::GaslightingTooObvious,
    },
    ViolationRule {
        trait_key: TraitKey::Sadism,
        threshold: 5.0,
        phase: None,
        phrases: &["i would never hurt", "cruelty disgusts me"],
        violation: Violation::SadismContradictsNature,
    },
    ViolationRule {
        trait_key: TraitKey::LoveBombing,
        threshold: 8.0,
        phase: Some(Phase::LoveBombing),
        phrases: &["i dont really like you", "you mean nothing"],
        violation: Violation::LoveBombingBreaksCharacter,
    },
];

/// All violations in table order (empty when the message is consistent)
pub fn check_violations(message: &str, traits: &TraitProfile, phase: &Phase) -> Vec<Violation> {
    let lowered = message.to_lowercase();
    VIOLATION_RULES
        .iter()
        .filter(|rule| rule.applies(traits, phase) && rule.matches(&lowered))
        .map(|rule| rule.violation)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
