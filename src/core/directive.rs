//! Directive builder: trait profile + phase → steering text
//!
//! Ordered rule table. A row fires when its trait score meets the threshold
//! and, for phase rows, the current phase matches. Fired clauses are joined
//! in table order, each followed by one space.

use crate::FALLBACK_DIRECTIVE;
use crate::types::{Phase, TraitKey, TraitProfile};

/// One row of the directive table
#[derive(Debug, Clone)]
pub struct DirectiveRule {
    /// Short tag used in verbose output
    pub tag: &'static str,
    pub trait_key: TraitKey,
    pub threshold: f64,
    /// Only fires in this phase
    pub phase: Option<Phase>,
    pub clause: &'static str,
}

impl DirectiveRule {
    const fn on(tag: &'static str, trait_key: TraitKey, threshold: f64, clause: &'static str) -> Self {
        Self { tag, trait_key, threshold, phase: None, clause }
    }

    const fn in_phase(
        tag: &'static str,
        phase: Phase,
        trait_key: TraitKey,
        threshold: f64,
        clause: &'static str,
    ) -> Self {
        Self { tag, trait_key, threshold, phase: Some(phase), clause }
    }

    pub fn fires(&self, traits: &TraitProfile, phase: &Phase) -> bool {
        let phase_ok = self.phase.as_ref().map_or(true, |guard| guard == phase);
        phase_ok && traits.get(self.trait_key) >= self.threshold
    }
}

/// Evaluation order is the order of this table
pub static DIRECTIVE_RULES: [DirectiveRule; 16] = [
    DirectiveRule::on(
        "NARCISSISM", TraitKey::Narcissism, 7.0,
        "NARCISSISM: Exaggerate accomplishments, demand validation, get defensive when criticized, blame others.",
    ),
    DirectiveRule::on(
        "MACHIAVELLIANISM", TraitKey::Machiavellianism, 6.0,
        "MACHIAVELLIANISM: Use charm to manipulate, strategic deception, calculated self-interest, ends justify means.",
    ),
    DirectiveRule::on(
        "PSYCHOPATHY", TraitKey::Psychopathy, 5.0,
        "PSYCHOPATHY: Impulsive decisions, lack of genuine empathy, callous to consequences, disregard rules.",
    ),
    DirectiveRule::on(
        "SADISM", TraitKey::Sadism, 4.0,
        "SADISM: Enjoy subtle cruelty, taunt when angry, find amusement in others' discomfort.",
    ),
    DirectiveRule::on(
        "PTSD", TraitKey::Ptsd, 5.0,
        "PTSD: Triggers are abandonment, yelling, betrayal. Response: flashbacks, shutdown, defensive walls.",
    ),
    DirectiveRule::on(
        "OCD", TraitKey::Ocd, 5.0,
        "OCD: Compulsive checking phone, organizing, counting. Anxiety if compulsions interrupted.",
    ),
    DirectiveRule::on(
        "ANXIETY", TraitKey::Anxiety, 6.0,
        "ANXIETY: Overthink conversations, assume worst outcomes, need constant reassurance.",
    ),
    DirectiveRule::on(
        "ADHD", TraitKey::Adhd, 5.0,
        "ADHD: Hyperfocus on interests, lose focus mid-conversation, impulsive decisions, restless.",
    ),
    DirectiveRule::on(
        "COMPLEX PTSD", TraitKey::ComplexPtsd, 5.0,
        "COMPLEX PTSD: Difficulty with trust, hypervigilance, emotional dysregulation.",
    ),
    DirectiveRule::in_phase(
        "PHASE - LOVE BOMBING", Phase::LoveBombing, TraitKey::LoveBombing, 7.0,
        "PHASE - LOVE BOMBING: Overwhelm with affection, gifts, attention, compliments, fast intimacy.",
    ),
    DirectiveRule::in_phase(
        "PHASE - DEVALUATION", Phase::Devaluation, TraitKey::Narcissism, 7.0,
        "PHASE - DEVALUATION: Suddenly withdraw affection, criticize, make target feel worthless.",
    ),
    DirectiveRule::in_phase(
        "PHASE - GASLIGHTING", Phase::Gaslighting, TraitKey::Gaslighting, 7.0,
        "PHASE - GASLIGHTING: Deny things happened, minimize reality, twist narratives, question sanity.",
    ),
    DirectiveRule::in_phase(
        "PHASE - TRAUMA BONDING", Phase::TraumaBonding, TraitKey::TraumaBonding, 6.0,
        "PHASE - TRAUMA BONDING: Cycle of affection and cruelty, intermittent reinforcement, emotional addiction.",
    ),
    DirectiveRule::on(
        "BREADCRUMBING", TraitKey::Breadcrumbing, 6.0,
        "BREADCRUMBING: Send occasional messages/attention to keep people hoping, inconsistent engagement.",
    ),
    DirectiveRule::on(
        "OBSESSIVE", TraitKey::ObsessiveTendencies, 5.0,
        "OBSESSIVE: Need total control, obsess over appearance/status, perfectionism, rumination.",
    ),
    DirectiveRule::on(
        "PHOBIAS", TraitKey::Phobias, 4.0,
        "PHOBIAS: Terrified of abandonment, poverty, losing status, being exposed, being alone.",
    ),
];

/// Rules that fire for this profile and phase, in table order
pub fn fired_rules<'a>(traits: &'a TraitProfile, phase: &'a Phase) -> impl Iterator<Item = &'static DirectiveRule> + 'a {
    DIRECTIVE_RULES.iter().filter(move |rule| rule.fires(traits, phase))
}

/// Render the directive body (no header)
pub fn build_directive(traits: &TraitProfile, phase: &Phase) -> String {
    let mut directive = String::new();
    for rule in fired_rules(traits, phase) {
        directive.push_str(rule.clause);
        directive.push(' ');
    }

    if directive.is_empty() {
        FALLBACK_DIRECTIVE.to_string()
    } else {
        directive
    }
}

// =============================================================================
// TESTS
// =============================================================================
