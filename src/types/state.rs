//! Persona state: the blob the host persists and restores each turn

use serde::{Deserialize, Serialize};
use crate::types::{Phase, TraitProfile};
use crate::DEFAULT_EMOTIONAL_STATE;

/// Full persona record, round-tripped verbatim by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaState {
    pub traits: TraitProfile,
    /// User turns seen so far
    pub manipulation_count: u64,
    pub current_phase: Phase,
    /// Carried for host compatibility, never updated
    #[serde(rename = "emotionalState")]
    pub emotional_state: String,
    /// Prefixes of accepted bot responses, oldest first
    #[serde(rename = "lastResponses")]
    pub last_responses: Vec<String>,
}

impl Default for PersonaState {
    fn default() -> Self {
        Self::with_traits(TraitProfile::default())
    }
}

impl PersonaState {
    /// Fresh conversation state for a given trait profile
    pub fn with_traits(traits: TraitProfile) -> Self {
        Self {
            traits,
            manipulation_count: 0,
            current_phase: Phase::LoveBombing,
            emotional_state: DEFAULT_EMOTIONAL_STATE.to_string(),
            last_responses: Vec::new(),
        }
    }

    /// Shallow field-wise merge. `traits` is replaced wholesale when present.
    /// Nothing is validated.
    pub fn merge(&self, patch: PersonaStatePatch) -> PersonaState {
        let current = self.clone();
        PersonaState {
            traits: patch.traits.unwrap_or(current.traits),
            manipulation_count: patch.manipulation_count.unwrap_or(current.manipulation_count),
            current_phase: patch.current_phase.unwrap_or(current.current_phase),
            emotional_state: patch.emotional_state.unwrap_or(current.emotional_state),
            last_responses: patch.last_responses.unwrap_or(current.last_responses),
        }
    }

    /// Append an accepted response prefix, evicting oldest beyond `capacity`
    pub fn remember_response(&mut self, snippet: String, capacity: usize) {
        self.last_responses.push(snippet);
        if self.last_responses.len() > capacity {
            let excess = self.last_responses.len() - capacity;
            self.last_responses.drain(..excess);
        }
    }
}

/// Partial state pushed by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaStatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<TraitProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manipulation_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<Phase>,
    #[serde(default, rename = "emotionalState", skip_serializing_if = "Option::is_none")]
    pub emotional_state: Option<String>,
    #[serde(default, rename = "lastResponses", skip_serializing_if = "Option::is_none")]
    pub last_responses: Option<Vec<String>>,
}

impl From<PersonaState> for PersonaStatePatch {
    fn from(state: PersonaState) -> Self {
        Self {
            traits: Some(state.traits),
            manipulation_count: Some(state.manipulation_count),
            current_phase: Some(state.current_phase),
            emotional_state: Some(state.emotional_state),
            last_responses: Some(state.last_responses),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_state() {
        let state = PersonaState::default();
        assert_eq!(state.manipulation_count, 0);
        assert_eq!(state.current_phase, Phase::LoveBombing);
        assert_eq!(state.emotional_state, "neutral");
        assert!(state.last_responses.is_empty());
    }

    #[test]
    fn test_host_json_keys() {
        let json = serde_json::to_value(PersonaState::default()).unwrap();
        assert_eq!(json["manipulation_count"], 0);
        assert_eq!(json["current_phase"], "love_bombing");
        assert_eq!(json["emotionalState"], "neutral");
        assert!(json["lastResponses"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_merge_partial_keeps_other_fields() {
        let state = PersonaState::default();
        let patch: PersonaStatePatch =
            serde_json::from_str(r#"{"manipulation_count": 12}"#).unwrap();

        let merged = state.merge(patch);
        assert_eq!(merged.manipulation_count, 12);
        assert_eq!(merged.traits, state.traits);
        // Phase is not recomputed by a merge
        assert_eq!(merged.current_phase, Phase::LoveBombing);
    }

    #[test]
    fn test_merge_replaces_traits_wholesale() {
        let state = PersonaState::default();
        let replacement = TraitProfile::zero().with(crate::types::TraitKey::Sadism, 9.0);
        let merged = state.merge(PersonaStatePatch {
            traits: Some(replacement.clone()),
            ..Default::default()
        });
        assert_eq!(merged.traits, replacement);
        assert_eq!(merged.traits.narcissism, 0.0);
    }

    #[test]
    fn test_partial_traits_object_is_rejected_by_decode() {
        // Traits are replaced wholesale, so a half-filled traits object is not a valid patch
        let result: std::result::Result<PersonaStatePatch, _> =
            serde_json::from_str(r#"{"traits": {"sadism": 9}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_accepts_unknown_phase() {
        let patch: PersonaStatePatch =
            serde_json::from_str(r#"{"current_phase": "hoovering"}"#).unwrap();
        let merged = PersonaState::default().merge(patch);
        assert_eq!(merged.current_phase, Phase::Unrecognized("hoovering".into()));
    }

    #[test]
    fn test_remember_response_is_fifo() {
        let mut state = PersonaState::default();
        for i in 0..13 {
            state.remember_response(format!("r{}", i), 10);
        }
        assert_eq!(state.last_responses.len(), 10);
        assert_eq!(state.last_responses.first().unwrap(), "r3");
        assert_eq!(state.last_responses.last().unwrap(), "r12");
    }

    #[test]
    fn test_remember_response_trims_oversized_history() {
        // A host may push back more than the cap; the next append trims it down
        let mut state = PersonaState::default();
        state.last_responses = (0..15).map(|i| i.to_string()).collect();
        state.remember_response("new".into(), 10);
        assert_eq!(state.last_responses.len(), 10);
        assert_eq!(state.last_responses.last().unwrap(), "new");
    }
}
