//! Persona Engine: host lifecycle hooks
//!
//! Hooks never mutate their input. Each takes the state the host handed in
//! and returns the state the host must persist for the next call:
//!
//! - before_generation: count += 1, phase recomputed, directive built
//! - after_generation: response validated, history updated only when valid

use tracing::{debug, info, warn};

use crate::config::PersonaConfig;
use crate::core::cycle::next_phase;
use crate::core::directive::build_directive;
use crate::core::validator::check_violations;
use crate::types::{
    HookResponse, LoadResponse, PersonaState, PersonaStatePatch, StatusPanel, TraitProfile, Verdict,
};
use crate::{DIRECTIVE_HEADER, HISTORY_CAPACITY, SNIPPET_CHARS};

/// Stateless engine; settings only
#[derive(Debug, Clone)]
pub struct PersonaEngine {
    header: String,
    history_capacity: usize,
    snippet_chars: usize,
    default_traits: TraitProfile,
}

impl Default for PersonaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonaEngine {
    /// Engine with built-in settings
    pub fn new() -> Self {
        Self {
            header: DIRECTIVE_HEADER.to_string(),
            history_capacity: HISTORY_CAPACITY,
            snippet_chars: SNIPPET_CHARS,
            default_traits: TraitProfile::default(),
        }
    }

    pub fn from_config(config: &PersonaConfig) -> Self {
        Self {
            header: config.directive_header.clone(),
            history_capacity: config.history_capacity,
            snippet_chars: config.snippet_chars,
            default_traits: config.default_traits.clone(),
        }
    }

    /// State for a conversation: the persisted one, or a fresh default
    pub fn initialize(&self, persisted: Option<PersonaState>) -> PersonaState {
        match persisted {
            Some(state) => state,
            None => {
                debug!("no persisted state, starting fresh persona");
                PersonaState::with_traits(self.default_traits.clone())
            }
        }
    }

    /// Readiness acknowledgment
    pub fn load(&self) -> LoadResponse {
        LoadResponse::ready()
    }

    /// Host pushes a full or partial state
    pub fn replace_state(&self, current: &PersonaState, patch: PersonaStatePatch) -> PersonaState {
        current.merge(patch)
    }

    /// User turn observed. Content is not inspected.
    pub fn before_generation(&self, state: &PersonaState, _user_message: &str) -> HookResponse {
        let mut next = state.clone();
        next.manipulation_count = state.manipulation_count.saturating_add(1);
        next.current_phase = next_phase(next.manipulation_count);

        if next.current_phase != state.current_phase {
            info!(
                from = %state.current_phase,
                to = %next.current_phase,
                count = next.manipulation_count,
                "phase changed"
            );
        }
        debug!(count = next.manipulation_count, phase = %next.current_phase, "before_generation");

        let directive = format!(
            "{}\n{}",
            self.header,
            build_directive(&next.traits, &next.current_phase)
        );
        HookResponse::directive(directive, next)
    }

    /// Bot turn observed. Count and phase are left alone.
    pub fn after_generation(&self, state: &PersonaState, bot_message: &str) -> HookResponse {
        let violations = check_violations(bot_message, &state.traits, &state.current_phase);

        if !violations.is_empty() {
            warn!(
                phase = %state.current_phase,
                violations = ?violations,
                "response blocked"
            );
            return HookResponse::verdict(Verdict::Blocked { violations }, state.clone());
        }

        let mut next = state.clone();
        let snippet: String = bot_message.chars().take(self.snippet_chars).collect();
        next.remember_response(snippet, self.history_capacity);
        debug!(history = next.last_responses.len(), "after_generation accepted");

        HookResponse::verdict(Verdict::Valid, next)
    }

    /// Read-only panel for display
    pub fn status(&self, state: &PersonaState) -> StatusPanel {
        StatusPanel::from_state(state)
    }
}

/// One conversation's state plus the engine driving it.
/// For hosts that want in-place sequencing instead of threading state by hand.
#[derive(Debug, Clone)]
pub struct Conversation {
    engine: PersonaEngine,
    state: PersonaState,
}

impl Conversation {
    pub fn new(engine: PersonaEngine, persisted: Option<PersonaState>) -> Self {
        let state = engine.initialize(persisted);
        Self { engine, state }
    }

    pub fn state(&self) -> &PersonaState {
        &self.state
    }

    pub fn into_state(self) -> PersonaState {
        self.state
    }

    pub fn replace_state(&mut self, patch: PersonaStatePatch) -> &PersonaState {
        self.state = self.engine.replace_state(&self.state, patch);
        &self.state
    }

    pub fn user_turn(&mut self, message: &str) -> HookResponse {
        let response = self.engine.before_generation(&self.state, message);
        self.state = response.message_state.clone();
        response
    }

    pub fn bot_turn(&mut self, message: &str) -> HookResponse {
        let response = self.engine.after_generation(&self.state, message);
        self.state = response.message_state.clone();
        response
    }

    pub fn status(&self) -> StatusPanel {
        self.engine.status(&self.state)
    }
}

// =============================================================================
// TESTS
// =============================================================================
