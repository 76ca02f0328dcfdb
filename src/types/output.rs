//! Hook responses handed back to the host

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{PersonaState, Violation, join_labels};

/// Outcome of checking a bot response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Response kept, history updated
    Valid,
    /// Response contradicts the profile, history untouched
    Blocked { violations: Vec<Violation> },
}

impl Verdict {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Verdict::Blocked { .. })
    }

    /// Violations behind a block (empty when valid)
    pub fn violations(&self) -> &[Violation] {
        match self {
            Verdict::Valid => &[],
            Verdict::Blocked { violations } => violations.as_slice(),
        }
    }
}

/// What a lifecycle hook returns to the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookResponse {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Steering text for the next generation (pre-generation only)
    pub stage_directions: Option<String>,
    /// State the host must persist and hand back next turn
    pub message_state: PersonaState,
    /// Always None: the engine never rewrites messages
    pub modified_message: Option<String>,
    /// Human-readable status line
    pub system_message: String,
    /// Validation result (post-generation only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    /// Always None under normal input
    pub error: Option<String>,
}

impl HookResponse {
    /// Pre-generation response: directive and advanced state
    pub fn directive(directive: String, state: PersonaState) -> Self {
        let system_message = format!(
            "🧠 Phase: {} | Interaction #{}",
            state.current_phase, state.manipulation_count
        );
        Self {
            timestamp: Utc::now(),
            stage_directions: Some(directive),
            message_state: state,
            modified_message: None,
            system_message,
            verdict: None,
            error: None,
        }
    }

    /// Post-generation response
    pub fn verdict(verdict: Verdict, state: PersonaState) -> Self {
        let system_message = match &verdict {
            Verdict::Blocked { violations } => format!("⚠️ Blocked: {}", join_labels(violations)),
            Verdict::Valid => format!("✓ Valid | Phase: {}", state.current_phase),
        };
        Self {
            timestamp: Utc::now(),
            stage_directions: None,
            message_state: state,
            modified_message: None,
            system_message,
            verdict: Some(verdict),
            error: None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.verdict.as_ref().is_some_and(Verdict::is_blocked)
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        match &self.verdict {
            None => format!(
                "phase={} | count={}",
                self.message_state.current_phase, self.message_state.manipulation_count
            ),
            Some(Verdict::Valid) => format!(
                "verdict=VALID | phase={} | history={}",
                self.message_state.current_phase,
                self.message_state.last_responses.len()
            ),
            Some(Verdict::Blocked { violations }) => format!(
                "verdict=BLOCKED | violations={}",
                join_labels(violations)
            ),
        }
    }
}

/// Readiness acknowledgment returned by `load`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResponse {
    pub success: bool,
    pub error: Option<String>,
    pub init_state: Option<serde_json::Value>,
    pub chat_state: Option<serde_json::Value>,
}

impl LoadResponse {
    pub fn ready() -> Self {
        Self {
            success: true,
            error: None,
            init_state: None,
            chat_state: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_status_line() {
        let mut state = PersonaState::default();
        state.manipulation_count = 3;
        let resp = HookResponse::directive("x".into(), state);
        assert_eq!(resp.system_message, "🧠 Phase: love_bombing | Interaction #3");
        assert!(resp.verdict.is_none());
        assert!(!resp.is_blocked());
    }

    #[test]
    fn test_blocked_status_line_joins_labels() {
        let verdict = Verdict::Blocked {
            violations: vec![Violation::PtsdContradiction, Violation::SadismContradictsNature],
        };
        let resp = HookResponse::verdict(verdict, PersonaState::default());
        assert_eq!(
            resp.system_message,
            "⚠️ Blocked: PTSD Contradiction, Sadism: Contradicts nature"
        );
        assert!(resp.stage_directions.is_none());
        assert!(resp.is_blocked());
    }

    #[test]
    fn test_valid_status_line() {
        let resp = HookResponse::verdict(Verdict::Valid, PersonaState::default());
        assert_eq!(resp.system_message, "✓ Valid | Phase: love_bombing");
        assert_eq!(resp.to_parseable_string(), "verdict=VALID | phase=love_bombing | history=0");
    }

    #[test]
    fn test_verdict_json_shape() {
        let json = serde_json::to_value(Verdict::Blocked {
            violations: vec![Violation::GaslightingTooObvious],
        })
        .unwrap();
        assert_eq!(json["status"], "BLOCKED");
        assert_eq!(json["violations"][0], "Gaslighting: Too obvious");
    }
}
