//! Core modules for the persona engine

pub mod cycle;
pub mod directive;
pub mod validator;
pub mod engine;
pub mod transcript;
pub mod api;

pub use cycle::{next_phase, turns_until_next_phase};
pub use directive::{build_directive, fired_rules, DirectiveRule, DIRECTIVE_RULES};
pub use validator::{check_violations, ViolationRule, VIOLATION_RULES};
pub use engine::{Conversation, PersonaEngine};
pub use transcript::{parse_line, TranscriptLine};
pub use api::{create_router, run_server};
