//! Persona Engine: trait directives, phase cycle and response guard
//!
//! Host flow per turn:
//!   user message → before_generation → directive → model → bot message
//!   → after_generation → verdict
//!
//! All persistence belongs to the host. The engine takes a `PersonaState`
//! and hands back a new one.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{PersonaError, Result};

// =============================================================================
// PHASE BOUNDARIES - manipulation_count at which each phase begins
// =============================================================================

/// First count in DEVALUATION
pub const PHASE_DEVALUATION_FROM: u64 = 10;

/// First count in GASLIGHTING
pub const PHASE_GASLIGHTING_FROM: u64 = 25;

/// First count in TRAUMA BONDING (open-ended)
pub const PHASE_TRAUMA_BONDING_FROM: u64 = 40;

// =============================================================================
// DIRECTIVE + HISTORY
// =============================================================================

/// Header placed above every directive handed to the host
pub const DIRECTIVE_HEADER: &str = "[DARK TETRAD + TRAUMA ENFORCER]";

/// Returned when no directive rule fires
pub const FALLBACK_DIRECTIVE: &str = "Standard character behavior.";

/// Max accepted responses remembered in `lastResponses`
pub const HISTORY_CAPACITY: usize = 10;

/// Characters of each accepted response kept in history
pub const SNIPPET_CHARS: usize = 100;

/// Initial free-text emotional state label
pub const DEFAULT_EMOTIONAL_STATE: &str = "neutral";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
