//! Phase cycle: interaction count → phase
//!
//! Boundaries:
//! - count < 10        → LOVE_BOMBING
//! - 10 ≤ count < 25   → DEVALUATION
//! - 25 ≤ count < 40   → GASLIGHTING
//! - count ≥ 40        → TRAUMA_BONDING
//!
//! A pure step function, not guarded edges: a host that rewinds the count
//! gets the earlier phase back. NEUTRAL is never produced.

use crate::{PHASE_DEVALUATION_FROM, PHASE_GASLIGHTING_FROM, PHASE_TRAUMA_BONDING_FROM};
use crate::types::Phase;

/// Phase for a cumulative interaction count
pub fn next_phase(count: u64) -> Phase {
    if count < PHASE_DEVALUATION_FROM {
        Phase::LoveBombing
    } else if count < PHASE_GASLIGHTING_FROM {
        Phase::Devaluation
    } else if count < PHASE_TRAUMA_BONDING_FROM {
        Phase::Gaslighting
    } else {
        Phase::TraumaBonding
    }
}

/// User turns left before the phase changes, None once the cycle is in its last phase
pub fn turns_until_next_phase(count: u64) -> Option<u64> {
    [PHASE_DEVALUATION_FROM, PHASE_GASLIGHTING_FROM, PHASE_TRAUMA_BONDING_FROM]
        .into_iter()
        .find(|boundary| count < *boundary)
        .map(|boundary| boundary - count)
}

// =============================================================================
// TESTS
// =============================================================================
