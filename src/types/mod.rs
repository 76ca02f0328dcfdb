//! Core types for the persona engine

mod traits;
mod phase;
mod state;
mod violation;
mod output;
mod status;

pub use traits::{TraitProfile, TraitKey};
pub use phase::Phase;
pub use state::{PersonaState, PersonaStatePatch};
pub use violation::{Violation, join_labels};
pub use output::{HookResponse, Verdict, LoadResponse};
pub use status::{StatusPanel, TraitGroup, TraitReading};
