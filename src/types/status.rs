//! Read-only status panel: every trait score, phase and interaction count

use colored::Colorize;
use serde::{Deserialize, Serialize};
use crate::types::{Phase, PersonaState, TraitKey};

/// One displayed score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitReading {
    pub label: String,
    pub value: f64,
}

/// A titled group of scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitGroup {
    pub title: String,
    pub traits: Vec<TraitReading>,
}

/// Snapshot of a persona for display outside the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPanel {
    pub groups: Vec<TraitGroup>,
    pub current_phase: Phase,
    pub interaction_count: u64,
}

const GROUPS: &[(&str, &[TraitKey])] = &[
    (
        "Dark Triad + Sadism",
        &[
            TraitKey::Narcissism,
            TraitKey::Machiavellianism,
            TraitKey::Psychopathy,
            TraitKey::Sadism,
        ],
    ),
    (
        "Trauma & Disorders",
        &[
            TraitKey::Ptsd,
            TraitKey::Ocd,
            TraitKey::Anxiety,
            TraitKey::Adhd,
            TraitKey::ComplexPtsd,
        ],
    ),
    (
        "Manipulation Tactics",
        &[
            TraitKey::Gaslighting,
            TraitKey::LoveBombing,
            TraitKey::Breadcrumbing,
            TraitKey::TraumaBonding,
            TraitKey::ObsessiveTendencies,
        ],
    ),
    (
        "Other",
        &[TraitKey::Phobias, TraitKey::DarkTetradFactor],
    ),
];

impl StatusPanel {
    pub fn from_state(state: &PersonaState) -> Self {
        let groups = GROUPS
            .iter()
            .map(|(title, keys)| TraitGroup {
                title: title.to_string(),
                traits: keys
                    .iter()
                    .map(|key| TraitReading {
                        label: key.label().to_string(),
                        value: state.traits.get(*key),
                    })
                    .collect(),
            })
            .collect();

        Self {
            groups,
            current_phase: state.current_phase.clone(),
            interaction_count: state.manipulation_count,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "🔥 DARK TETRAD + TRAUMA ENFORCER".bold()));
        for group in &self.groups {
            out.push_str(&format!("\n{}\n", format!("{}:", group.title).underline()));
            for reading in &group.traits {
                out.push_str(&format!(
                    "  - {}: {}/10\n",
                    reading.label,
                    reading.value.to_string().bold()
                ));
            }
        }
        let phase_line = format!(
            "{} Current Phase: {}",
            self.current_phase.emoji(),
            self.current_phase
        );
        out.push_str(&format!("\n{}\n", phase_line.color(self.current_phase.color()).bold()));
        out.push_str(&format!("  Interaction #{}\n", self.interaction_count));
        out
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let mut lines = Vec::new();
        for group in &self.groups {
            lines.push(format!("[{}]", group.title));
            for reading in &group.traits {
                lines.push(format!("{}={}", reading.label, reading.value));
            }
        }
        lines.push(format!("phase={}", self.current_phase));
        lines.push(format!("interaction={}", self.interaction_count));
        lines.join("\n")
    }

    /// Total number of scores shown
    pub fn trait_count(&self) -> usize {
        self.groups.iter().map(|g| g.traits.len()).sum()
    }
}
