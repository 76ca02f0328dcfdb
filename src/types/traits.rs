//! Trait profile: sixteen persona scores
//!
//! Scores are conventionally 0-10 but never clamped. Whatever the host
//! pushes is compared as-is.

use serde::{Deserialize, Serialize};

/// Fixed set of persona trait scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile {
    // Dark tetrad
    pub narcissism: f64,
    pub machiavellianism: f64,
    pub psychopathy: f64,
    pub sadism: f64,

    // Clinical / behavioral
    pub ptsd: f64,
    pub ocd: f64,
    pub anxiety: f64,
    pub adhd: f64,

    // Manipulation tactics
    pub gaslighting: f64,
    pub love_bombing: f64,
    pub breadcrumbing: f64,
    pub trauma_bonding: f64,
    pub obsessive_tendencies: f64,

    pub phobias: f64,

    /// Complex PTSD. Stored under the key hosts already persist.
    #[serde(rename = "cpstd")]
    pub complex_ptsd: f64,

    /// Display-only aggregate, never derived from the tetrad scores
    pub dark_tetrad_factor: f64,
}

impl Default for TraitProfile {
    fn default() -> Self {
        Self {
            narcissism: 8.0,
            machiavellianism: 7.0,
            psychopathy: 5.0,
            sadism: 3.0,
            ptsd: 5.0,
            ocd: 4.0,
            anxiety: 6.0,
            adhd: 4.0,
            gaslighting: 7.0,
            love_bombing: 8.0,
            breadcrumbing: 6.0,
            trauma_bonding: 6.0,
            obsessive_tendencies: 5.0,
            phobias: 4.0,
            complex_ptsd: 5.0,
            dark_tetrad_factor: 6.0,
        }
    }
}

impl TraitProfile {
    /// Profile with every score at zero
    pub fn zero() -> Self {
        Self::uniform(0.0)
    }

    /// Profile with every score set to `value`
    pub fn uniform(value: f64) -> Self {
        Self {
            narcissism: value,
            machiavellianism: value,
            psychopathy: value,
            sadism: value,
            ptsd: value,
            ocd: value,
            anxiety: value,
            adhd: value,
            gaslighting: value,
            love_bombing: value,
            breadcrumbing: value,
            trauma_bonding: value,
            obsessive_tendencies: value,
            phobias: value,
            complex_ptsd: value,
            dark_tetrad_factor: value,
        }
    }

    /// Read one score by key
    pub fn get(&self, key: TraitKey) -> f64 {
        match key {
            TraitKey::Narcissism => self.narcissism,
            TraitKey::Machiavellianism => self.machiavellianism,
            TraitKey::Psychopathy => self.psychopathy,
            TraitKey::Sadism => self.sadism,
            TraitKey::Ptsd => self.ptsd,
            TraitKey::Ocd => self.ocd,
            TraitKey::Anxiety => self.anxiety,
            TraitKey::Adhd => self.adhd,
            TraitKey::Gaslighting => self.gaslighting,
            TraitKey::LoveBombing => self.love_bombing,
            TraitKey::Breadcrumbing => self.breadcrumbing,
            TraitKey::TraumaBonding => self.trauma_bonding,
            TraitKey::ObsessiveTendencies => self.obsessive_tendencies,
            TraitKey::Phobias => self.phobias,
            TraitKey::ComplexPtsd => self.complex_ptsd,
            TraitKey::DarkTetradFactor => self.dark_tetrad_factor,
        }
    }

    /// Builder-style override of one score
    pub fn with(mut self, key: TraitKey, value: f64) -> Self {
        let slot = match key {
            TraitKey::Narcissism => &mut self.narcissism,
            TraitKey::Machiavellianism => &mut self.machiavellianism,
            TraitKey::Psychopathy => &mut self.psychopathy,
            TraitKey::Sadism => &mut self.sadism,
            TraitKey::Ptsd => &mut self.ptsd,
            TraitKey::Ocd => &mut self.ocd,
            TraitKey::Anxiety => &mut self.anxiety,
            TraitKey::Adhd => &mut self.adhd,
            TraitKey::Gaslighting => &mut self.gaslighting,
            TraitKey::LoveBombing => &mut self.love_bombing,
            TraitKey::Breadcrumbing => &mut self.breadcrumbing,
            TraitKey::TraumaBonding => &mut self.trauma_bonding,
            TraitKey::ObsessiveTendencies => &mut self.obsessive_tendencies,
            TraitKey::Phobias => &mut self.phobias,
            TraitKey::ComplexPtsd => &mut self.complex_ptsd,
            TraitKey::DarkTetradFactor => &mut self.dark_tetrad_factor,
        };
        *slot = value;
        self
    }
}

/// Names one field of a `TraitProfile`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraitKey {
    Narcissism,
    Machiavellianism,
    Psychopathy,
    Sadism,
    Ptsd,
    Ocd,
    Anxiety,
    Adhd,
    Gaslighting,
    LoveBombing,
    Breadcrumbing,
    TraumaBonding,
    ObsessiveTendencies,
    Phobias,
    ComplexPtsd,
    DarkTetradFactor,
}

impl TraitKey {
    /// Every key, in status panel order
    pub const ALL: [TraitKey; 16] = [
        TraitKey::Narcissism,
        TraitKey::Machiavellianism,
        TraitKey::Psychopathy,
        TraitKey::Sadism,
        TraitKey::Ptsd,
        TraitKey::Ocd,
        TraitKey::Anxiety,
        TraitKey::Adhd,
        TraitKey::ComplexPtsd,
        TraitKey::Gaslighting,
        TraitKey::LoveBombing,
        TraitKey::Breadcrumbing,
        TraitKey::TraumaBonding,
        TraitKey::ObsessiveTendencies,
        TraitKey::Phobias,
        TraitKey::DarkTetradFactor,
    ];

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            TraitKey::Narcissism => "Narcissism",
            TraitKey::Machiavellianism => "Machiavellianism",
            TraitKey::Psychopathy => "Psychopathy",
            TraitKey::Sadism => "Sadism",
            TraitKey::Ptsd => "PTSD",
            TraitKey::Ocd => "OCD",
            TraitKey::Anxiety => "Anxiety",
            TraitKey::Adhd => "ADHD",
            TraitKey::Gaslighting => "Gaslighting",
            TraitKey::LoveBombing => "Love Bombing",
            TraitKey::Breadcrumbing => "Breadcrumbing",
            TraitKey::TraumaBonding => "Trauma Bonding",
            TraitKey::ObsessiveTendencies => "Obsessive Tendencies",
            TraitKey::Phobias => "Phobias",
            TraitKey::ComplexPtsd => "Complex PTSD",
            TraitKey::DarkTetradFactor => "Dark Tetrad Factor",
        }
    }
}

impl std::fmt::Display for TraitKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = TraitProfile::default();
        assert_eq!(t.narcissism, 8.0);
        assert_eq!(t.sadism, 3.0);
        assert_eq!(t.adhd, 4.0);
        assert_eq!(t.complex_ptsd, 5.0);
        assert_eq!(t.dark_tetrad_factor, 6.0);
    }

    #[test]
    fn test_get_and_with_cover_every_key() {
        let mut profile = TraitProfile::zero();
        for (i, key) in TraitKey::ALL.iter().enumerate() {
            profile = profile.with(*key, i as f64 + 1.0);
        }
        for (i, key) in TraitKey::ALL.iter().enumerate() {
            assert_eq!(profile.get(*key), i as f64 + 1.0, "{}", key);
        }
    }

    #[test]
    fn test_complex_ptsd_uses_host_key() {
        let json = serde_json::to_value(TraitProfile::default()).unwrap();
        assert_eq!(json["cpstd"], 5.0);
        assert!(json.get("complex_ptsd").is_none());
    }

    #[test]
    fn test_out_of_range_values_survive() {
        let json = serde_json::to_string(&TraitProfile::uniform(42.5)).unwrap();
        let back: TraitProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sadism, 42.5);
    }
}
