//! Scoring constants for the CTF points economy.
//!
//! Every field has a serde default so a settings file only needs to list
//! the values it overrides.

use serde::{Deserialize, Serialize};

/// Tunable timing windows and bonus values used by the scoring engine.
///
/// Durations are game-clock seconds; bonuses are `ctf-points`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// How long a quad frag keeps kill credit attributed to its owner
    pub quad_duration: f32,
    /// Minimum carry time before fragging the carrier earns a bonus
    pub carrier_frag_timeout: f32,
    pub carrier_frag_bonus: i32,
    pub carrier_defend_bonus: i32,
    pub carrier_danger_defend_bonus: i32,
    pub flag_defend_bonus: i32,
    /// Awarded to the player who captures
    pub capture_carrier_bonus: i32,
    /// Awarded to each teammate of the capturing player
    pub capture_team_bonus: i32,
    pub flag_return_bonus: i32,
    pub return_assist_bonus: i32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            quad_duration: 30.0,
            carrier_frag_timeout: 2.0,
            carrier_frag_bonus: 2,
            carrier_defend_bonus: 1,
            carrier_danger_defend_bonus: 2,
            flag_defend_bonus: 1,
            capture_carrier_bonus: 15,
            capture_team_bonus: 10,
            flag_return_bonus: 1,
            return_assist_bonus: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ScoringSettings::default();
        assert_eq!(settings.quad_duration, 30.0);
        assert_eq!(settings.carrier_frag_timeout, 2.0);
        assert_eq!(settings.carrier_frag_bonus, 2);
        assert_eq!(settings.capture_carrier_bonus, 15);
        assert_eq!(settings.capture_team_bonus, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml = r#"
quad_duration = 25.0
capture_team_bonus = 5
"#;
        let settings: ScoringSettings = toml::from_str(toml).unwrap();
        assert_eq!(settings.quad_duration, 25.0);
        assert_eq!(settings.capture_team_bonus, 5);
        assert_eq!(settings.carrier_frag_bonus, 2);
        assert_eq!(settings.flag_return_bonus, 1);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let settings: ScoringSettings = toml::from_str("").unwrap();
        assert_eq!(settings, ScoringSettings::default());
    }
}
