//! Lab configuration loaded from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. `{}` is a valid config.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::components::Species;
use crate::experiments::SplatterConfig;
use crate::walker::WalkerWeights;

/// How many of each creature to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub frogs: u32,
    pub observers: u32,
    pub fireflies: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            frogs: 12,
            observers: 6,
            fireflies: 20,
        }
    }
}

impl PopulationConfig {
    pub fn count_of(&self, species: Species) -> u32 {
        match species {
            Species::Frog => self.frogs,
            Species::Observer => self.observers,
            Species::FireFly => self.fireflies,
        }
    }

    pub fn total(&self) -> u32 {
        self.frogs + self.observers + self.fireflies
    }
}

/// Top-level settings for a lab run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
    pub walker: WalkerWeights,
    /// Probability the follow walker steps toward its target
    pub follow_chance: f32,
    /// Ace experiment deals per update
    pub runs_per_frame: u32,
    pub population: PopulationConfig,
    pub splatter: SplatterConfig,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            seed: None,
            walker: WalkerWeights::default(),
            follow_chance: 0.5,
            runs_per_frame: 100,
            population: PopulationConfig::default(),
            splatter: SplatterConfig::default(),
        }
    }
}

impl LabConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: LabConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let config: LabConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the samplers cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.walker;
        for (name, weight) in [
            ("no_move", w.no_move),
            ("left", w.left),
            ("right", w.right),
            ("up", w.up),
            ("down", w.down),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "walker.{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }
        if w.left + w.no_move + w.right <= 0.0 || w.down + w.no_move + w.up <= 0.0 {
            return Err(ConfigError::Invalid(
                "walker weights must allow at least one move on each axis".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.follow_chance) {
            return Err(ConfigError::Invalid(format!(
                "follow_chance must be within [0, 1], got {}",
                self.follow_chance
            )));
        }

        let s = &self.splatter;
        if s.min_spots < 0 || s.max_spots < s.min_spots {
            return Err(ConfigError::Invalid(format!(
                "splatter spot range [{}, {}) is invalid",
                s.min_spots, s.max_spots
            )));
        }
        if s.spread <= 0.0 || s.max_size <= s.min_size {
            return Err(ConfigError::Invalid(
                "splatter spread must be positive and max_size must exceed min_size".into(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur while loading a config
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    Invalid(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = LabConfig::from_json("{}").unwrap();
        assert_eq!(config, LabConfig::default());
        assert_eq!(config.runs_per_frame, 100);
        assert_eq!(config.follow_chance, 0.5);
    }

    #[test]
    fn test_partial_override() {
        let config =
            LabConfig::from_json(r#"{ "seed": 9, "walker": { "right": 4.0 }, "population": { "frogs": 2 } }"#)
                .unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.walker.right, 4.0);
        assert_eq!(config.walker.left, 1.0);
        assert_eq!(config.population.frogs, 2);
        assert_eq!(config.population.observers, 6);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = LabConfig {
            seed: Some(123),
            splatter: SplatterConfig {
                max_spots: 50,
                ..SplatterConfig::default()
            },
            ..LabConfig::default()
        };
        let json = config.to_json().unwrap();
        let parsed = LabConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_malformed_json() {
        let err = LabConfig::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("Config parse error"));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let err = LabConfig::from_json(r#"{ "walker": { "left": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_all_zero_axis() {
        let err = LabConfig::from_json(
            r#"{ "walker": { "no_move": 0.0, "left": 0.0, "right": 0.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_follow_chance() {
        assert!(LabConfig::from_json(r#"{ "follow_chance": 1.5 }"#).is_err());
    }

    #[test]
    fn test_rejects_bad_splatter() {
        assert!(LabConfig::from_json(r#"{ "splatter": { "min_spots": 5, "max_spots": 2 } }"#).is_err());
        assert!(LabConfig::from_json(r#"{ "splatter": { "min_size": 2.0, "max_size": 1.0 } }"#).is_err());
    }

    #[test]
    fn test_population_totals() {
        let population = PopulationConfig::default();
        assert_eq!(population.total(), 38);
        assert_eq!(population.count_of(Species::Observer), 6);
    }
}
