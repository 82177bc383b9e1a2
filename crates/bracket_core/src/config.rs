//! Reference-data locations and simulation settings.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::engine::resolver::Strategy;
use crate::error::{BracketError, Result};

/// Env var overriding the strength table path.
pub const STRENGTHS_PATH_ENV: &str = "BRACKET_STRENGTHS_PATH";
/// Env var overriding the historical seed table path.
pub const HISTORY_PATH_ENV: &str = "BRACKET_HISTORY_PATH";
/// Env var pointing at a field CSV; unset means the embedded field.
pub const FIELD_PATH_ENV: &str = "BRACKET_FIELD_PATH";

pub const DEFAULT_STRENGTHS_REL_PATH: &str = "data/team_strengths_2025.csv";
pub const DEFAULT_HISTORY_REL_PATH: &str = "data/past_tournament_rounds.csv";

/// Blend weight used when a request does not name one.
pub const DEFAULT_WEIGHT: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    pub strengths: PathBuf,
    pub history: PathBuf,
    #[serde(default)]
    pub field: Option<PathBuf>,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            strengths: PathBuf::from(DEFAULT_STRENGTHS_REL_PATH),
            history: PathBuf::from(DEFAULT_HISTORY_REL_PATH),
            field: None,
        }
    }
}

impl DataPaths {
    /// Resolve paths from the environment, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            strengths: env_path(STRENGTHS_PATH_ENV).unwrap_or(defaults.strengths),
            history: env_path(HISTORY_PATH_ENV).unwrap_or(defaults.history),
            field: env_path(FIELD_PATH_ENV),
        }
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

/// Settings for one autofill run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub strategy: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Fixed RNG seed; `None` draws one from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl SimConfig {
    pub fn new(strategy: impl Into<String>) -> Self {
        Self { strategy: strategy.into(), weight: DEFAULT_WEIGHT, seed: None }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the weight and turn the selector into a [`Strategy`].
    pub fn validate(&self) -> Result<Strategy> {
        if !(0.0..=1.0).contains(&self.weight) {
            return Err(BracketError::InvalidWeight(self.weight));
        }
        Strategy::parse(&self.strategy, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_config_defaults_and_validation() {
        let config = SimConfig::from_json(r#"{"strategy": "simulate"}"#).unwrap();
        assert_eq!(config.weight, DEFAULT_WEIGHT);
        assert_eq!(config.seed, None);
        assert_eq!(config.validate().unwrap(), Strategy::Blended { weight: 0.25 });

        let bad_weight = SimConfig { weight: 1.5, ..SimConfig::new("simulate") };
        assert!(matches!(bad_weight.validate(), Err(BracketError::InvalidWeight(_))));

        let bad_strategy = SimConfig::new("astrology");
        let err = bad_strategy.validate().unwrap_err();
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_default_paths() {
        let paths = DataPaths::default();
        assert_eq!(paths.strengths, PathBuf::from(DEFAULT_STRENGTHS_REL_PATH));
        assert!(paths.field.is_none());
    }
}
