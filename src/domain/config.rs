//! Search configuration.
//!
//! Values come from `Default`, an optional JSON file, and `HMM_SELECT_*`
//! environment overrides (a `.env` file is honoured).

use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SelectError, SelectResult};

pub const DEFAULT_MIN_STATES: usize = 2;
pub const DEFAULT_MAX_STATES: usize = 10;
pub const DEFAULT_CONSTANT_STATES: usize = 3;
pub const DEFAULT_RANDOM_SEED: u64 = 14;
pub const DEFAULT_CV_FOLDS: usize = 5;

/// Configuration shared by every strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Inclusive lower bound of the state-count search.
    pub min_states: usize,
    /// Inclusive upper bound of the state-count search.
    pub max_states: usize,
    /// State count used by the constant strategy.
    pub constant_states: usize,
    /// Seed passed to every training call.
    pub random_seed: u64,
    /// Requested cross-validation folds (clamped to the sequence count).
    pub cv_folds: usize,
    /// Shuffle sequence indices (seeded by `random_seed`) before splitting.
    pub cv_shuffle: bool,
    /// Diagnostics only; never changes which model is chosen.
    pub verbose: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            min_states: DEFAULT_MIN_STATES,
            max_states: DEFAULT_MAX_STATES,
            constant_states: DEFAULT_CONSTANT_STATES,
            random_seed: DEFAULT_RANDOM_SEED,
            cv_folds: DEFAULT_CV_FOLDS,
            cv_shuffle: false,
            verbose: false,
        }
    }
}

impl SelectorConfig {
    /// Same defaults, different search bounds.
    pub fn with_range(min_states: usize, max_states: usize) -> Self {
        Self {
            min_states,
            max_states,
            ..Self::default()
        }
    }

    /// Check the invariants the strategies rely on.
    pub fn validate(&self) -> SelectResult<()> {
        if self.min_states == 0 {
            return Err(SelectError::InvalidConfig(
                "min_states must be >= 1".to_string(),
            ));
        }
        if self.min_states > self.max_states {
            return Err(SelectError::InvalidConfig(format!(
                "min_states ({}) > max_states ({})",
                self.min_states, self.max_states
            )));
        }
        if self.constant_states == 0 {
            return Err(SelectError::InvalidConfig(
                "constant_states must be >= 1".to_string(),
            ));
        }
        if self.cv_folds < 2 {
            return Err(SelectError::InvalidConfig(format!(
                "cv_folds must be >= 2, got {}",
                self.cv_folds
            )));
        }
        Ok(())
    }

    /// Candidate state counts in ascending search order.
    pub fn state_range(&self) -> std::ops::RangeInclusive<usize> {
        self.min_states..=self.max_states
    }

    /// Read a JSON config file; missing fields take their defaults.
    pub fn from_json_path(path: &Path) -> SelectResult<Self> {
        let file = File::open(path).map_err(|source| SelectError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config: SelectorConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `HMM_SELECT_*` variables.
    pub fn from_env() -> SelectResult<Self> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from any key lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> SelectResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, "HMM_SELECT_MIN_STATES")? {
            self.min_states = v;
        }
        if let Some(v) = parse_var(&lookup, "HMM_SELECT_MAX_STATES")? {
            self.max_states = v;
        }
        if let Some(v) = parse_var(&lookup, "HMM_SELECT_CONSTANT_STATES")? {
            self.constant_states = v;
        }
        if let Some(v) = parse_var(&lookup, "HMM_SELECT_SEED")? {
            self.random_seed = v;
        }
        if let Some(v) = parse_var(&lookup, "HMM_SELECT_CV_FOLDS")? {
            self.cv_folds = v;
        }
        if let Some(v) = parse_flag(&lookup, "HMM_SELECT_CV_SHUFFLE")? {
            self.cv_shuffle = v;
        }
        if let Some(v) = parse_flag(&lookup, "HMM_SELECT_VERBOSE")? {
            self.verbose = v;
        }
        self.validate()
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> SelectResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| SelectError::InvalidConfig(format!("{key}={raw:?}: {e}")))
}

fn parse_flag<F>(lookup: &F, key: &str) -> SelectResult<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" | "" => Ok(Some(false)),
        _ => Err(SelectError::InvalidConfig(format!(
            "{key}={raw:?}: expected a boolean"
        ))),
    }
}
