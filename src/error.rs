//! Error types.
//!
//! Two families live here:
//!
//! - failures reported by the trainer boundary (`TrainingFailure`, `ScoringFailure`)
//!   and their per-candidate union `CandidateError`; these never escape a search
//! - `SelectError`, for caller mistakes detected before any search starts

use thiserror::Error;

/// A candidate model could not be fit for the requested state count.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("training failed with {num_states} states: {reason}")]
pub struct TrainingFailure {
    pub num_states: usize,
    pub reason: String,
}

impl TrainingFailure {
    pub fn new(num_states: usize, reason: impl Into<String>) -> Self {
        Self {
            num_states,
            reason: reason.into(),
        }
    }
}

/// A fitted model could not evaluate a matrix.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("scoring failed: {reason}")]
pub struct ScoringFailure {
    pub reason: String,
}

impl ScoringFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Why a single candidate (or CV fold) was disqualified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CandidateError {
    #[error(transparent)]
    Training(#[from] TrainingFailure),

    #[error(transparent)]
    Scoring(#[from] ScoringFailure),

    #[error("criterion is not finite: {0}")]
    NonFiniteScore(f64),

    #[error("no cross-validation fold produced a usable score")]
    NoUsableFolds,

    #[error("needs at least {required} labels in the corpus, found {found}")]
    TooFewLabels { required: usize, found: usize },
}

/// Errors visible to the caller of this crate.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("unknown label '{0}'")]
    UnknownLabel(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid sequence data: {0}")]
    InvalidData(String),

    #[error("failed to read config '{path}': {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),
}

pub type SelectResult<T> = Result<T, SelectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_error_wraps_trainer_failures() {
        let err: CandidateError = TrainingFailure::new(4, "singular covariance").into();
        assert_eq!(
            err.to_string(),
            "training failed with 4 states: singular covariance"
        );

        let err: CandidateError = ScoringFailure::new("dimension mismatch").into();
        assert_eq!(err.to_string(), "scoring failed: dimension mismatch");
    }
}
