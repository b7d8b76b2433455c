//! `hmm-select` library crate.
//!
//! Chooses the hidden state count of a per-label sequence model (e.g. one HMM
//! per sign-language word) with one of four strategies:
//!
//! - constant: a fixed state count, no search
//! - BIC: lowest `-2 logL + p ln N`
//! - DIC: highest `logL - mean(logL of the other labels)`
//! - CV: highest mean held-out log-likelihood over k folds
//!
//! The sequence model is not implemented here; callers plug one in through
//! [`models::Trainer`] and [`models::SequenceModel`].

pub mod domain;
pub mod error;
pub mod math;
pub mod models;
pub mod pipeline;
pub mod select;

pub use domain::{Corpus, ObservationSequence, SelectorConfig, SelectorKind, StackedSequences};
pub use error::{CandidateError, ScoringFailure, SelectError, TrainingFailure};
pub use models::{SequenceModel, Trainer};
pub use pipeline::{CorpusSelection, select_all};
pub use select::{ModelSelectionContext, SelectionReport, SelectionStrategy, select, select_with_report};
