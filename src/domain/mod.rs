//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - observation data (`ObservationSequence`, `StackedSequences`, `Corpus`)
//! - search configuration (`SelectorConfig`)
//! - selection vocabulary and diagnostics (`SelectorKind`, `CandidateScore`, `Rejection`)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
