//! What a selection run produced: the winning model plus diagnostics.

use serde::{Deserialize, Serialize};

use crate::domain::{CandidateScore, Rejection, SelectorKind};

/// Output of one strategy for one label.
#[derive(Debug, Clone)]
pub struct SelectionReport<M> {
    pub label: String,
    pub kind: SelectorKind,
    /// The chosen model, or `None` when no candidate survived.
    pub best: Option<M>,
    pub best_states: Option<usize>,
    /// Criterion value of the winner (`None` for the constant strategy and fallbacks).
    pub best_score: Option<f64>,
    /// Candidates that trained and scored, in search order.
    pub scored: Vec<CandidateScore>,
    /// Candidates that were disqualified, and why.
    pub rejected: Vec<Rejection>,
}

impl<M> SelectionReport<M> {
    pub fn new(label: &str, kind: SelectorKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            best: None,
            best_states: None,
            best_score: None,
            scored: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub(crate) fn set_best(&mut self, num_states: usize, score: Option<f64>, model: M) {
        self.best = Some(model);
        self.best_states = Some(num_states);
        self.best_score = score;
    }

    pub(crate) fn reject(&mut self, num_states: Option<usize>, reason: impl ToString) {
        self.rejected.push(Rejection {
            num_states,
            reason: reason.to_string(),
        });
    }

    /// Keep the diagnostics but drop the model slot, for a different model type.
    pub(crate) fn without_model<N>(self) -> SelectionReport<N> {
        SelectionReport {
            label: self.label,
            kind: self.kind,
            best: None,
            best_states: None,
            best_score: None,
            scored: self.scored,
            rejected: self.rejected,
        }
    }

    /// The chosen model, discarding diagnostics.
    pub fn into_best(self) -> Option<M> {
        self.best
    }

    /// Serializable diagnostics without the model.
    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary {
            label: self.label.clone(),
            kind: self.kind,
            best_states: self.best_states,
            best_score: self.best_score,
            scored: self.scored.clone(),
            rejected: self.rejected.clone(),
        }
    }
}

/// Model-free view of a `SelectionReport`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub label: String,
    pub kind: SelectorKind,
    pub best_states: Option<usize>,
    pub best_score: Option<f64>,
    pub scored: Vec<CandidateScore>,
    pub rejected: Vec<Rejection>,
}
