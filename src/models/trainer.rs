//! Traits a sequence-model backend implements to be searched over.

use crate::domain::StackedSequences;
use crate::error::{ScoringFailure, TrainingFailure};

/// A fitted model that can evaluate held-out data.
pub trait SequenceModel {
    /// Hidden state count the model was trained with.
    fn num_states(&self) -> usize;

    /// Total log-likelihood of `data` under the model.
    ///
    /// Fails when the matrix is incompatible with the learned dimensionality or
    /// the likelihood is numerically degenerate.
    fn score(&self, data: &StackedSequences) -> Result<f64, ScoringFailure>;
}

/// Fits a fresh model for a given state count.
///
/// `Sync` because candidates are evaluated on the rayon pool; the trainer is
/// shared by reference and must not rely on call order.
pub trait Trainer: Sync {
    type Model: SequenceModel + Send;

    /// Fit a model with `num_states` hidden states to `data`.
    ///
    /// The same `seed` is passed for every candidate of a search so repeated
    /// runs on identical input are reproducible.
    fn train(
        &self,
        data: &StackedSequences,
        num_states: usize,
        seed: u64,
    ) -> Result<Self::Model, TrainingFailure>;
}

impl<T: Trainer + ?Sized> Trainer for &T {
    type Model = T::Model;

    fn train(
        &self,
        data: &StackedSequences,
        num_states: usize,
        seed: u64,
    ) -> Result<Self::Model, TrainingFailure> {
        (**self).train(data, num_states, seed)
    }
}
