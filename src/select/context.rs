//! Read-only state shared by every strategy during one `select()` call.

use tracing::{debug, info, warn};

use crate::domain::{Corpus, ObservationSequence, SelectorConfig, StackedSequences};
use crate::error::{CandidateError, SelectError, SelectResult, TrainingFailure};
use crate::models::Trainer;

/// Everything a strategy may read: the target label's data, the rest of the
/// corpus, the configuration and the trainer.
#[derive(Debug)]
pub struct ModelSelectionContext<'a, T: Trainer> {
    label: &'a str,
    sequences: &'a [ObservationSequence],
    stacked: &'a StackedSequences,
    corpus: &'a Corpus,
    config: &'a SelectorConfig,
    trainer: &'a T,
}

impl<T: Trainer> Clone for ModelSelectionContext<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Trainer> Copy for ModelSelectionContext<'_, T> {}

impl<'a, T: Trainer> ModelSelectionContext<'a, T> {
    /// Build the context for `label`, validating the configuration.
    pub fn new(
        corpus: &'a Corpus,
        label: &'a str,
        config: &'a SelectorConfig,
        trainer: &'a T,
    ) -> SelectResult<Self> {
        config.validate()?;
        let (Some(sequences), Some(stacked)) = (corpus.sequences(label), corpus.stacked(label))
        else {
            return Err(SelectError::UnknownLabel(label.to_string()));
        };
        Ok(Self {
            label,
            sequences,
            stacked,
            corpus,
            config,
            trainer,
        })
    }

    pub fn label(&self) -> &'a str {
        self.label
    }

    /// The label's sequences, in stable order.
    pub fn sequences(&self) -> &'a [ObservationSequence] {
        self.sequences
    }

    /// The label's pre-combined matrix and lengths.
    pub fn stacked(&self) -> &'a StackedSequences {
        self.stacked
    }

    pub fn corpus(&self) -> &'a Corpus {
        self.corpus
    }

    pub fn config(&self) -> &'a SelectorConfig {
        self.config
    }

    /// Train a candidate on the label's full data.
    pub fn base_model(&self, num_states: usize) -> Result<T::Model, TrainingFailure> {
        self.train_on(self.stacked, num_states)
    }

    /// Train a candidate on an arbitrary subset (e.g. a CV training fold).
    pub fn train_on(
        &self,
        data: &StackedSequences,
        num_states: usize,
    ) -> Result<T::Model, TrainingFailure> {
        let result = self
            .trainer
            .train(data, num_states, self.config.random_seed);
        match &result {
            Ok(_) => self.log_trained(num_states),
            Err(e) => self.log_rejected(Some(num_states), &CandidateError::from(e.clone())),
        }
        result
    }

    pub(crate) fn log_trained(&self, num_states: usize) {
        if self.config.verbose {
            info!(label = self.label, num_states, "model created for {} with {} states", self.label, num_states);
        } else {
            debug!(label = self.label, num_states, "model created");
        }
    }

    pub(crate) fn log_rejected(&self, num_states: Option<usize>, err: &CandidateError) {
        if self.config.verbose {
            warn!(label = self.label, ?num_states, "failure on {}: {err}", self.label);
        } else {
            debug!(label = self.label, ?num_states, error = %err, "candidate rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoringFailure;
    use crate::models::SequenceModel;
    use std::collections::BTreeMap;

    struct Stub(usize);

    impl SequenceModel for Stub {
        fn num_states(&self) -> usize {
            self.0
        }
        fn score(&self, _: &StackedSequences) -> Result<f64, ScoringFailure> {
            Ok(0.0)
        }
    }

    #[derive(Debug)]
    struct StubTrainer;

    impl Trainer for StubTrainer {
        type Model = Stub;
        fn train(&self, _: &StackedSequences, n: usize, seed: u64) -> Result<Stub, TrainingFailure> {
            assert_eq!(seed, 99);
            Ok(Stub(n))
        }
    }

    fn corpus() -> Corpus {
        let seq = ObservationSequence::from_frames(&[vec![1.0], vec![2.0]]).unwrap();
        let mut map = BTreeMap::new();
        map.insert("FISH".to_string(), vec![seq]);
        Corpus::from_sequences(map).unwrap()
    }

    #[test]
    fn unknown_label_is_rejected() {
        let corpus = corpus();
        let config = SelectorConfig::default();
        let err = ModelSelectionContext::new(&corpus, "GO", &config, &StubTrainer).unwrap_err();
        assert!(matches!(err, SelectError::UnknownLabel(l) if l == "GO"));
    }

    #[test]
    fn invalid_config_is_rejected_before_search() {
        let corpus = corpus();
        let config = SelectorConfig::with_range(0, 3);
        assert!(ModelSelectionContext::new(&corpus, "FISH", &config, &StubTrainer).is_err());
    }

    #[test]
    fn base_model_uses_configured_seed() {
        let corpus = corpus();
        let config = SelectorConfig {
            random_seed: 99,
            ..SelectorConfig::default()
        };
        let ctx = ModelSelectionContext::new(&corpus, "FISH", &config, &StubTrainer).unwrap();
        assert_eq!(ctx.base_model(4).unwrap().num_states(), 4);
        assert_eq!(ctx.stacked().n_rows(), 2);
    }
}
