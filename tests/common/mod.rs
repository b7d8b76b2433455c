//! Scripted trainer for exercising the strategies without a real sequence model.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use hmm_select::{
    Corpus, ObservationSequence, ScoringFailure, SequenceModel, StackedSequences, Trainer,
    TrainingFailure,
};
use nalgebra::DMatrix;

pub type ScoreFn = dyn Fn(usize, &StackedSequences) -> Result<f64, ScoringFailure> + Send + Sync;
pub type FailFn = dyn Fn(usize, &StackedSequences) -> bool + Send + Sync;

/// One call to `train`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainCall {
    pub num_states: usize,
    pub rows: usize,
    pub seed: u64,
}

pub struct ScriptedModel {
    num_states: usize,
    score_fn: Arc<ScoreFn>,
}

impl SequenceModel for ScriptedModel {
    fn num_states(&self) -> usize {
        self.num_states
    }

    fn score(&self, data: &StackedSequences) -> Result<f64, ScoringFailure> {
        (self.score_fn)(self.num_states, data)
    }
}

/// Trains instantly; scores come from a closure of (state count, data).
pub struct ScriptedTrainer {
    score_fn: Arc<ScoreFn>,
    fail_when: Arc<FailFn>,
    calls: Mutex<Vec<TrainCall>>,
}

impl ScriptedTrainer {
    pub fn new<F>(score_fn: F) -> Self
    where
        F: Fn(usize, &StackedSequences) -> Result<f64, ScoringFailure> + Send + Sync + 'static,
    {
        Self {
            score_fn: Arc::new(score_fn),
            fail_when: Arc::new(|_, _| false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Log-likelihood depends only on the state count.
    pub fn by_states<F>(log_l: F) -> Self
    where
        F: Fn(usize) -> f64 + Send + Sync + 'static,
    {
        Self::new(move |n, _| Ok(log_l(n)))
    }

    pub fn failing_on(self, states: &[usize]) -> Self {
        let states = states.to_vec();
        self.failing_when(move |n, _| states.contains(&n))
    }

    /// Training fails whenever `pred(state count, data)` holds.
    pub fn failing_when<F>(mut self, pred: F) -> Self
    where
        F: Fn(usize, &StackedSequences) -> bool + Send + Sync + 'static,
    {
        self.fail_when = Arc::new(pred);
        self
    }

    /// Calls sorted by (state count, rows) since candidates run in parallel.
    pub fn calls(&self) -> Vec<TrainCall> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort_by_key(|c| (c.num_states, c.rows));
        calls
    }
}

impl Trainer for ScriptedTrainer {
    type Model = ScriptedModel;

    fn train(
        &self,
        data: &StackedSequences,
        num_states: usize,
        seed: u64,
    ) -> Result<ScriptedModel, TrainingFailure> {
        self.calls.lock().unwrap().push(TrainCall {
            num_states,
            rows: data.n_rows(),
            seed,
        });
        if (self.fail_when)(num_states, data) {
            return Err(TrainingFailure::new(num_states, "scripted failure"));
        }
        Ok(ScriptedModel {
            num_states,
            score_fn: Arc::clone(&self.score_fn),
        })
    }
}

/// `count` sequences of `rows` frames each, every cell set to `marker`.
pub fn sequences(count: usize, rows: usize, features: usize, marker: f64) -> Vec<ObservationSequence> {
    (0..count)
        .map(|_| ObservationSequence::new(DMatrix::from_element(rows, features, marker)).unwrap())
        .collect()
}

/// Corpus from `(label, sequences)` pairs.
pub fn corpus(entries: Vec<(&str, Vec<ObservationSequence>)>) -> Corpus {
    let map: BTreeMap<String, Vec<ObservationSequence>> = entries
        .into_iter()
        .map(|(label, seqs)| (label.to_string(), seqs))
        .collect();
    Corpus::from_sequences(map).unwrap()
}

/// The marker value a label's data was filled with.
pub fn marker(data: &StackedSequences) -> f64 {
    data.matrix()[(0, 0)]
}
