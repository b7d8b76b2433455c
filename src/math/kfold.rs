//! Deterministic k-fold splitting over sequence indices.
//!
//! Without shuffling, test folds are contiguous index blocks: every fold gets
//! `n / k` indices and the first `n % k` folds get one more. With a seed, the
//! indices are permuted once (`StdRng`) before the same blocking is applied.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{SelectError, SelectResult};

/// One train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// K-fold splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KFold {
    n_splits: usize,
    shuffle_seed: Option<u64>,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle_seed: None,
        }
    }

    /// Permute indices with `seed` before splitting.
    pub fn shuffled(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Split `0..n_samples` into `n_splits` folds.
    ///
    /// Every index appears in exactly one test set; train and test are disjoint
    /// within a fold. Requires `2 <= n_splits <= n_samples`.
    pub fn split(&self, n_samples: usize) -> SelectResult<Vec<Fold>> {
        if self.n_splits < 2 {
            return Err(SelectError::InvalidConfig(format!(
                "k-fold needs at least 2 splits, got {}",
                self.n_splits
            )));
        }
        if self.n_splits > n_samples {
            return Err(SelectError::InvalidConfig(format!(
                "cannot split {n_samples} sequences into {} folds",
                self.n_splits
            )));
        }

        let mut order: Vec<usize> = (0..n_samples).collect();
        if let Some(seed) = self.shuffle_seed {
            let mut rng = StdRng::seed_from_u64(seed);
            order.shuffle(&mut rng);
        }

        let base = n_samples / self.n_splits;
        let extra = n_samples % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for k in 0..self.n_splits {
            let size = base + usize::from(k < extra);
            let end = start + size;
            let test = order[start..end].to_vec();
            let train = order[..start]
                .iter()
                .chain(order[end..].iter())
                .copied()
                .collect();
            folds.push(Fold { train, test });
            start = end;
        }

        Ok(folds)
    }
}

/// Fold count actually used: never more than the number of sequences.
pub fn effective_folds(requested: usize, n_sequences: usize) -> usize {
    requested.min(n_sequences)
}
