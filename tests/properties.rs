//! Property-based tests for sequence stacking and fold splitting.

use std::collections::HashSet;

use hmm_select::ObservationSequence;
use hmm_select::math::{KFold, combine_sequences, effective_folds};
use nalgebra::DMatrix;
use proptest::prelude::*;

/// Sequences whose cells encode (sequence index, frame index).
fn tagged_sequences(lengths: &[usize], width: usize) -> Vec<ObservationSequence> {
    lengths
        .iter()
        .enumerate()
        .map(|(s, &len)| {
            let frames = DMatrix::from_fn(len, width, |t, _| (s * 1000 + t) as f64);
            ObservationSequence::new(frames).unwrap()
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Lengths always sum to the row count, in the requested order.
    #[test]
    fn combine_lengths_match_rows(
        lengths in prop::collection::vec(1usize..12, 1..10),
        width in 1usize..5,
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let sequences = tagged_sequences(&lengths, width);
        let indices: Vec<usize> = picks.iter().map(|p| p.index(lengths.len())).collect();

        let stacked = combine_sequences(&indices, &sequences);
        prop_assert_eq!(stacked.lengths().iter().sum::<usize>(), stacked.n_rows());
        let expected: Vec<usize> = indices.iter().map(|&i| lengths[i]).collect();
        prop_assert_eq!(stacked.lengths(), expected.as_slice());

        // Row blocks appear in index order, frames in original order.
        let mut row = 0;
        for &i in &indices {
            for t in 0..lengths[i] {
                prop_assert_eq!(stacked.matrix()[(row, 0)], (i * 1000 + t) as f64);
                row += 1;
            }
        }
    }

    /// Every index is tested exactly once and train/test never overlap.
    #[test]
    fn kfold_partitions_indices(
        n_samples in 2usize..40,
        requested in 2usize..8,
        seed in proptest::option::of(any::<u64>()),
    ) {
        let k = effective_folds(requested, n_samples);
        let mut splitter = KFold::new(k);
        if let Some(seed) = seed {
            splitter = splitter.shuffled(seed);
        }
        let folds = splitter.split(n_samples).unwrap();
        prop_assert_eq!(folds.len(), k);

        let mut seen = vec![0usize; n_samples];
        for fold in &folds {
            let test: HashSet<usize> = fold.test.iter().copied().collect();
            prop_assert!(!fold.test.is_empty());
            prop_assert!(fold.train.iter().all(|i| !test.contains(i)));
            prop_assert_eq!(fold.train.len() + fold.test.len(), n_samples);
            for &i in &fold.test {
                seen[i] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&c| c == 1));
    }

    /// The fold count never exceeds the number of sequences.
    #[test]
    fn effective_folds_never_exceeds_sequences(requested in 2usize..20, n in 1usize..20) {
        let k = effective_folds(requested, n);
        prop_assert!(k <= n);
        prop_assert!(k <= requested);
    }
}
