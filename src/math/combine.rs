//! Stack selected sequences into the matrix + lengths shape the trainer consumes.

use nalgebra::DMatrix;

use crate::domain::{ObservationSequence, StackedSequences};

/// Concatenate `sequences[i]` for each `i` in `indices`, in that order.
///
/// The result satisfies `sum(lengths) == matrix.nrows()` and its `k`-th length is
/// the row count of `sequences[indices[k]]`. An empty index list yields a
/// `0 x 0` matrix with no lengths.
///
/// # Panics
/// Panics if an index is out of range or the selected sequences disagree on
/// feature width. `Corpus` construction rules out the latter.
pub fn combine_sequences(indices: &[usize], sequences: &[ObservationSequence]) -> StackedSequences {
    let n_features = indices
        .first()
        .map(|&i| sequences[i].n_features())
        .unwrap_or(0);
    let n_rows: usize = indices.iter().map(|&i| sequences[i].n_frames()).sum();

    let mut matrix = DMatrix::<f64>::zeros(n_rows, n_features);
    let mut lengths = Vec::with_capacity(indices.len());

    let mut offset = 0;
    for &i in indices {
        let frames = sequences[i].frames();
        matrix.rows_mut(offset, frames.nrows()).copy_from(frames);
        offset += frames.nrows();
        lengths.push(frames.nrows());
    }

    StackedSequences::from_parts(matrix, lengths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(rows: &[[f64; 2]]) -> ObservationSequence {
        let frames: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
        ObservationSequence::from_frames(&frames).unwrap()
    }

    #[test]
    fn combine_follows_index_order() {
        let sequences = vec![
            seq(&[[0.0, 0.0]]),
            seq(&[[1.0, 1.0], [1.5, 1.5]]),
            seq(&[[2.0, 2.0], [2.5, 2.5], [2.9, 2.9]]),
        ];

        let stacked = combine_sequences(&[2, 0], &sequences);
        assert_eq!(stacked.lengths(), &[3, 1]);
        assert_eq!(stacked.n_rows(), 4);
        assert_eq!(stacked.n_features(), 2);
        assert_eq!(stacked.matrix()[(0, 0)], 2.0);
        assert_eq!(stacked.matrix()[(2, 1)], 2.9);
        assert_eq!(stacked.matrix()[(3, 0)], 0.0);
    }

    #[test]
    fn combine_empty_selection() {
        let sequences = vec![seq(&[[1.0, 2.0]])];
        let stacked = combine_sequences(&[], &sequences);
        assert_eq!(stacked.n_rows(), 0);
        assert!(stacked.lengths().is_empty());
    }
}
