//! Shared domain types.
//!
//! The trainer boundary consumes one shape only: a stacked feature matrix plus the
//! per-sequence row counts (`StackedSequences`). Everything else here exists to
//! build that shape consistently and to describe what a search did.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{SelectError, SelectResult};
use crate::math::combine_sequences;

/// One recorded instance of a label: rows are frames, columns are features.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSequence {
    frames: DMatrix<f64>,
}

impl ObservationSequence {
    /// Build a sequence from a frame matrix. Empty sequences are rejected.
    pub fn new(frames: DMatrix<f64>) -> SelectResult<Self> {
        if frames.nrows() == 0 || frames.ncols() == 0 {
            return Err(SelectError::InvalidData(format!(
                "observation sequence must be non-empty (got {}x{})",
                frames.nrows(),
                frames.ncols()
            )));
        }
        Ok(Self { frames })
    }

    /// Build a sequence from row vectors; every frame must have the same width.
    pub fn from_frames(frames: &[Vec<f64>]) -> SelectResult<Self> {
        let width = frames.first().map(Vec::len).unwrap_or(0);
        if let Some((t, frame)) = frames.iter().enumerate().find(|(_, f)| f.len() != width) {
            return Err(SelectError::InvalidData(format!(
                "frame {t} has {} features, expected {width}",
                frame.len()
            )));
        }
        let matrix = DMatrix::from_row_iterator(
            frames.len(),
            width,
            frames.iter().flat_map(|f| f.iter().copied()),
        );
        Self::new(matrix)
    }

    /// Number of frames; never zero.
    pub fn n_frames(&self) -> usize {
        self.frames.nrows()
    }

    /// Feature dimensionality.
    pub fn n_features(&self) -> usize {
        self.frames.ncols()
    }

    pub fn frames(&self) -> &DMatrix<f64> {
        &self.frames
    }
}

/// Row-wise concatenation of several sequences plus each one's row count.
///
/// Invariant: `lengths.iter().sum() == matrix.nrows()`.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedSequences {
    matrix: DMatrix<f64>,
    lengths: Vec<usize>,
}

impl StackedSequences {
    /// Pair a matrix with its sequence lengths, checking they agree.
    pub fn new(matrix: DMatrix<f64>, lengths: Vec<usize>) -> SelectResult<Self> {
        let total: usize = lengths.iter().sum();
        if total != matrix.nrows() {
            return Err(SelectError::InvalidData(format!(
                "lengths sum to {total} but matrix has {} rows",
                matrix.nrows()
            )));
        }
        if lengths.iter().any(|&l| l == 0) {
            return Err(SelectError::InvalidData(
                "sequence lengths must be positive".to_string(),
            ));
        }
        Ok(Self { matrix, lengths })
    }

    /// Used by the combiner, which upholds the invariant by construction.
    pub(crate) fn from_parts(matrix: DMatrix<f64>, lengths: Vec<usize>) -> Self {
        debug_assert_eq!(lengths.iter().sum::<usize>(), matrix.nrows());
        Self { matrix, lengths }
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Total row count (`N` in the BIC penalty).
    pub fn n_rows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Feature dimensionality (`M` in the BIC parameter count).
    pub fn n_features(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn n_sequences(&self) -> usize {
        self.lengths.len()
    }
}

/// All labels of a dataset, in both views the strategies need.
///
/// Labels are kept in a `BTreeMap` so iteration (and hence any floating point
/// accumulation across labels) is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    sequences: BTreeMap<String, Vec<ObservationSequence>>,
    stacked: BTreeMap<String, StackedSequences>,
}

impl Corpus {
    /// Accept both views from an external loader.
    ///
    /// The label sets must match and each stacked view must hold as many
    /// sequences, of the same lengths, as the sequence view.
    pub fn new(
        sequences: BTreeMap<String, Vec<ObservationSequence>>,
        stacked: BTreeMap<String, StackedSequences>,
    ) -> SelectResult<Self> {
        if sequences.len() != stacked.len() || sequences.keys().any(|k| !stacked.contains_key(k)) {
            return Err(SelectError::InvalidData(
                "sequence and stacked views cover different labels".to_string(),
            ));
        }
        for (label, seqs) in &sequences {
            validate_label(label, seqs)?;
            let stack = &stacked[label];
            let expected: Vec<usize> = seqs.iter().map(ObservationSequence::n_frames).collect();
            if stack.lengths() != expected.as_slice() {
                return Err(SelectError::InvalidData(format!(
                    "stacked lengths for '{label}' do not match its sequences"
                )));
            }
            if stack.n_features() != seqs[0].n_features() {
                return Err(SelectError::InvalidData(format!(
                    "stacked matrix for '{label}' has {} features, sequences have {}",
                    stack.n_features(),
                    seqs[0].n_features()
                )));
            }
        }
        Ok(Self { sequences, stacked })
    }

    /// Build the stacked view from the sequences.
    pub fn from_sequences(sequences: BTreeMap<String, Vec<ObservationSequence>>) -> SelectResult<Self> {
        let mut stacked = BTreeMap::new();
        for (label, seqs) in &sequences {
            validate_label(label, seqs)?;
            let all: Vec<usize> = (0..seqs.len()).collect();
            stacked.insert(label.clone(), combine_sequences(&all, seqs));
        }
        Ok(Self { sequences, stacked })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn sequences(&self, label: &str) -> Option<&[ObservationSequence]> {
        self.sequences.get(label).map(Vec::as_slice)
    }

    pub fn stacked(&self, label: &str) -> Option<&StackedSequences> {
        self.stacked.get(label)
    }

    /// Stacked views of every label except `label`, in label order.
    pub fn others<'a>(&'a self, label: &'a str) -> impl Iterator<Item = (&'a str, &'a StackedSequences)> {
        self.stacked
            .iter()
            .filter(move |(k, _)| k.as_str() != label)
            .map(|(k, v)| (k.as_str(), v))
    }
}

fn validate_label(label: &str, seqs: &[ObservationSequence]) -> SelectResult<()> {
    let Some(first) = seqs.first() else {
        return Err(SelectError::InvalidData(format!(
            "label '{label}' has no sequences"
        )));
    };
    let width = first.n_features();
    if let Some(i) = seqs.iter().position(|s| s.n_features() != width) {
        return Err(SelectError::InvalidData(format!(
            "sequence {i} of '{label}' has {} features, expected {width}",
            seqs[i].n_features()
        )));
    }
    Ok(())
}

/// Which selection criterion to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    Constant,
    Bic,
    Dic,
    Cv,
}

impl SelectorKind {
    pub const ALL: [SelectorKind; 4] = [
        SelectorKind::Constant,
        SelectorKind::Bic,
        SelectorKind::Dic,
        SelectorKind::Cv,
    ];

    /// Human-readable label for diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            SelectorKind::Constant => "constant",
            SelectorKind::Bic => "BIC",
            SelectorKind::Dic => "DIC",
            SelectorKind::Cv => "CV",
        }
    }

    /// Whether a larger criterion value is better.
    pub fn higher_is_better(self) -> bool {
        !matches!(self, SelectorKind::Bic)
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SelectorKind {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "constant" => Ok(SelectorKind::Constant),
            "bic" => Ok(SelectorKind::Bic),
            "dic" => Ok(SelectorKind::Dic),
            "cv" => Ok(SelectorKind::Cv),
            other => Err(SelectError::InvalidConfig(format!(
                "unknown selector '{other}' (expected constant, bic, dic or cv)"
            ))),
        }
    }
}

/// Criterion value of a candidate that survived training and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub num_states: usize,
    pub score: f64,
}

/// A candidate (or the whole search) that was disqualified, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    /// `None` when the rejection applies to the label rather than one state count.
    pub num_states: Option<usize>,
    pub reason: String,
}
