//! Cross-validated average log-likelihood, highest wins.
//!
//! For each state count a fresh model is trained per fold on the training
//! sequences and scored on the held-out ones. Folds that fail to train or score
//! are skipped; a state count with no usable fold is rejected outright, so it
//! can never win. The winner is re-trained on the label's full data.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::domain::{SelectorKind, StackedSequences};
use crate::error::CandidateError;
use crate::math::{KFold, combine_sequences, effective_folds, mean};
use crate::models::{SequenceModel, Trainer};
use crate::select::context::ModelSelectionContext;
use crate::select::report::SelectionReport;
use crate::select::search::{Search, evaluate_candidates};
use crate::select::SelectionStrategy;

/// Below this many sequences there is nothing sensible to cross-validate.
pub const CV_MIN_SEQUENCES: usize = 3;

/// State count used when the label has too few sequences.
pub const CV_FALLBACK_STATES: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorCv;

impl SelectionStrategy for SelectorCv {
    fn kind(&self) -> SelectorKind {
        SelectorKind::Cv
    }

    fn select_with_report<T: Trainer>(
        &self,
        ctx: &ModelSelectionContext<'_, T>,
    ) -> SelectionReport<T::Model> {
        let sequences = ctx.sequences();
        if sequences.len() < CV_MIN_SEQUENCES {
            info!(
                label = ctx.label(),
                sequences = sequences.len(),
                "too few sequences for cross-validation, using {CV_FALLBACK_STATES} states"
            );
            return fallback(ctx, self.kind());
        }

        let n_folds = effective_folds(ctx.config().cv_folds, sequences.len());
        let mut splitter = KFold::new(n_folds);
        if ctx.config().cv_shuffle {
            splitter = splitter.shuffled(ctx.config().random_seed);
        }
        let folds = match splitter.split(sequences.len()) {
            Ok(folds) => folds,
            Err(e) => {
                let mut report = SelectionReport::new(ctx.label(), self.kind());
                report.reject(None, e);
                return report;
            }
        };

        // Fold matrices do not depend on the state count; build them once.
        let fold_data: Vec<(StackedSequences, StackedSequences)> = folds
            .iter()
            .map(|f| {
                (
                    combine_sequences(&f.train, sequences),
                    combine_sequences(&f.test, sequences),
                )
            })
            .collect();

        let outcomes = evaluate_candidates(ctx, |n| {
            let scores = fold_scores(ctx, &fold_data, n);
            let avg = mean(&scores).ok_or(CandidateError::NoUsableFolds)?;
            debug!(label = ctx.label(), num_states = n, folds = scores.len(), avg, "cv candidate");
            Ok(((), avg))
        });

        let mut search = Search::new(ctx.label(), self.kind());
        for (n, outcome) in outcomes {
            search.offer(ctx, n, outcome);
        }
        let ranking = search.ranked();

        let mut report = search.finish().without_model();
        for candidate in ranking {
            match ctx.base_model(candidate.num_states) {
                Ok(model) => {
                    report.set_best(candidate.num_states, Some(candidate.score), model);
                    break;
                }
                Err(e) => report.reject(
                    Some(candidate.num_states),
                    format!("full-data retrain: {e}"),
                ),
            }
        }
        report
    }
}

/// Held-out log-likelihood of every fold that trained and scored.
fn fold_scores<T: Trainer>(
    ctx: &ModelSelectionContext<'_, T>,
    fold_data: &[(StackedSequences, StackedSequences)],
    num_states: usize,
) -> Vec<f64> {
    fold_data
        .par_iter()
        .filter_map(|(train, test)| {
            let model = ctx.train_on(train, num_states).ok()?;
            match model.score(test) {
                Ok(score) if score.is_finite() => Some(score),
                Ok(score) => {
                    ctx.log_rejected(Some(num_states), &CandidateError::NonFiniteScore(score));
                    None
                }
                Err(e) => {
                    ctx.log_rejected(Some(num_states), &CandidateError::from(e));
                    None
                }
            }
        })
        .collect()
}

fn fallback<T: Trainer>(
    ctx: &ModelSelectionContext<'_, T>,
    kind: SelectorKind,
) -> SelectionReport<T::Model> {
    let mut report = SelectionReport::new(ctx.label(), kind);
    match ctx.base_model(CV_FALLBACK_STATES) {
        Ok(model) => report.set_best(CV_FALLBACK_STATES, None, model),
        Err(e) => report.reject(Some(CV_FALLBACK_STATES), CandidateError::from(e)),
    }
    report
}
