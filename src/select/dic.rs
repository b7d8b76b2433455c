//! Discriminative Information Criterion.
//!
//! `DIC = logL(own data) - mean(logL(other label's data))`, highest wins.
//! The other labels are scored on their pre-combined matrices from the corpus.
//! Needs at least two labels; with fewer, the mean is undefined and no
//! candidate is trained.

use tracing::info;

use crate::domain::SelectorKind;
use crate::error::CandidateError;
use crate::math::dic_score;
use crate::models::{SequenceModel, Trainer};
use crate::select::context::ModelSelectionContext;
use crate::select::report::SelectionReport;
use crate::select::search::{Search, evaluate_candidates};
use crate::select::SelectionStrategy;

/// Minimum number of labels in the corpus.
pub const DIC_MIN_LABELS: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorDic;

impl SelectionStrategy for SelectorDic {
    fn kind(&self) -> SelectorKind {
        SelectorKind::Dic
    }

    fn select_with_report<T: Trainer>(
        &self,
        ctx: &ModelSelectionContext<'_, T>,
    ) -> SelectionReport<T::Model> {
        let n_labels = ctx.corpus().len();
        if n_labels < DIC_MIN_LABELS {
            let err = CandidateError::TooFewLabels {
                required: DIC_MIN_LABELS,
                found: n_labels,
            };
            info!(label = ctx.label(), "DIC skipped: {err}");
            let mut report = SelectionReport::new(ctx.label(), self.kind());
            report.reject(None, err);
            return report;
        }

        let own = ctx.stacked();
        let outcomes = evaluate_candidates(ctx, |n| {
            let model = ctx.base_model(n)?;
            let log_l = model.score(own)?;
            // Any failing label disqualifies the whole candidate.
            let anti = ctx
                .corpus()
                .others(ctx.label())
                .map(|(_, other)| model.score(other))
                .collect::<Result<Vec<f64>, _>>()?;
            let score = dic_score(log_l, &anti).ok_or(CandidateError::TooFewLabels {
                required: DIC_MIN_LABELS,
                found: n_labels,
            })?;
            Ok((model, score))
        });

        let mut search = Search::new(ctx.label(), self.kind());
        for (n, outcome) in outcomes {
            search.offer(ctx, n, outcome);
        }
        search.finish()
    }
}
