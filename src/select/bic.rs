//! Bayesian Information Criterion: `-2 * logL + p * ln(N)`, lowest wins.

use crate::domain::SelectorKind;
use crate::math::bic_score;
use crate::models::{SequenceModel, Trainer};
use crate::select::context::ModelSelectionContext;
use crate::select::report::SelectionReport;
use crate::select::search::{Search, evaluate_candidates};
use crate::select::SelectionStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorBic;

impl SelectionStrategy for SelectorBic {
    fn kind(&self) -> SelectorKind {
        SelectorKind::Bic
    }

    fn select_with_report<T: Trainer>(
        &self,
        ctx: &ModelSelectionContext<'_, T>,
    ) -> SelectionReport<T::Model> {
        let data = ctx.stacked();
        let outcomes = evaluate_candidates(ctx, |n| {
            let model = ctx.base_model(n)?;
            let log_l = model.score(data)?;
            let score = bic_score(log_l, n, data.n_features(), data.n_rows());
            Ok((model, score))
        });

        let mut search = Search::new(ctx.label(), self.kind());
        for (n, outcome) in outcomes {
            search.offer(ctx, n, outcome);
        }
        search.finish()
    }
}
