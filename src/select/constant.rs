//! Baseline: always the configured state count, no search.

use crate::domain::SelectorKind;
use crate::error::CandidateError;
use crate::models::Trainer;
use crate::select::context::ModelSelectionContext;
use crate::select::report::SelectionReport;
use crate::select::SelectionStrategy;

/// Trains `constant_states` on the full label data and returns it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorConstant;

impl SelectionStrategy for SelectorConstant {
    fn kind(&self) -> SelectorKind {
        SelectorKind::Constant
    }

    fn select_with_report<T: Trainer>(
        &self,
        ctx: &ModelSelectionContext<'_, T>,
    ) -> SelectionReport<T::Model> {
        let n = ctx.config().constant_states;
        let mut report = SelectionReport::new(ctx.label(), self.kind());
        match ctx.base_model(n) {
            Ok(model) => report.set_best(n, None, model),
            Err(e) => report.reject(Some(n), CandidateError::from(e)),
        }
        report
    }
}
