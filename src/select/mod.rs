//! State-count selection.
//!
//! Responsibilities:
//!
//! - search `[min_states, max_states]` for one label (candidates evaluated in parallel)
//! - score each candidate with the strategy's criterion (BIC, DIC, CV) or skip the search (constant)
//! - isolate training/scoring failures to the candidate that caused them
//! - return the winner, first-in-ascending-order on ties, or `None`

pub mod bic;
pub mod constant;
pub mod context;
pub mod cv;
pub mod dic;
pub mod report;
pub(crate) mod search;

pub use bic::SelectorBic;
pub use constant::SelectorConstant;
pub use context::ModelSelectionContext;
pub use cv::{CV_FALLBACK_STATES, CV_MIN_SEQUENCES, SelectorCv};
pub use dic::{DIC_MIN_LABELS, SelectorDic};
pub use report::{SelectionReport, SelectionSummary};

use tracing::debug;

use crate::domain::SelectorKind;
use crate::models::Trainer;

/// A model-selection criterion.
pub trait SelectionStrategy {
    fn kind(&self) -> SelectorKind;

    /// Run the search and keep the diagnostics.
    fn select_with_report<T: Trainer>(
        &self,
        ctx: &ModelSelectionContext<'_, T>,
    ) -> SelectionReport<T::Model>;

    /// Run the search; `None` means no candidate was usable.
    fn select<T: Trainer>(&self, ctx: &ModelSelectionContext<'_, T>) -> Option<T::Model> {
        self.select_with_report(ctx).into_best()
    }
}

/// Run the strategy named by `kind`.
pub fn select_with_report<T: Trainer>(
    kind: SelectorKind,
    ctx: &ModelSelectionContext<'_, T>,
) -> SelectionReport<T::Model> {
    let report = match kind {
        SelectorKind::Constant => SelectorConstant.select_with_report(ctx),
        SelectorKind::Bic => SelectorBic.select_with_report(ctx),
        SelectorKind::Dic => SelectorDic.select_with_report(ctx),
        SelectorKind::Cv => SelectorCv.select_with_report(ctx),
    };
    debug!(
        label = ctx.label(),
        selector = kind.display_name(),
        best_states = ?report.best_states,
        best_score = ?report.best_score,
        rejected = report.rejected.len(),
        "selection finished"
    );
    report
}

/// Run the strategy named by `kind`, returning only the model.
pub fn select<T: Trainer>(kind: SelectorKind, ctx: &ModelSelectionContext<'_, T>) -> Option<T::Model> {
    select_with_report(kind, ctx).into_best()
}
