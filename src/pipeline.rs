//! Corpus-wide selection: one strategy, every label.
//!
//! Labels are independent, so they are processed on the rayon pool; results
//! are returned in label order.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::info;

use crate::domain::{Corpus, SelectorConfig, SelectorKind};
use crate::error::SelectResult;
use crate::models::Trainer;
use crate::select::{ModelSelectionContext, SelectionSummary, select_with_report};

/// All chosen models of a run plus their diagnostics.
#[derive(Debug)]
pub struct CorpusSelection<M> {
    /// `None` for labels where no candidate was usable.
    pub models: BTreeMap<String, Option<M>>,
    pub summaries: Vec<SelectionSummary>,
}

impl<M> CorpusSelection<M> {
    /// Labels for which no model could be selected.
    pub fn unresolved(&self) -> Vec<&str> {
        self.models
            .iter()
            .filter(|(_, m)| m.is_none())
            .map(|(label, _)| label.as_str())
            .collect()
    }
}

/// Run `kind` for every label in `corpus`.
pub fn select_all<T: Trainer>(
    kind: SelectorKind,
    corpus: &Corpus,
    config: &SelectorConfig,
    trainer: &T,
) -> SelectResult<CorpusSelection<T::Model>> {
    config.validate()?;
    let labels: Vec<&str> = corpus.labels().collect();

    let reports = labels
        .par_iter()
        .map(|&label| {
            let ctx = ModelSelectionContext::new(corpus, label, config, trainer)?;
            Ok(select_with_report(kind, &ctx))
        })
        .collect::<SelectResult<Vec<_>>>()?;

    let mut models = BTreeMap::new();
    let mut summaries = Vec::with_capacity(reports.len());
    for report in reports {
        summaries.push(report.summary());
        models.insert(report.label.clone(), report.into_best());
    }

    let selected = models.values().filter(|m| m.is_some()).count();
    info!(
        selector = kind.display_name(),
        labels = models.len(),
        selected,
        "corpus selection finished"
    );

    Ok(CorpusSelection { models, summaries })
}
