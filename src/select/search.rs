//! Candidate evaluation and best tracking shared by the searching strategies.
//!
//! Candidates are evaluated on the rayon pool but collected in ascending state
//! order, then reduced sequentially with a strict comparison. The first
//! candidate reaching the best score therefore wins ties, exactly as a serial
//! ascending loop would.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::domain::{CandidateScore, SelectorKind};
use crate::error::CandidateError;
use crate::models::Trainer;
use crate::select::context::ModelSelectionContext;
use crate::select::report::SelectionReport;

/// Which way the criterion improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Minimize,
    Maximize,
}

impl Direction {
    pub(crate) fn of(kind: SelectorKind) -> Self {
        if kind.higher_is_better() {
            Direction::Maximize
        } else {
            Direction::Minimize
        }
    }

    fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Direction::Minimize => candidate < incumbent,
            Direction::Maximize => candidate > incumbent,
        }
    }

    /// Better scores first; scores neither strictly better nor worse are equal.
    fn rank(self, a: f64, b: f64) -> Ordering {
        if self.improves(a, b) {
            Ordering::Less
        } else if self.improves(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

pub(crate) type Outcome<M> = Result<(M, f64), CandidateError>;

/// Evaluate every configured state count, returning outcomes in ascending order.
pub(crate) fn evaluate_candidates<T, M, F>(
    ctx: &ModelSelectionContext<'_, T>,
    eval: F,
) -> Vec<(usize, Outcome<M>)>
where
    T: Trainer,
    M: Send,
    F: Fn(usize) -> Outcome<M> + Sync,
{
    let states: Vec<usize> = ctx.config().state_range().collect();
    states
        .into_par_iter()
        .map(|n| (n, eval(n)))
        .collect()
}

/// Running best over candidates offered in search order.
#[derive(Debug)]
pub(crate) struct Search<M> {
    direction: Direction,
    report: SelectionReport<M>,
}

impl<M> Search<M> {
    pub(crate) fn new(label: &str, kind: SelectorKind) -> Self {
        Self {
            direction: Direction::of(kind),
            report: SelectionReport::new(label, kind),
        }
    }

    /// Record one candidate; returns whether it became the new best.
    pub(crate) fn offer<T: Trainer>(
        &mut self,
        ctx: &ModelSelectionContext<'_, T>,
        num_states: usize,
        outcome: Outcome<M>,
    ) -> bool {
        let (model, score) = match outcome {
            Ok((_, score)) if !score.is_finite() => {
                self.reject(ctx, num_states, CandidateError::NonFiniteScore(score));
                return false;
            }
            Ok(pair) => pair,
            Err(err) => {
                self.reject(ctx, num_states, err);
                return false;
            }
        };

        self.report.scored.push(CandidateScore { num_states, score });

        let better = match self.report.best_score {
            None => true,
            Some(best) => self.direction.improves(score, best),
        };
        if better {
            self.report.set_best(num_states, Some(score), model);
        }
        better
    }

    fn reject<T: Trainer>(
        &mut self,
        ctx: &ModelSelectionContext<'_, T>,
        num_states: usize,
        err: CandidateError,
    ) {
        ctx.log_rejected(Some(num_states), &err);
        self.report.reject(Some(num_states), &err);
    }

    /// Scored candidates, best first. Equal scores keep search order, so the
    /// head is always the candidate `offer` picked.
    pub(crate) fn ranked(&self) -> Vec<CandidateScore> {
        let mut ranking = self.report.scored.clone();
        ranking.sort_by(|a, b| self.direction.rank(a.score, b.score));
        ranking
    }

    pub(crate) fn finish(self) -> SelectionReport<M> {
        self.report
    }
}
