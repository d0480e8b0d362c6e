//! Tie diagnostics.
//!
//! A [`CollisionReport`] is a tie breaker that changes nothing. It keeps every
//! tied group in input order and remembers it, so a sort over a table of
//! handlers (or actions, or anything else) doubles as a scan for orderings
//! that only a random tie break can decide.

use initiative_core::{Result, TieBreaker};
use tracing::debug;

pub struct CollisionReport<F> {
    label: F,
    ties: Vec<Vec<String>>,
}

impl<F> CollisionReport<F> {
    /// `label` names an item in the report.
    pub fn new(label: F) -> Self {
        Self {
            label,
            ties: Vec::new(),
        }
    }

    /// Recorded tied groups, each in input order.
    pub fn ties(&self) -> &[Vec<String>] {
        &self.ties
    }

    pub fn is_empty(&self) -> bool {
        self.ties.is_empty()
    }

    /// Drain the recorded groups, keeping the label function.
    pub fn take_ties(&mut self) -> Vec<Vec<String>> {
        std::mem::take(&mut self.ties)
    }

    pub fn into_ties(self) -> Vec<Vec<String>> {
        self.ties
    }
}

impl<T, F> TieBreaker<T> for CollisionReport<F>
where
    F: FnMut(&T) -> String,
{
    fn break_ties(&mut self, group: Vec<T>) -> Result<Vec<T>> {
        let labels: Vec<String> = group.iter().map(|item| (self.label)(item)).collect();
        debug!(size = labels.len(), ties = ?labels, "Collision recorded");
        self.ties.push(labels);
        Ok(group)
    }
}
