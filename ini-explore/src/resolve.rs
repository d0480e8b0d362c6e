//! Tie breakers that record what they decided.

use std::sync::{Arc, Mutex};

use initiative_core::{Result, TieBreaker};
use tracing::debug;

use crate::trace::{TieBreakDecision, TraceEvent, TraceRecorder};

/// Wraps a tie breaker and records the order it picks for each group.
///
/// The order is stored as positions into the group as it was handed over
/// (pre-tie input order). Groups the inner breaker does not return as a
/// permutation are passed through unrecorded; the sort rejects them.
pub struct RecordingTieBreaker<B> {
    inner: B,
    recorder: Arc<Mutex<TraceRecorder>>,
    groups: usize,
}

impl<B> RecordingTieBreaker<B> {
    pub fn new(inner: B, recorder: Arc<Mutex<TraceRecorder>>) -> Self {
        Self {
            inner,
            recorder,
            groups: 0,
        }
    }

    /// Number of groups seen so far.
    pub fn groups(&self) -> usize {
        self.groups
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<T, B> TieBreaker<T> for RecordingTieBreaker<B>
where
    T: Clone + PartialEq,
    B: TieBreaker<T>,
{
    fn break_ties(&mut self, group: Vec<T>) -> Result<Vec<T>> {
        let before = group.clone();
        let resolved = self.inner.break_ties(group)?;
        let group_index = self.groups;
        self.groups += 1;

        match positions_in(&before, &resolved) {
            Some(order) => {
                debug!(group_index, order = ?order, "Tie break recorded");
                if let Ok(mut rec) = self.recorder.lock() {
                    rec.record(TraceEvent::TieBreak(TieBreakDecision {
                        group_len: before.len(),
                        order,
                    }));
                }
            }
            None => debug!(group_index, "Tie group not a permutation, not recorded"),
        }
        Ok(resolved)
    }
}

/// For each resolved item, the first unused position in `before` holding an
/// equal item.
fn positions_in<T: PartialEq>(before: &[T], resolved: &[T]) -> Option<Vec<usize>> {
    if before.len() != resolved.len() {
        return None;
    }
    let mut used = vec![false; before.len()];
    resolved
        .iter()
        .map(|item| {
            let position = (0..before.len()).find(|&i| !used[i] && before[i] == *item)?;
            used[position] = true;
            Some(position)
        })
        .collect()
}
