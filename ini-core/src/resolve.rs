//! Tie breakers: strategies that order a group of mutually tied items.
//!
//! The sort hands each tied group to a [`TieBreaker`] in its pre-tie (input)
//! order and splices the returned ordering back in place. A tie breaker must
//! return a permutation of the group it was given.
//!
//! Any `FnMut(Vec<T>) -> Vec<T>` closure is a tie breaker, which covers the
//! common deterministic cases. [`ShuffleTies`] is the randomized production
//! strategy and draws from a caller-owned [`RandomSource`].

use crate::error::Result;
use crate::randomness::RandomSource;

pub trait TieBreaker<T> {
    /// Order `group`, whose items all compare equal under the primary order.
    fn break_ties(&mut self, group: Vec<T>) -> Result<Vec<T>>;
}

impl<T, F> TieBreaker<T> for F
where
    F: FnMut(Vec<T>) -> Vec<T>,
{
    fn break_ties(&mut self, group: Vec<T>) -> Result<Vec<T>> {
        Ok(self(group))
    }
}

/// Leaves every tied group in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepInputOrder;

impl<T> TieBreaker<T> for KeepInputOrder {
    fn break_ties(&mut self, group: Vec<T>) -> Result<Vec<T>> {
        Ok(group)
    }
}

/// Orders each tied group by a uniformly random permutation.
///
/// Draws exactly as [`RandomSource::shuffled`] does, so a group of `k` items
/// consumes `k - 1` range draws.
#[derive(Debug)]
pub struct ShuffleTies<S> {
    source: S,
}

impl<S: RandomSource> ShuffleTies<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<T, S: RandomSource> TieBreaker<T> for ShuffleTies<S> {
    fn break_ties(&mut self, mut group: Vec<T>) -> Result<Vec<T>> {
        self.source.shuffle_in_place(&mut group)?;
        Ok(group)
    }
}
