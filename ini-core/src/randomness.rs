//! Randomness facade for deterministic ordering.
//!
//! This module is intentionally small. It provides:
//! - `RandomSource`: the draw contract. Implementors supply one primitive,
//!   an unbiased draw in `[0, n)`, and get every other operation for free.
//! - `draws`: the derived operations as free functions, for sources that
//!   override a provided method and still need the canonical draw pattern.
//! - `DrawSite`: a stable identifier for a sampling location, plus a human tag.
//!
//! Replay logs are defined in terms of `next_in_range` alone. Every derived
//! operation reduces to a fixed pattern of `next_in_range` calls, so a bare
//! list of range draws is enough to reconstruct coin flips, weighted choices
//! and shuffles.

use crate::error::{InvalidArgument, Result};

/// A labeled sampling location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawSite {
    pub tag: &'static str,
    pub site_id: u64,
}

impl DrawSite {
    pub const fn new(tag: &'static str, site_id: u64) -> Self {
        Self { tag, site_id }
    }
}

/// Const-friendly 64-bit FNV-1a hash.
pub const fn fnv1a64(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut hash: u64 = 0xcbf29ce484222325;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(0x100000001b3);
        i += 1;
    }
    hash
}

/// Generate a `DrawSite` at the macro expansion site.
#[macro_export]
macro_rules! draw_site {
    ($tag:expr) => {{
        const _SITE_ID: u64 = $crate::randomness::fnv1a64(concat!(
            module_path!(),
            "::",
            file!(),
            ":",
            line!(),
            ":",
            column!(),
            ":",
            $tag,
        ));
        $crate::randomness::DrawSite::new($tag, _SITE_ID)
    }};
}

/// Seeded draw stream.
///
/// A source is a single mutable stream: every draw takes `&mut self`, so one
/// source can never be driven from two places at once. Hosts that need
/// parallel randomness own one source per logical stream.
pub trait RandomSource {
    /// Unbiased integer in `[0, n)`.
    ///
    /// `n = 1` always yields `0` but still consumes a draw. `n = 0` fails with
    /// [`InvalidArgument::EmptyRange`].
    fn next_in_range(&mut self, n: u32) -> Result<u32>;

    /// `true` with probability `numerator / denominator`.
    ///
    /// Value-identical to `self.next_in_range(denominator)? < numerator`.
    fn flip_coin(&mut self, numerator: u32, denominator: u32) -> Result<bool> {
        draws::flip_coin(self, numerator, denominator)
    }

    /// Index `i` with probability `weights[i] / sum(weights)`.
    ///
    /// One draw over the weight total, then a cumulative bucket lookup.
    fn next_weighted_index(&mut self, weights: &[u32]) -> Result<usize> {
        draws::next_weighted_index(self, weights)
    }

    /// Integer in the half-open interval `[from, to)`.
    fn next_in_interval(&mut self, from: u32, to: u32) -> Result<u32> {
        draws::next_in_interval(self, from, to)
    }

    /// Uniformly chosen element of `items`.
    fn sample<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T>
    where
        Self: Sized,
    {
        draws::sample(self, items)
    }

    /// Permute `items` in place with a forward Fisher-Yates pass.
    fn shuffle_in_place<T>(&mut self, items: &mut [T]) -> Result<()>
    where
        Self: Sized,
    {
        draws::shuffle_in_place(self, items)
    }

    /// Uniformly random permutation of `items` as a new vector.
    ///
    /// The input is never mutated. Empty and single-element inputs are copied
    /// without consuming a draw.
    fn shuffled<T: Clone>(&mut self, items: &[T]) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        draws::shuffled(self, items)
    }
}

// Every operation forwards, so overrides on `S` still apply through `&mut S`
// and `Box<S>`.
impl<S: RandomSource> RandomSource for &mut S {
    fn next_in_range(&mut self, n: u32) -> Result<u32> {
        (**self).next_in_range(n)
    }

    fn flip_coin(&mut self, numerator: u32, denominator: u32) -> Result<bool> {
        (**self).flip_coin(numerator, denominator)
    }

    fn next_weighted_index(&mut self, weights: &[u32]) -> Result<usize> {
        (**self).next_weighted_index(weights)
    }

    fn next_in_interval(&mut self, from: u32, to: u32) -> Result<u32> {
        (**self).next_in_interval(from, to)
    }

    fn sample<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        (**self).sample(items)
    }

    fn shuffle_in_place<T>(&mut self, items: &mut [T]) -> Result<()> {
        (**self).shuffle_in_place(items)
    }

    fn shuffled<T: Clone>(&mut self, items: &[T]) -> Result<Vec<T>> {
        (**self).shuffled(items)
    }
}

impl<S: RandomSource> RandomSource for Box<S> {
    fn next_in_range(&mut self, n: u32) -> Result<u32> {
        (**self).next_in_range(n)
    }

    fn flip_coin(&mut self, numerator: u32, denominator: u32) -> Result<bool> {
        (**self).flip_coin(numerator, denominator)
    }

    fn next_weighted_index(&mut self, weights: &[u32]) -> Result<usize> {
        (**self).next_weighted_index(weights)
    }

    fn next_in_interval(&mut self, from: u32, to: u32) -> Result<u32> {
        (**self).next_in_interval(from, to)
    }

    fn sample<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        (**self).sample(items)
    }

    fn shuffle_in_place<T>(&mut self, items: &mut [T]) -> Result<()> {
        (**self).shuffle_in_place(items)
    }

    fn shuffled<T: Clone>(&mut self, items: &[T]) -> Result<Vec<T>> {
        (**self).shuffled(items)
    }
}

/// Derived draw operations, expressed only through [`RandomSource::next_in_range`].
pub mod draws {
    use super::RandomSource;
    use crate::error::{InvalidArgument, Result};

    pub fn flip_coin<S: RandomSource + ?Sized>(
        source: &mut S,
        numerator: u32,
        denominator: u32,
    ) -> Result<bool> {
        if denominator == 0 || numerator > denominator {
            return Err(InvalidArgument::CoinOutOfRange {
                numerator,
                denominator,
            }
            .into());
        }
        Ok(source.next_in_range(denominator)? < numerator)
    }

    pub fn next_weighted_index<S: RandomSource + ?Sized>(
        source: &mut S,
        weights: &[u32],
    ) -> Result<usize> {
        let total = super::weight_total(weights)?;
        let draw = source.next_in_range(total)?;
        Ok(super::bucket_for(weights, draw))
    }

    pub fn next_in_interval<S: RandomSource + ?Sized>(
        source: &mut S,
        from: u32,
        to: u32,
    ) -> Result<u32> {
        if from >= to {
            return Err(InvalidArgument::EmptyInterval { from, to }.into());
        }
        Ok(from + source.next_in_range(to - from)?)
    }

    pub fn sample<'a, S: RandomSource + ?Sized, T>(
        source: &mut S,
        items: &'a [T],
    ) -> Result<&'a T> {
        if items.is_empty() {
            return Err(InvalidArgument::EmptySample.into());
        }
        let index = source.next_in_range(super::span_of(items.len())?)?;
        Ok(&items[index as usize])
    }

    pub fn shuffle_in_place<S: RandomSource + ?Sized, T>(
        source: &mut S,
        items: &mut [T],
    ) -> Result<()> {
        let len = items.len();
        if len < 2 {
            return Ok(());
        }
        super::span_of(len)?;

        for start in 0..len - 1 {
            let offset = source.next_in_range((len - start) as u32)?;
            items.swap(start, start + offset as usize);
        }
        Ok(())
    }

    pub fn shuffled<S: RandomSource + ?Sized, T: Clone>(
        source: &mut S,
        items: &[T],
    ) -> Result<Vec<T>> {
        let mut out = items.to_vec();
        shuffle_in_place(source, &mut out)?;
        Ok(out)
    }
}

/// Sum of `weights` as a drawable range.
fn weight_total(weights: &[u32]) -> Result<u32> {
    if weights.is_empty() {
        return Err(InvalidArgument::NoWeights.into());
    }
    let sum: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if sum == 0 {
        return Err(InvalidArgument::ZeroWeightSum.into());
    }
    u32::try_from(sum).map_err(|_| InvalidArgument::WeightSumOverflow { sum }.into())
}

/// Smallest index whose running weight total exceeds `draw`.
fn bucket_for(weights: &[u32], draw: u32) -> usize {
    let mut cumulative = 0u64;
    for (index, &weight) in weights.iter().enumerate() {
        cumulative += u64::from(weight);
        if u64::from(draw) < cumulative {
            return index;
        }
    }
    // draw < total, so the loop always returns
    weights.len() - 1
}

fn span_of(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| InvalidArgument::SequenceTooLong { len }.into())
}
