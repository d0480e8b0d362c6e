//! Stable grouped sort with pluggable tie breaking.
//!
//! Ordering happens in two steps:
//!
//! 1. A stable sort by the caller's primary comparator. Equal items keep
//!    their input order, which makes input position an implicit secondary key.
//! 2. Maximal runs of equal items ("ties") are handed to a [`TieBreaker`],
//!    which alone decides their relative order.
//!
//! Group order is fixed by step 1 and never changes in step 2, so items that
//! compare unequal are never reordered by tie breaking. Singleton groups never
//! reach the tie breaker.
//!
//! The stable pass is an index-tagged merge sort used unconditionally rather
//! than the standard library sort. It compares only items from distinct input
//! positions and reports an [`InvariantViolation::SelfComparison`] if that ever
//! fails to hold.

use std::cmp::Ordering;

use crate::config::TieBreakConfig;
use crate::error::{InvariantViolation, Result};
use crate::logging::{diagnostics, events, sort_span};
use crate::resolve::TieBreaker;

/// Copy of `items` ordered by `compare`, ties kept in input order.
///
/// `items` is not modified.
pub fn sorted_stable<T, C>(items: &[T], mut compare: C) -> Result<Vec<T>>
where
    T: Clone,
    C: FnMut(&T, &T) -> Ordering,
{
    let order = stable_order(items, &mut compare)?;
    Ok(order.into_iter().map(|position| items[position].clone()).collect())
}

/// Stable sort of `items`, split into maximal runs of equal items.
pub fn group_ties<T, C>(items: &[T], mut compare: C) -> Result<Vec<Vec<T>>>
where
    T: Clone,
    C: FnMut(&T, &T) -> Ordering,
{
    let order = stable_order(items, &mut compare)?;

    let mut groups: Vec<Vec<T>> = Vec::new();
    let mut head: Option<usize> = None;
    for position in order {
        let joins_group = match head {
            Some(head) => {
                compare_positions(items, &mut compare, head, position)? == Ordering::Equal
            }
            None => false,
        };

        if joins_group {
            if let Some(group) = groups.last_mut() {
                group.push(items[position].clone());
            }
        } else {
            head = Some(position);
            groups.push(vec![items[position].clone()]);
        }
    }

    Ok(groups)
}

/// Stable sort of `items` with every tie ordered by `resolver`.
///
/// Validates the tie breaker according to [`TieBreakConfig::default`].
pub fn sorted_with_tie_breaker<T, C, R>(
    items: &[T],
    compare: C,
    resolver: &mut R,
) -> Result<Vec<T>>
where
    T: Clone + PartialEq,
    C: FnMut(&T, &T) -> Ordering,
    R: TieBreaker<T> + ?Sized,
{
    sorted_with_tie_breaker_config(items, compare, resolver, &TieBreakConfig::default())
}

/// [`sorted_with_tie_breaker`] with explicit validation settings.
///
/// The returned group length is always checked. With
/// `config.validate_resolver` set, the group's elements are checked too.
pub fn sorted_with_tie_breaker_config<T, C, R>(
    items: &[T],
    compare: C,
    resolver: &mut R,
    config: &TieBreakConfig,
) -> Result<Vec<T>>
where
    T: Clone + PartialEq,
    C: FnMut(&T, &T) -> Ordering,
    R: TieBreaker<T> + ?Sized,
{
    let _span = sort_span(items.len()).entered();

    let groups = group_ties(items, compare)?;
    let mut out = Vec::with_capacity(items.len());

    for (group_index, group) in groups.into_iter().enumerate() {
        if group.len() < 2 {
            out.extend(group);
            continue;
        }

        let size = group.len();
        let expected = config.validate_resolver.then(|| group.clone());
        let resolved = resolver.break_ties(group)?;

        let checked = if resolved.len() != size {
            Err(InvariantViolation::ResolverChangedLength {
                expected: size,
                actual: resolved.len(),
            })
        } else if let Some(expected) = &expected {
            check_permutation(expected, &resolved)
        } else {
            Ok(())
        };
        if let Err(violation) = checked {
            diagnostics::resolver_contract_breach(group_index, &violation);
            return Err(violation.into());
        }

        events::tie_group_resolved(group_index, size);
        out.extend(resolved);
    }

    Ok(out)
}

/// Key-based [`group_ties`]: items tie when their keys are equal.
pub fn group_ties_by_key<T, K, F>(items: &[T], mut key: F) -> Result<Vec<Vec<T>>>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    group_ties(items, |a, b| key(a).cmp(&key(b)))
}

/// Key-based [`sorted_with_tie_breaker`].
pub fn sorted_by_key_with_tie_breaker<T, K, F, R>(
    items: &[T],
    mut key: F,
    resolver: &mut R,
) -> Result<Vec<T>>
where
    T: Clone + PartialEq,
    K: Ord,
    F: FnMut(&T) -> K,
    R: TieBreaker<T> + ?Sized,
{
    sorted_with_tie_breaker(items, |a, b| key(a).cmp(&key(b)), resolver)
}

/// Input positions of `items` in stable sorted order (bottom-up merge sort).
fn stable_order<T, C>(items: &[T], compare: &mut C) -> Result<Vec<usize>>
where
    C: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    let mut order: Vec<usize> = (0..len).collect();
    let mut scratch: Vec<usize> = vec![0; len];

    let mut width = 1;
    while width < len {
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge_runs(
                items,
                compare,
                &order[start..mid],
                &order[mid..end],
                &mut scratch[start..end],
            )?;
        }
        std::mem::swap(&mut order, &mut scratch);
        width *= 2;
    }

    Ok(order)
}

fn merge_runs<T, C>(
    items: &[T],
    compare: &mut C,
    left: &[usize],
    right: &[usize],
    out: &mut [usize],
) -> Result<()>
where
    C: FnMut(&T, &T) -> Ordering,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        let take_left = if i == left.len() {
            false
        } else if j == right.len() {
            true
        } else {
            let ordering = compare_positions(items, compare, left[i], right[j])?
                .then(left[i].cmp(&right[j]));
            ordering != Ordering::Greater
        };

        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
    Ok(())
}

fn compare_positions<T, C>(items: &[T], compare: &mut C, a: usize, b: usize) -> Result<Ordering>
where
    C: FnMut(&T, &T) -> Ordering,
{
    if a == b {
        return Err(InvariantViolation::SelfComparison { position: a }.into());
    }
    Ok(compare(&items[a], &items[b]))
}

/// `resolved` must hold the same multiset of items as `expected`.
fn check_permutation<T: PartialEq>(
    expected: &[T],
    resolved: &[T],
) -> std::result::Result<(), InvariantViolation> {
    let mut used = vec![false; expected.len()];
    for (position, item) in resolved.iter().enumerate() {
        let slot = expected
            .iter()
            .enumerate()
            .position(|(index, candidate)| !used[index] && candidate == item);
        match slot {
            Some(index) => used[index] = true,
            None => return Err(InvariantViolation::ResolverChangedElements { position }),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InitiativeError;
    use crate::resolve::KeepInputOrder;

    #[test]
    fn merge_sort_orders_by_comparator_then_position() {
        let items = [(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd'), (1, 'e')];
        let mut by_rank = |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0);
        let order = stable_order(&items, &mut by_rank).unwrap();
        assert_eq!(order, vec![1, 4, 3, 0, 2]);
    }

    #[test]
    fn comparator_never_sees_the_same_position_twice() {
        let items: Vec<u32> = (0..37).map(|i| (i * 7919) % 13).collect();
        let mut calls = 0;
        let mut compare = |a: &u32, b: &u32| {
            assert!(!std::ptr::eq(a, b), "comparator called with one item on both sides");
            calls += 1;
            a.cmp(b)
        };
        let order = stable_order(&items, &mut compare).unwrap();
        assert_eq!(order.len(), items.len());
        assert!(calls > 0);
    }

    #[test]
    fn self_comparison_is_reported() {
        let items = [1, 2];
        let err = compare_positions(&items, &mut |a: &i32, b: &i32| a.cmp(b), 1, 1).unwrap_err();
        assert_eq!(
            err,
            InitiativeError::InvariantViolation(InvariantViolation::SelfComparison { position: 1 })
        );
    }

    #[test]
    fn permutation_check_counts_duplicates() {
        assert!(check_permutation(&[1, 1, 2], &[2, 1, 1]).is_ok());
        assert_eq!(
            check_permutation(&[1, 1, 2], &[1, 2, 2]),
            Err(InvariantViolation::ResolverChangedElements { position: 2 })
        );
    }

    #[test]
    fn groups_compare_against_their_first_member() {
        let groups = group_ties(&[1, 2, 2, 3, 3, 3], |a: &i32, b: &i32| a.cmp(b)).unwrap();
        assert_eq!(groups, vec![vec![1], vec![2, 2], vec![3, 3, 3]]);
    }

    #[test]
    fn keyed_variants_match_comparator_variants() {
        let words = ["bb", "a", "cc", "d"];
        let by_key = group_ties_by_key(&words, |w: &&str| w.len()).unwrap();
        assert_eq!(by_key, vec![vec!["a", "d"], vec!["bb", "cc"]]);

        let sorted = sorted_by_key_with_tie_breaker(&words, |w: &&str| w.len(), &mut KeepInputOrder)
            .unwrap();
        assert_eq!(sorted, vec!["a", "d", "bb", "cc"]);
    }
}
