//! Stable grouped sort and tie breaker tests.

use std::cmp::Ordering;

use initiative_core::{
    group_ties, sorted_stable, sorted_with_tie_breaker, sorted_with_tie_breaker_config,
    InitiativeError, InvariantViolation, KeepInputOrder, Prng, RandomSource, ShuffleTies,
    TieBreakConfig,
};

fn compare_strings(x: &&str, y: &&str) -> Ordering {
    x.cmp(y)
}

fn compare_lengths(x: &&str, y: &&str) -> Ordering {
    x.len().cmp(&y.len())
}

fn compare_initials(x: &&str, y: &&str) -> Ordering {
    x.as_bytes()[0].cmp(&y.as_bytes()[0])
}

/// Runs the sort with an identity tie breaker that logs each group it sees.
fn sort_logging_ties<'a>(
    input: &[&'a str],
    compare: fn(&&str, &&str) -> Ordering,
) -> (Vec<&'a str>, Vec<Vec<&'a str>>) {
    let mut calls: Vec<Vec<&'a str>> = Vec::new();
    let out = sorted_with_tie_breaker(input, compare, &mut |group: Vec<&'a str>| {
        calls.push(group.clone());
        group
    })
    .unwrap();
    (out, calls)
}

/// Empty input sorts to empty output without calling the tie breaker.
#[test]
fn empty_input() {
    let (out, calls) = sort_logging_ties(&[], compare_strings);
    assert!(out.is_empty());
    assert!(calls.is_empty());
}

/// A single item sorts to itself without calling the tie breaker.
#[test]
fn single_item() {
    let (out, calls) = sort_logging_ties(&["hello world"], compare_strings);
    assert_eq!(out, vec!["hello world"]);
    assert!(calls.is_empty());
}

/// Distinct items are ordered by the comparator and never reach the tie breaker.
#[test]
fn two_distinct_items() {
    let (out, calls) = sort_logging_ties(&["hello", "worlds"], compare_initials);
    assert_eq!(out, vec!["hello", "worlds"]);
    assert!(calls.is_empty());

    let (out, calls) = sort_logging_ties(&["hello", "worlds"], compare_lengths);
    assert_eq!(out, vec!["hello", "worlds"]);
    assert!(calls.is_empty());

    let out = sorted_with_tie_breaker(
        &["hello", "worlds"],
        |a: &&str, b: &&str| compare_initials(b, a),
        &mut KeepInputOrder,
    )
    .unwrap();
    assert_eq!(out, vec!["worlds", "hello"]);
}

/// One tied pair calls the tie breaker exactly once, in input order.
#[test]
fn two_similar_items() {
    let (out, calls) = sort_logging_ties(&["hello", "harry"], compare_initials);
    assert_eq!(out, vec!["hello", "harry"]);
    assert_eq!(calls, vec![vec!["hello", "harry"]]);

    let (out, calls) = sort_logging_ties(&["hello", "harry"], compare_lengths);
    assert_eq!(out, vec!["hello", "harry"]);
    assert_eq!(calls, vec![vec!["hello", "harry"]]);
}

/// Mixed ties by initial: one group of four.
#[test]
fn mixed_items_by_initial() {
    let input = ["the", "turtle", "drinks", "the", "tea"];
    let (out, calls) = sort_logging_ties(&input, compare_initials);
    assert_eq!(out, vec!["drinks", "the", "turtle", "the", "tea"]);
    assert_eq!(calls, vec![vec!["the", "turtle", "the", "tea"]]);
}

/// Mixed ties by length: two groups, each seen once in input order.
#[test]
fn mixed_items_by_length() {
    let input = ["the", "turtle", "drinks", "the", "tea"];
    let (out, calls) = sort_logging_ties(&input, compare_lengths);
    assert_eq!(out, vec!["the", "the", "tea", "turtle", "drinks"]);
    assert_eq!(calls, vec![vec!["the", "the", "tea"], vec!["turtle", "drinks"]]);
}

/// The tie breaker's order is spliced in place; group order never changes.
#[test]
fn tie_breaker_only_reorders_within_groups() {
    let input = ["the", "turtle", "drinks", "the", "tea"];
    let mut reverse = |mut group: Vec<&'static str>| {
        group.reverse();
        group
    };
    let out = sorted_with_tie_breaker(&input, compare_lengths, &mut reverse).unwrap();
    assert_eq!(out, vec!["tea", "the", "the", "drinks", "turtle"]);
}

/// Stability holds for inputs well past small-sort thresholds.
#[test]
fn stable_for_long_inputs() {
    let input: Vec<(u8, usize)> = (0..64).map(|i| ((i * 7 % 5) as u8, i)).collect();
    let out = sorted_stable(&input, |a, b| a.0.cmp(&b.0)).unwrap();

    for pair in out.windows(2) {
        assert!(pair[0].0 <= pair[1].0);
        if pair[0].0 == pair[1].0 {
            assert!(pair[0].1 < pair[1].1, "ties out of input order: {pair:?}");
        }
    }

    let eleven: Vec<(u8, char)> = "abcdefghijk".chars().map(|c| (1, c)).collect();
    assert_eq!(sorted_stable(&eleven, |a, b| a.0.cmp(&b.0)).unwrap(), eleven);
}

/// Sorting leaves the input alone, is idempotent and keeps sorted input.
#[test]
fn sorted_stable_is_pure_and_idempotent() {
    let input = vec![5, 3, 9, 1, 3, 7, 5, 0, 2, 8, 6, 4];
    let snapshot = input.clone();

    let once = sorted_stable(&input, |a: &i32, b: &i32| a.cmp(b)).unwrap();
    assert_eq!(input, snapshot);
    assert_eq!(once, vec![0, 1, 2, 3, 3, 4, 5, 5, 6, 7, 8, 9]);

    let twice = sorted_stable(&once, |a: &i32, b: &i32| a.cmp(b)).unwrap();
    assert_eq!(once, twice);
}

/// Groups are maximal runs of equal items in stable order.
#[test]
fn group_ties_preserves_order_across_and_within_groups() {
    let input = ["the", "turtle", "drinks", "the", "tea"];
    let groups = group_ties(&input, compare_lengths).unwrap();
    assert_eq!(groups, vec![vec!["the", "the", "tea"], vec!["turtle", "drinks"]]);
    assert!(group_ties(&[] as &[&str], compare_lengths).unwrap().is_empty());
}

/// A tie breaker that drops items is always rejected.
#[test]
fn shortened_group_is_rejected() {
    let err = sorted_with_tie_breaker_config(
        &["aa", "bb", "c"],
        compare_lengths,
        &mut |mut group: Vec<&'static str>| {
            group.pop();
            group
        },
        &TieBreakConfig::trusting(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        InitiativeError::InvariantViolation(InvariantViolation::ResolverChangedLength {
            expected: 2,
            actual: 1
        })
    );
}

/// A tie breaker that swaps in foreign items is rejected when validating.
#[test]
fn substituted_items_are_rejected_when_validating() {
    let mut substitute = |group: Vec<&'static str>| vec!["zz"; group.len()];

    let err = sorted_with_tie_breaker_config(
        &["aa", "bb", "c"],
        compare_lengths,
        &mut substitute,
        &TieBreakConfig::validating(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        InitiativeError::InvariantViolation(InvariantViolation::ResolverChangedElements {
            position: 0
        })
    );

    let trusted = sorted_with_tie_breaker_config(
        &["aa", "bb", "c"],
        compare_lengths,
        &mut substitute,
        &TieBreakConfig::trusting(),
    )
    .unwrap();
    assert_eq!(trusted, vec!["c", "zz", "zz"]);
}

/// Randomized tie breaking is reproducible from the seed.
#[test]
fn shuffled_ties_replay_from_seed() {
    let speeds: Vec<(u32, char)> = vec![
        (90, 'a'),
        (50, 'b'),
        (90, 'c'),
        (90, 'd'),
        (50, 'e'),
        (120, 'f'),
    ];
    let by_speed = |x: &(u32, char), y: &(u32, char)| y.0.cmp(&x.0);

    let run = |seed: [u16; 4]| {
        let mut prng = Prng::new(seed);
        let orders: Vec<Vec<(u32, char)>> = (0..20)
            .map(|_| {
                sorted_with_tie_breaker(&speeds, by_speed, &mut ShuffleTies::new(&mut prng))
                    .unwrap()
            })
            .collect();
        (orders, prng.draw_count())
    };

    let (first, draws) = run([1, 2, 3, 4]);
    let (second, _) = run([1, 2, 3, 4]);
    assert_eq!(first, second);
    // three-way tie: 2 draws, two-way tie: 1 draw
    assert_eq!(draws, 20 * 3);

    for order in &first {
        assert_eq!(order[0], (120, 'f'));
        assert!(order[1..4].iter().all(|entry| entry.0 == 90));
        assert!(order[4..].iter().all(|entry| entry.0 == 50));
    }
}

/// A tie breaker may consume the generator directly.
#[test]
fn closure_tie_breaker_can_draw() {
    let mut prng = Prng::new([0, 0, 0, 0]);
    let mut shuffle = |group: Vec<i32>| prng.shuffled(&group).unwrap();
    let out = sorted_with_tie_breaker(&[1, 1, 2], |a: &i32, b: &i32| a.cmp(b), &mut shuffle)
        .unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out[2], 2);
    assert_eq!(prng.draw_count(), 1);
}
