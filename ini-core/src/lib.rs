//! Deterministic randomness and tie-breaking order for turn-based simulations.
//!
//! This crate answers one recurring question: when several actors are eligible
//! to act at the same instant, who goes first, and can the answer be
//! reproduced exactly from a seed?
//!
//! # Architecture Overview
//!
//! Two collaborating primitives:
//!
//! - [`RandomSource`]: a seeded draw stream. Implementors supply one primitive,
//!   [`RandomSource::next_in_range`]; coin flips, weighted choices and shuffles
//!   are defined in terms of it, so a recorded list of range draws replays every
//!   higher-level outcome. [`Prng`] is the default seeded implementation.
//!
//! - The stable grouped sort in [`sort`]: items are ordered by a primary
//!   comparator, and each run of tied items is handed to a [`TieBreaker`] that
//!   alone decides their relative order.
//!
//! # Basic Usage
//!
//! ```rust
//! use initiative_core::{sorted_with_tie_breaker, Prng, ShuffleTies};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Action {
//!     name: &'static str,
//!     priority: i8,
//!     speed: u16,
//! }
//!
//! let actions = vec![
//!     Action { name: "tackle", priority: 0, speed: 90 },
//!     Action { name: "quick attack", priority: 1, speed: 50 },
//!     Action { name: "ember", priority: 0, speed: 90 },
//! ];
//!
//! let mut prng = Prng::new([1, 2, 3, 4]);
//! let order = sorted_with_tie_breaker(
//!     &actions,
//!     |a, b| b.priority.cmp(&a.priority).then(b.speed.cmp(&a.speed)),
//!     &mut ShuffleTies::new(&mut prng),
//! )
//! .unwrap();
//!
//! assert_eq!(order[0].name, "quick attack");
//! assert_eq!(prng.draw_count(), 1);
//! ```
//!
//! # Determinism
//!
//! Two generators built from equal seeds and driven by equal call sequences
//! produce identical results, across runs and processes. A generator is a
//! single mutable stream; hosts that need parallel randomness own one per
//! logical stream.

pub mod config;
pub mod error;
pub mod logging;
pub mod prng;
pub mod randomness;
pub mod resolve;
pub mod sort;

pub use config::{GeneratorConfig, TieBreakConfig};
pub use error::{InitiativeError, InvalidArgument, InvariantViolation, Result, SeedParseError};
pub use logging::{
    init_detailed_logging, init_logging, init_logging_with_level, sort_span, stream_span,
};
pub use prng::{Prng, PrngSeed};
pub use randomness::{fnv1a64, DrawSite, RandomSource};
pub use resolve::{KeepInputOrder, ShuffleTies, TieBreaker};
pub use sort::{
    group_ties, group_ties_by_key, sorted_by_key_with_tie_breaker, sorted_stable,
    sorted_with_tie_breaker, sorted_with_tie_breaker_config,
};

pub mod prelude {
    //! Commonly used types and traits

    pub use crate::{
        group_ties, sorted_stable, sorted_with_tie_breaker, KeepInputOrder, Prng, PrngSeed,
        RandomSource, ShuffleTies, TieBreaker,
    };
}
