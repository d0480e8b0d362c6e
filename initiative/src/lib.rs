//! # Initiative - deterministic turn order
//!
//! Initiative is a seeded, replay-safe random stream plus a stable sort whose
//! ties are settled by a pluggable tie breaker. Given the same seed, inputs and
//! call sequence, every run orders things identically.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! initiative = "0.1"
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Includes `explore`
//! - `explore`: Draw tracing, replay and collision reports
//!
//! ## Example
//!
//! ```
//! use initiative::prelude::*;
//!
//! let mut prng = Prng::new([1, 2, 3, 4]);
//! let speeds = [(90, 'a'), (120, 'b'), (90, 'c')];
//! let order = sorted_with_tie_breaker(
//!     &speeds,
//!     |x: &(u32, char), y: &(u32, char)| y.0.cmp(&x.0),
//!     &mut ShuffleTies::new(&mut prng),
//! )
//! .unwrap();
//! assert_eq!(order[0], (120, 'b'));
//! ```

// Re-export core (always available)
pub use initiative_core as core;

#[cfg(feature = "explore")]
pub use initiative_explore as explore;

// Convenience re-exports of commonly used items from core
pub mod prelude {
    //! Commonly used types and traits

    pub use initiative_core::{
        group_ties, sorted_stable, sorted_with_tie_breaker, GeneratorConfig, InitiativeError,
        KeepInputOrder, Prng, PrngSeed, RandomSource, ShuffleTies, TieBreakConfig, TieBreaker,
    };

    #[cfg(feature = "explore")]
    pub use initiative_explore::prelude::{
        run_recorded, CollisionReport, HarnessConfig, RecordingTieBreaker, ReplaySource, Trace,
        TracingSource,
    };
}
