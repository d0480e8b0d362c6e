//! Configuration for generators and tie-breaking sorts.

use serde::{Deserialize, Serialize};

use crate::prng::PrngSeed;

/// How a [`crate::Prng`] is seeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible runs. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<PrngSeed>,
}

impl GeneratorConfig {
    pub fn seeded(seed: impl Into<PrngSeed>) -> Self {
        Self {
            seed: Some(seed.into()),
        }
    }
}

/// Options for [`crate::sort::sorted_with_tie_breaker_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreakConfig {
    /// Check that every tie breaker returns a permutation of its group.
    ///
    /// Defaults to on in debug builds and off in release builds, where the
    /// tie breaker is trusted.
    #[serde(default = "default_validate_resolver")]
    pub validate_resolver: bool,
}

impl TieBreakConfig {
    pub fn validating() -> Self {
        Self {
            validate_resolver: true,
        }
    }

    pub fn trusting() -> Self {
        Self {
            validate_resolver: false,
        }
    }
}

impl Default for TieBreakConfig {
    fn default() -> Self {
        Self {
            validate_resolver: default_validate_resolver(),
        }
    }
}

fn default_validate_resolver() -> bool {
    cfg!(debug_assertions)
}
