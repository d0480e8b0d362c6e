//! Error types for draws and ordering

use thiserror::Error;

/// Convenience alias used by every fallible draw and sort operation.
pub type Result<T> = std::result::Result<T, InitiativeError>;

/// Top-level error type for generator and sort operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitiativeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    #[error("Invariant violation: {0}")]
    InvariantViolation(#[from] InvariantViolation),
}

impl InitiativeError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, InitiativeError::InvalidArgument(_))
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, InitiativeError::InvariantViolation(_))
    }
}

/// Caller supplied a request with no meaningful draw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("range must contain at least one value, got n = 0")]
    EmptyRange,

    #[error("interval [{from}, {to}) is empty")]
    EmptyInterval { from: u32, to: u32 },

    #[error("coin weight {numerator}/{denominator} is outside [0, 1]")]
    CoinOutOfRange { numerator: u32, denominator: u32 },

    #[error("weighted selection needs at least one weight")]
    NoWeights,

    #[error("weights must not sum to zero")]
    ZeroWeightSum,

    #[error("weights sum to {sum}, which exceeds the largest drawable range")]
    WeightSumOverflow { sum: u64 },

    #[error("cannot sample from an empty slice")]
    EmptySample,

    #[error("sequence of {len} items is longer than the largest drawable range")]
    SequenceTooLong { len: usize },
}

/// Internal ordering contract was broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("comparator invoked with position {position} on both sides")]
    SelfComparison { position: usize },

    #[error("tie breaker returned {actual} items for a group of {expected}")]
    ResolverChangedLength { expected: usize, actual: usize },

    #[error("tie breaker output at position {position} is not a member of the tied group")]
    ResolverChangedElements { position: usize },
}

/// Failure to read a seed from its `a,b,c,d` text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedParseError {
    #[error("expected 4 comma-separated seed words, found {0}")]
    WordCount(usize),

    #[error("invalid seed word {word:?}: {source}")]
    Word {
        word: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
