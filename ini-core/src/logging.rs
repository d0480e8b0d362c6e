//! Structured logging for draws and tie resolution
//!
//! Every draw and every resolved tie can be logged, which makes it easy to see
//! where a run's randomness went when two replays disagree.
//!
//! # How to Control Terminal Logging Output
//!
//! ## 1. Use `init_detailed_logging()` (Recommended for debugging)
//! ```rust
//! use initiative_core::init_detailed_logging;
//! init_detailed_logging();
//! ```
//! - Shows **all** log levels, including one TRACE line per range draw
//! - Pretty-printed format
//!
//! ## 2. Use `init_logging_with_level()` for specific levels
//! ```rust
//! use initiative_core::init_logging_with_level;
//! init_logging_with_level("debug"); // generator creation and tie groups
//! ```
//!
//! ## 3. Use Environment Variables (Most flexible)
//! ```bash
//! RUST_LOG=initiative_core::prng=trace cargo run --example turn_order
//! RUST_LOG=initiative_core::sort=debug,initiative_explore=debug cargo test
//! ```
//!
//! ## 4. Log Level Guidelines:
//! - **TRACE**: Individual range draws and rejected outputs
//! - **DEBUG**: Generator seeding, resolved tie groups
//! - **INFO**: Entropy seeds, trace files written
//! - **WARN**: Replay divergence
//! - **ERROR**: Tie breaker contract breaches
//!
//! The init functions never panic when a global subscriber is already set;
//! they return `false` instead, so calling them from several tests is fine.

use tracing::{debug, error, info, trace, warn, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::InvariantViolation;
use crate::prng::PrngSeed;

/// Initialize logging with sensible defaults (INFO).
pub fn init_logging() -> bool {
    init_logging_with_level("info")
}

/// Initialize logging with a specific level
///
/// # Arguments
/// * `level` - Log level: "trace", "debug", "info", "warn", or "error"
///
/// `RUST_LOG`, when set, takes precedence. Returns `true` if this call
/// installed the global subscriber.
pub fn init_logging_with_level(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{}={level},initiative_core={level},initiative_explore={level}",
            env!("CARGO_PKG_NAME").replace('-', "_")
        )
        .into()
    });

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Logging initialized at level: {}", level);
    }
    installed
}

/// Initialize logging with every draw visible.
pub fn init_detailed_logging() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trace,initiative_core=trace,initiative_explore=trace".into());

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .pretty(),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Detailed logging initialized");
    }
    installed
}

/// Create a span for one logical random stream (typically one simulation).
pub fn stream_span(name: &str) -> Span {
    tracing::info_span!("stream", name = name)
}

/// Create a span for one tie-breaking sort.
pub fn sort_span(len: usize) -> Span {
    tracing::debug_span!("sort", len = len)
}

/// Logging utilities for common events
pub mod events {
    use super::*;

    pub fn generator_seeded(seed: &PrngSeed) {
        debug!(seed = %seed, "Generator seeded");
    }

    pub fn tie_group_resolved(group_index: usize, size: usize) {
        debug!(group_index, size, "Tie group resolved");
    }

    pub fn outcome_recorded(kind: &str, detail: &str) {
        trace!(kind, detail, "Outcome recorded");
    }

    pub fn trace_written(path: &str, events: usize) {
        info!(path, events, "Draw trace written");
    }
}

/// Logging utilities for contract breaches and divergence
pub mod diagnostics {
    use super::*;

    pub fn resolver_contract_breach(group_index: usize, violation: &InvariantViolation) {
        error!(group_index, %violation, "Tie breaker broke the permutation contract");
    }

    pub fn replay_divergence(draw_index: usize, details: &str) {
        warn!(draw_index, details, "Replay diverged from recorded draws");
    }
}
