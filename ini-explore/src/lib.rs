//! Record, replay and diagnostic tools for initiative ordering.
//!
//! This crate is opt-in: it wraps `initiative-core` sources and tie breakers
//! without changing their values. A recorded trace holds every range draw, so
//! a run can be replayed exactly, or replayed for a prefix and then continued
//! from a fresh seed.

pub mod collisions;
pub mod harness;
pub mod io;
pub mod replay_rng;
pub mod resolve;
pub mod rng;
pub mod trace;

/// Prelude for common exploration types.
pub mod prelude {
    pub use crate::collisions::CollisionReport;
    pub use crate::harness::{
        format_from_extension, replay_recorded, run_recorded, HarnessConfig, HarnessContext,
        HarnessError,
    };
    pub use crate::io::{
        read_trace_from_path, write_trace_to_path, TraceFormat, TraceIoConfig, TraceIoError,
    };
    pub use crate::replay_rng::{ChainedSource, ReplayError, ReplaySource};
    pub use crate::resolve::RecordingTieBreaker;
    pub use crate::rng::TracingSource;
    pub use crate::trace::{Outcome, RangeDraw, Trace, TraceEvent, TraceMeta, TraceRecorder};
}
