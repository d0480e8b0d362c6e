use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use initiative_core::{Prng, PrngSeed};

use crate::io::{write_trace_to_path, TraceFormat, TraceIoConfig, TraceIoError};
use crate::replay_rng::{ReplayError, ReplaySource};
use crate::resolve::RecordingTieBreaker;
use crate::rng::TracingSource;
use crate::trace::{Trace, TraceMeta, TraceRecorder};

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub seed: PrngSeed,
    pub scenario: String,

    /// Where to write the trace. `None` keeps it in memory only.
    pub trace_path: Option<PathBuf>,

    /// Trace encoding format.
    pub trace_format: TraceFormat,
}

impl HarnessConfig {
    pub fn new(seed: impl Into<PrngSeed>, scenario: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            scenario: scenario.into(),
            trace_path: None,
            trace_format: TraceFormat::Json,
        }
    }

    /// Write the trace to `path`, picking the format from its extension.
    pub fn with_trace_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.trace_format = format_from_extension(&path);
        self.trace_path = Some(path);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("failed writing trace: {0}")]
    TraceIo(#[from] TraceIoError),

    #[error("replay diverged: {0}")]
    Replay(#[from] ReplayError),
}

/// Context passed to run closures.
///
/// Contains the shared trace recorder, and helper constructors for
/// trace-aware sources and tie breakers.
#[derive(Clone)]
pub struct HarnessContext {
    recorder: Arc<Mutex<TraceRecorder>>,
}

impl HarnessContext {
    pub fn new(recorder: Arc<Mutex<TraceRecorder>>) -> Self {
        Self { recorder }
    }

    pub fn recorder(&self) -> Arc<Mutex<TraceRecorder>> {
        self.recorder.clone()
    }

    pub fn recording<B>(&self, tie_breaker: B) -> RecordingTieBreaker<B> {
        RecordingTieBreaker::new(tie_breaker, self.recorder())
    }

    pub fn snapshot_trace(&self) -> Trace {
        match self.recorder.lock() {
            Ok(rec) => rec.snapshot(),
            Err(poisoned) => poisoned.into_inner().snapshot(),
        }
    }
}

/// Run `run` against a recording source seeded from `cfg.seed`.
///
/// Returns the closure's result and the recorded trace, which is also written
/// to `cfg.trace_path` when one is set.
pub fn run_recorded<R>(
    cfg: HarnessConfig,
    run: impl FnOnce(&mut TracingSource<Prng>, &HarnessContext) -> R,
) -> Result<(R, Trace), HarnessError> {
    let recorder = Arc::new(Mutex::new(TraceRecorder::new(TraceMeta {
        seed: cfg.seed,
        scenario: cfg.scenario.clone(),
    })));

    let ctx = HarnessContext::new(recorder.clone());
    let mut source = TracingSource::seeded(cfg.seed, recorder);

    let result = run(&mut source, &ctx);

    let trace = ctx.snapshot_trace();
    if let Some(path) = &cfg.trace_path {
        write_trace_to_path(
            path,
            &trace,
            TraceIoConfig {
                format: cfg.trace_format,
            },
        )?;
    }

    Ok((result, trace))
}

/// Run `run` against the range draws of `trace`.
///
/// Fails if the run asks for a draw the trace does not have, or for a
/// different range than was recorded.
pub fn replay_recorded<R>(
    trace: &Trace,
    run: impl FnOnce(&mut ReplaySource) -> R,
) -> Result<R, HarnessError> {
    let mut source = ReplaySource::new(trace);
    let result = run(&mut source);
    match source.take_error() {
        Some(err) => Err(err.into()),
        None => Ok(result),
    }
}

/// Choose the trace format from a file extension.
pub fn format_from_extension(path: impl AsRef<Path>) -> TraceFormat {
    TraceFormat::from_path(path)
}
