use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use initiative_core::logging::diagnostics;
use initiative_core::{InvalidArgument, Prng, PrngSeed, RandomSource, Result};

use crate::rng::TracingSource;
use crate::trace::{RangeDraw, Trace, TraceEvent, TraceRecorder};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("replay trace exhausted at draw {index} (requested range {range})")]
    Exhausted { index: usize, range: u32 },

    #[error("replay range mismatch at draw {index}: recorded {recorded}, requested {requested}")]
    RangeMismatch {
        index: usize,
        recorded: u32,
        requested: u32,
    },

    #[error("replay value {value} at draw {index} is outside range {range}")]
    ValueOutOfRange { index: usize, value: u32, range: u32 },
}

/// A source that replays a prefix of recorded range draws.
///
/// It consumes `TraceEvent::RangeDraw` entries in order. Divergence never
/// panics: the first mismatch is stored (see [`ReplaySource::take_error`]) and
/// this draw and every later one return `0`, which is inside any valid range.
pub struct ReplaySource {
    draws: VecDeque<RangeDraw>,
    replayed: usize,
    recorder: Option<Arc<Mutex<TraceRecorder>>>,
    error: Option<ReplayError>,
}

impl ReplaySource {
    pub fn new(prefix: &Trace) -> Self {
        Self {
            draws: prefix.range_draws().cloned().collect(),
            replayed: 0,
            recorder: None,
            error: None,
        }
    }

    /// Re-record replayed draws into `recorder`.
    pub fn with_recorder(mut self, recorder: Arc<Mutex<TraceRecorder>>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Draws not yet replayed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    pub fn replayed(&self) -> usize {
        self.replayed
    }

    pub fn is_exhausted(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn error(&self) -> Option<&ReplayError> {
        self.error.as_ref()
    }

    /// Take the stored divergence, if any. Later draws replay normally again.
    pub fn take_error(&mut self) -> Option<ReplayError> {
        self.error.take()
    }

    fn diverge(&mut self, err: ReplayError) -> u32 {
        diagnostics::replay_divergence(self.replayed, &err.to_string());
        if self.error.is_none() {
            self.error = Some(err);
        }
        0
    }

    fn record(&self, draw: RangeDraw) {
        if let Some(recorder) = &self.recorder {
            if let Ok(mut rec) = recorder.lock() {
                rec.record(TraceEvent::RangeDraw(draw));
            }
        }
    }
}

impl RandomSource for ReplaySource {
    fn next_in_range(&mut self, n: u32) -> Result<u32> {
        if n == 0 {
            return Err(InvalidArgument::EmptyRange.into());
        }
        if self.error.is_some() {
            return Ok(0);
        }

        let index = self.replayed;
        let Some(next) = self.draws.pop_front() else {
            return Ok(self.diverge(ReplayError::Exhausted { index, range: n }));
        };
        self.replayed += 1;

        if next.range != n {
            return Ok(self.diverge(ReplayError::RangeMismatch {
                index,
                recorded: next.range,
                requested: n,
            }));
        }
        if next.value >= n {
            return Ok(self.diverge(ReplayError::ValueOutOfRange {
                index,
                value: next.value,
                range: n,
            }));
        }

        let value = next.value;
        self.record(next);
        Ok(value)
    }
}

/// A source that uses a replay prefix first, then falls back to a fresh
/// generator.
pub struct ChainedSource {
    replay: ReplaySource,
    fallback: TracingSource<Prng>,
}

impl ChainedSource {
    pub fn new(
        prefix: &Trace,
        fallback_seed: impl Into<PrngSeed>,
        recorder: Arc<Mutex<TraceRecorder>>,
    ) -> Self {
        Self {
            replay: ReplaySource::new(prefix).with_recorder(recorder.clone()),
            fallback: TracingSource::seeded(fallback_seed, recorder),
        }
    }

    /// Whether the replay prefix has been used up.
    pub fn in_fallback(&self) -> bool {
        self.replay.is_exhausted()
    }

    pub fn take_error(&mut self) -> Option<ReplayError> {
        self.replay.take_error()
    }
}

impl RandomSource for ChainedSource {
    fn next_in_range(&mut self, n: u32) -> Result<u32> {
        if !self.replay.is_exhausted() {
            self.replay.next_in_range(n)
        } else {
            self.fallback.next_in_range(n)
        }
    }
}
