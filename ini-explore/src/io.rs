//! Trace files.
//!
//! A file holds exactly one [`Trace`]. JSON is readable and diffs well in bug
//! reports; postcard is compact for long recordings. Decoding also checks the
//! recorded range draws, so a loaded trace can always drive a replay.

use std::fs;
use std::path::{Path, PathBuf};

use initiative_core::logging::events;
use initiative_core::PrngSeed;
use serde::{Deserialize, Serialize};

use crate::trace::Trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraceFormat {
    #[default]
    Json,
    Postcard,
}

impl TraceFormat {
    /// Format implied by a file extension: `.bin`/`.postcard` are postcard,
    /// everything else is JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|s| s.to_str()) {
            Some("bin") | Some("postcard") => TraceFormat::Postcard,
            _ => TraceFormat::Json,
        }
    }

    pub fn encode(self, trace: &Trace) -> Result<Vec<u8>, TraceIoError> {
        let encoded = match self {
            TraceFormat::Json => serde_json::to_vec_pretty(trace).map_err(CodecError::from),
            TraceFormat::Postcard => postcard::to_stdvec(trace).map_err(CodecError::from),
        };
        encoded.map_err(|source| TraceIoError::Encode {
            scenario: trace.meta.scenario.clone(),
            seed: trace.meta.seed,
            format: self,
            source,
        })
    }

    pub fn decode(self, bytes: &[u8]) -> Result<Trace, TraceIoError> {
        let decoded: Result<Trace, CodecError> = match self {
            TraceFormat::Json => serde_json::from_slice(bytes).map_err(CodecError::from),
            TraceFormat::Postcard => postcard::from_bytes(bytes).map_err(CodecError::from),
        };
        let trace = decoded.map_err(|source| TraceIoError::Decode {
            format: self,
            source,
        })?;
        check_draws(&trace)?;
        Ok(trace)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceIoConfig {
    pub format: TraceFormat,
}

impl TraceIoConfig {
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        Self {
            format: TraceFormat::from_path(path),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Postcard(#[from] postcard::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TraceIoError {
    #[error("failed reading trace file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed writing trace file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed encoding trace `{scenario}` (seed {seed}) as {format:?}: {source}")]
    Encode {
        scenario: String,
        seed: PrngSeed,
        format: TraceFormat,
        source: CodecError,
    },

    #[error("not a {format:?} trace: {source}")]
    Decode {
        format: TraceFormat,
        source: CodecError,
    },

    #[error("trace `{scenario}` draw {index}: value {value} outside range {range}")]
    InvalidDraw {
        scenario: String,
        index: usize,
        range: u32,
        value: u32,
    },
}

/// Every recorded draw must be replayable: `range > 0` and `value < range`.
fn check_draws(trace: &Trace) -> Result<(), TraceIoError> {
    match trace
        .range_draws()
        .enumerate()
        .find(|(_, d)| d.value >= d.range)
    {
        Some((index, draw)) => Err(TraceIoError::InvalidDraw {
            scenario: trace.meta.scenario.clone(),
            index,
            range: draw.range,
            value: draw.value,
        }),
        None => Ok(()),
    }
}

pub fn write_trace_to_path(
    path: impl AsRef<Path>,
    trace: &Trace,
    cfg: TraceIoConfig,
) -> Result<(), TraceIoError> {
    let path = path.as_ref();
    let bytes = cfg.format.encode(trace)?;
    fs::write(path, bytes).map_err(|source| TraceIoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    events::trace_written(&path.display().to_string(), trace.events.len());
    Ok(())
}

pub fn read_trace_from_path(
    path: impl AsRef<Path>,
    cfg: TraceIoConfig,
) -> Result<Trace, TraceIoError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| TraceIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.format.decode(&bytes)
}
