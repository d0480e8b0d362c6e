use initiative_core::PrngSeed;
use serde::{Deserialize, Serialize};

/// Recorded draw trace.
///
/// Range draws are the replayable part; outcomes and tie breaks are recorded
/// alongside them so a human (or a diff) can see what the draws meant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub meta: TraceMeta,
    pub events: Vec<TraceEvent>,
}

impl Trace {
    pub fn new(meta: TraceMeta) -> Self {
        Self {
            meta,
            events: Vec::new(),
        }
    }

    pub fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Recorded range draws, in order.
    pub fn range_draws(&self) -> impl Iterator<Item = &RangeDraw> + '_ {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::RangeDraw(d) => Some(d),
            _ => None,
        })
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> + '_ {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Outcome(o) => Some(o),
            _ => None,
        })
    }

    pub fn tie_breaks(&self) -> impl Iterator<Item = &TieBreakDecision> + '_ {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::TieBreak(t) => Some(t),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceMeta {
    /// Seed of the generator that produced the draws.
    pub seed: PrngSeed,

    /// Human-readable scenario label.
    pub scenario: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEvent {
    /// One `next_in_range` draw.
    RangeDraw(RangeDraw),

    /// High-level result built from the preceding range draws.
    Outcome(Outcome),

    /// Order chosen for one tied group.
    TieBreak(TieBreakDecision),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeDraw {
    /// Category of the draw site (speed_tie/accuracy/etc.), if tagged.
    #[serde(default)]
    pub tag: Option<String>,

    /// Stable identifier of the draw site, if tagged.
    #[serde(default)]
    pub site_id: Option<u64>,

    /// Requested range `n`.
    pub range: u32,

    /// Drawn value in `[0, range)`.
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    CoinFlip {
        numerator: u32,
        denominator: u32,
        result: bool,
    },
    WeightedIndex {
        weights: Vec<u32>,
        index: usize,
    },
    /// `permutation[i]` is the input position placed at output position `i`.
    Shuffle { permutation: Vec<usize> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreakDecision {
    pub group_len: usize,

    /// `order[i]` is the pre-tie position placed at output position `i`.
    pub order: Vec<usize>,
}

/// Trace builder used during a run.
#[derive(Debug)]
pub struct TraceRecorder {
    trace: Trace,
}

impl TraceRecorder {
    pub fn new(meta: TraceMeta) -> Self {
        Self {
            trace: Trace::new(meta),
        }
    }

    pub fn record(&mut self, event: TraceEvent) {
        self.trace.record(event);
    }

    /// Borrow the current trace (read-only).
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Snapshot the current trace.
    pub fn snapshot(&self) -> Trace {
        self.trace.clone()
    }

    pub fn into_trace(self) -> Trace {
        self.trace
    }
}
