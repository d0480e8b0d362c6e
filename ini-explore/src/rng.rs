use std::sync::{Arc, Mutex};

use initiative_core::logging::events;
use initiative_core::randomness::draws;
use initiative_core::{DrawSite, Prng, PrngSeed, RandomSource, Result};

use crate::trace::{Outcome, RangeDraw, TraceEvent, TraceRecorder};

/// A `RandomSource` wrapper that logs draws into a trace.
///
/// Every primitive range draw is recorded. Coin flips, weighted choices and
/// copying shuffles additionally record their outcome right after the range
/// draws they consumed.
pub struct TracingSource<S> {
    inner: S,
    recorder: Arc<Mutex<TraceRecorder>>,
    site: Option<DrawSite>,
}

impl TracingSource<Prng> {
    pub fn seeded(seed: impl Into<PrngSeed>, recorder: Arc<Mutex<TraceRecorder>>) -> Self {
        Self::new(Prng::new(seed), recorder)
    }
}

impl<S: RandomSource> TracingSource<S> {
    pub fn new(inner: S, recorder: Arc<Mutex<TraceRecorder>>) -> Self {
        Self {
            inner,
            recorder,
            site: None,
        }
    }

    /// Tag subsequent draws with `site`.
    pub fn with_site(mut self, site: DrawSite) -> Self {
        self.site = Some(site);
        self
    }

    pub fn set_site(&mut self, site: Option<DrawSite>) {
        self.site = site;
    }

    pub fn site(&self) -> Option<DrawSite> {
        self.site
    }

    pub fn recorder(&self) -> Arc<Mutex<TraceRecorder>> {
        self.recorder.clone()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn record(&self, event: TraceEvent) {
        if let Ok(mut rec) = self.recorder.lock() {
            rec.record(event);
        }
    }

    fn record_outcome(&self, kind: &str, outcome: Outcome) {
        events::outcome_recorded(kind, &format!("{outcome:?}"));
        self.record(TraceEvent::Outcome(outcome));
    }
}

impl<S: RandomSource> RandomSource for TracingSource<S> {
    fn next_in_range(&mut self, n: u32) -> Result<u32> {
        let value = self.inner.next_in_range(n)?;
        self.record(TraceEvent::RangeDraw(RangeDraw {
            tag: self.site.map(|s| s.tag.to_string()),
            site_id: self.site.map(|s| s.site_id),
            range: n,
            value,
        }));
        Ok(value)
    }

    fn flip_coin(&mut self, numerator: u32, denominator: u32) -> Result<bool> {
        let result = draws::flip_coin(self, numerator, denominator)?;
        self.record_outcome(
            "coin_flip",
            Outcome::CoinFlip {
                numerator,
                denominator,
                result,
            },
        );
        Ok(result)
    }

    fn next_weighted_index(&mut self, weights: &[u32]) -> Result<usize> {
        let index = draws::next_weighted_index(self, weights)?;
        self.record_outcome(
            "weighted_index",
            Outcome::WeightedIndex {
                weights: weights.to_vec(),
                index,
            },
        );
        Ok(index)
    }

    fn shuffled<T: Clone>(&mut self, items: &[T]) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        // Shuffling positions draws exactly like shuffling the items.
        let mut permutation: Vec<usize> = (0..items.len()).collect();
        draws::shuffle_in_place(self, &mut permutation)?;
        let out = permutation.iter().map(|&i| items[i].clone()).collect();
        self.record_outcome("shuffle", Outcome::Shuffle { permutation });
        Ok(out)
    }
}
