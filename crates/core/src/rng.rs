//! RNG module - piece source for the engine
//!
//! Pieces are drawn uniformly at random (no bag): every draw is an
//! independent pick among the seven kinds. The generator is a small LCG so
//! that a seed fully determines a game, which keeps tests and benches
//! reproducible.
//!
//! A queue can also replay a fixed cycle of kinds, for scripted scenarios.

use arrayvec::ArrayVec;

use crate::pieces::random_piece;
use crate::types::PieceKind;

/// Longest scripted cycle accepted by [`PieceQueue::cycle`]
pub const MAX_CYCLE_LEN: usize = 32;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

#[derive(Debug, Clone)]
enum Source {
    Random(SimpleRng),
    Cycle {
        kinds: ArrayVec<PieceKind, MAX_CYCLE_LEN>,
        next: usize,
    },
}

/// Where the engine gets its next piece kind from
#[derive(Debug, Clone)]
pub struct PieceQueue {
    source: Source,
}

impl PieceQueue {
    /// Uniform random draws seeded with `seed`
    pub fn new(seed: u32) -> Self {
        Self {
            source: Source::Random(SimpleRng::new(seed)),
        }
    }

    /// Replay `kinds` in order, forever.
    ///
    /// Kinds past [`MAX_CYCLE_LEN`] are ignored. An empty slice falls back to
    /// random draws with a fixed seed.
    pub fn cycle(kinds: &[PieceKind]) -> Self {
        let kinds: ArrayVec<PieceKind, MAX_CYCLE_LEN> =
            kinds.iter().copied().take(MAX_CYCLE_LEN).collect();
        if kinds.is_empty() {
            return Self::new(1);
        }
        Self {
            source: Source::Cycle { kinds, next: 0 },
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        match &mut self.source {
            Source::Random(rng) => random_piece(rng).kind,
            Source::Cycle { kinds, next } => {
                let kind = kinds[*next];
                *next = (*next + 1) % kinds.len();
                kind
            }
        }
    }

    /// RNG state, or `None` for scripted queues
    pub fn seed(&self) -> Option<u32> {
        match &self.source {
            Source::Random(rng) => Some(rng.state()),
            Source::Cycle { .. } => None,
        }
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
