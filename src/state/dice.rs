use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seeded randomness for shuffles, round draws and obstacle placement.
///
/// Two dice compare equal when they were seeded alike and have been rolled the
/// same number of times.
#[derive(Clone, Debug)]
pub struct Dice {
    seed: u64,
    rolls: u64,
    rng: StdRng,
}

impl Dice {
    pub fn new(seed: u64) -> Self {
        Self { seed, rolls: 0, rng: StdRng::seed_from_u64(seed) }
    }

    /// Uniform in `[lo, hi)`; a degenerate range yields `lo`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        self.rolls += 1;
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Uniform index into a collection of `len` items.
    pub fn index(&mut self, len: usize) -> usize {
        self.rolls += 1;
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        self.rolls += 1;
        items.shuffle(&mut self.rng);
    }

    /// Seed for a follow-up session, derived from this one.
    pub fn fork_seed(&mut self) -> u64 {
        self.rolls += 1;
        self.rng.gen_range(0..u64::MAX)
    }
}

impl PartialEq for Dice {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.rolls == other.rolls
    }
}
