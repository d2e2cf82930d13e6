use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_SEED: u64 = 3819201;

/// Source of randomness for the rule contract audit.
pub trait RandomGenerator: Default {
    /// Returns a value in `from..to`, or `from` when the range is empty.
    fn next_range(&mut self, from: usize, to: usize) -> usize;
}

/// Draws from the thread-local generator. Audits differ from run to run.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        if to <= from {
            return from;
        }
        rand::rng().random_range(from..to)
    }
}

/// A seeded generator, for audits that must be reproducible.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl Default for SeededRandomGenerator {
    fn default() -> Self {
        SeededRandomGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        if to <= from {
            return from;
        }
        self.rng.random_range(from..to)
    }
}

impl SeededRandomGenerator {
    /// Creates a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}
