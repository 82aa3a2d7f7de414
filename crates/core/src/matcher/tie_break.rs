//! Randomness source for choosing among equally close animals.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Picks one index out of a tie set.
pub trait TieBreaker: Send + Sync {
    /// Return an index in `0..tie_count`. `tie_count` is at least 1.
    fn pick(&self, tie_count: usize) -> usize;
}

/// Uniform choice using the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTieBreaker;

impl TieBreaker for RandomTieBreaker {
    fn pick(&self, tie_count: usize) -> usize {
        if tie_count <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..tie_count)
    }
}

/// Uniform choice from a seeded generator, reproducible across runs.
#[derive(Debug)]
pub struct SeededTieBreaker {
    rng: Mutex<StdRng>,
}

impl SeededTieBreaker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TieBreaker for SeededTieBreaker {
    fn pick(&self, tie_count: usize) -> usize {
        if tie_count <= 1 {
            return 0;
        }
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..tie_count)
    }
}
