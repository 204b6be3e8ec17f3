// file: src/composer/phrasing.rs
// description: pluggable strategies for picking a response template
// reference: https://docs.rs/rand

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Picks which of `variants` templates to use for one response.
pub trait PhrasingStrategy: Send + Sync {
    fn choose(&self, variants: usize) -> usize;
}

/// Uniformly random choice. Seed it to get reproducible output in tests.
pub struct RandomPhrasing {
    rng: Mutex<StdRng>,
}

impl RandomPhrasing {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomPhrasing {
    fn default() -> Self {
        Self::new()
    }
}

impl PhrasingStrategy for RandomPhrasing {
    fn choose(&self, variants: usize) -> usize {
        if variants == 0 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..variants)
    }
}

/// Always the same template index (wrapped to the number of variants).
#[derive(Debug, Clone, Copy)]
pub struct FixedPhrasing(pub usize);

impl PhrasingStrategy for FixedPhrasing {
    fn choose(&self, variants: usize) -> usize {
        if variants == 0 { 0 } else { self.0 % variants }
    }
}
