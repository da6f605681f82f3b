//! Random ball source.
//!
//! Uses the `rand` crate with `SmallRng`, which is fast and works on WASM.
//! Entropy comes from `getrandom` (browser crypto API in the browser). The
//! engine takes this as an injected dependency so tests can seed it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A seedable source of random ball colors.
pub struct BallRng {
    inner: SmallRng,
}

impl BallRng {
    /// Create from system entropy (browser crypto.getRandomValues or OS).
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    /// Create with a specific seed for deterministic behavior.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generate a random ball color in `[1, colors]`.
    #[inline(always)]
    pub fn ball(&mut self, colors: u8) -> u8 {
        self.inner.random_range(1..=colors)
    }

    /// Generate `count` balls, either random or all equal to `fixed`.
    ///
    /// The fixed form exists for deterministic refill tests.
    pub fn balls(&mut self, count: usize, colors: u8, fixed: Option<u8>) -> Vec<u8> {
        match fixed {
            Some(ball) => vec![ball; count],
            None => (0..count).map(|_| self.ball(colors)).collect(),
        }
    }
}

impl Default for BallRng {
    fn default() -> Self {
        Self::new()
    }
}
