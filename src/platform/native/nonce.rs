use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::nonce::NonceSource;

/// Uniformly random nonces.
pub struct RandomNonces {
    rng: StdRng,
}

impl RandomNonces {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// The same seed gives the same nonces, for repeatable simulations.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomNonces {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceSource for RandomNonces {
    fn next_nonce(&mut self) -> u32 {
        self.rng.gen()
    }
}
