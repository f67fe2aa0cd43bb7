// replay_sim/src/simulation/core/prng.rs

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A newtype wrapper around `ChaCha8Rng`.
/// This is the central, deterministic pseudo-random number generator for the simulation.
pub struct SimulationRng(pub ChaCha8Rng);

impl SimulationRng {
    /// Seeded when `seed` is given, otherwise drawn from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => {
                tracing::info!("Seeding the simulation RNG with {}", seed);
                Self(ChaCha8Rng::seed_from_u64(seed))
            }
            None => Self(ChaCha8Rng::from_entropy()),
        }
    }
}
