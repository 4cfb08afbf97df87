use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The random decisions maze generation makes.
///
/// Generation draws every random choice through this seam, so tests can
/// script the carve and production code can replay a maze from its seed.
pub trait CarveRng {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

impl<R: CarveRng + ?Sized> CarveRng for &mut R {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }
}

/// `StdRng` seeded from a `u64` that is kept for logging and replay.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    inner: StdRng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a fresh seed from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this RNG was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl CarveRng for SeededRng {
    fn pick(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.inner.random_bool(probability.clamp(0.0, 1.0))
    }
}
