//! Deterministic 2D noise sources

use noise::{NoiseFn, OpenSimplex};

/// A pure, seeded 2D noise function returning values in `[-1, 1]`.
///
/// Implementations must return the same value for the same input for their
/// whole lifetime; fragments generated at different times rely on this to
/// agree along their shared edges.
pub trait NoiseSource: Send + Sync {
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn sample(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// OpenSimplex noise, seeded once at construction
pub struct SimplexNoise {
    seed: u32,
    inner: OpenSimplex,
}

impl SimplexNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            inner: OpenSimplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for SimplexNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.inner.get([x, y])
    }
}
