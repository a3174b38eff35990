//! Injectable randomness for point synthesis.
//!
//! Synthesis only ever needs "the next float in `[0, 1)`", so that is the
//! whole trait. Production callers use [`ThreadRandom`]; anything that must
//! be reproducible uses [`SeededRandom`] or [`SequenceRandom`].

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used by [`SeededRandom::default`].
pub const DEFAULT_SEED: u64 = 42;

/// A source of uniform floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Thread-local OS-seeded randomness.
#[derive(Debug, Clone)]
pub struct ThreadRandom(ThreadRng);

impl Default for ThreadRandom {
    fn default() -> Self {
        Self(rand::thread_rng())
    }
}

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}

/// Deterministic randomness backed by `ChaCha8Rng`, which produces the same
/// stream on every platform for a given seed.
#[derive(Debug, Clone)]
pub struct SeededRandom(ChaCha8Rng);

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SeededRandom {
    #[must_use]
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// Values are clamped into `[0, 1)`; `NaN` becomes `0.0`. An empty list
/// always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRandom {
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0 - f64::EPSILON) })
            .collect();
        Self { values, index: 0 }
    }

    /// A source that always returns `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index = self.index.wrapping_add(1);
        value
    }
}
