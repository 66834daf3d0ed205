//! # RandomSource
//!
//! Every stochastic operator in this crate draws from an explicit
//! [`RandomSource`] handle instead of a global generator. A run that owns its
//! own source (for instance a [`RandomNumberGenerator`] created with
//! [`RandomNumberGenerator::from_seed`]) is fully reproducible.
//!
//! ## Example
//!
//! ```rust
//! use simplega::rng::{RandomNumberGenerator, RandomSource};
//!
//! let mut rng = RandomNumberGenerator::from_seed(1234);
//! let random_numbers = rng.uniform_float(5, 0.0, 1.0);
//! assert_eq!(random_numbers.len(), 5);
//!
//! let mut tour: Vec<usize> = (0..8).collect();
//! rng.shuffle(&mut tour);
//! ```
//!
//! Operator parameters that may either be drawn or given explicitly are
//! expressed with [`Pick`]:
//!
//! ```rust
//! use simplega::rng::Pick;
//!
//! let cuts: Pick<(usize, usize)> = Pick::Fixed((2, 5));
//! let sampled: Pick<(usize, usize)> = Pick::Random;
//! assert!(cuts.is_fixed());
//! assert!(!sampled.is_fixed());
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// The random capability consumed by the operators and the evolution loop.
///
/// Implementors provide the primitive draws; the batch helpers and the
/// Bernoulli trial are derived from them so that every implementation consumes
/// draws in the same order.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in the half-open range `[low, high)`.
    ///
    /// Returns `low` when the range is empty.
    fn gen_index(&mut self, low: usize, high: usize) -> usize;

    /// Shuffles the sequence in place.
    fn shuffle(&mut self, items: &mut [usize]);

    /// Resets the internal state from a seed.
    fn reseed(&mut self, seed: u64);

    /// Draws `n` uniform floats in `[low, high)`.
    fn uniform_float(&mut self, n: usize, low: f64, high: f64) -> Vec<f64> {
        (0..n)
            .map(|_| self.next_f64() * (high - low) + low)
            .collect()
    }

    /// Draws `n` uniform integers in `[low, high)`.
    fn uniform_int(&mut self, low: usize, high: usize, n: usize) -> Vec<usize> {
        (0..n).map(|_| self.gen_index(low, high)).collect()
    }

    /// Flips a coin that lands `true` with probability `p`.
    ///
    /// Certain outcomes (`p >= 1` or `p <= 0`) consume no draw.
    fn bernoulli(&mut self, p: f64) -> bool {
        if p >= 1.0 {
            return true;
        }
        if p <= 0.0 {
            return false;
        }
        self.next_f64() <= p
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn gen_index(&mut self, low: usize, high: usize) -> usize {
        (**self).gen_index(low, high)
    }

    fn shuffle(&mut self, items: &mut [usize]) {
        (**self).shuffle(items)
    }

    fn reseed(&mut self, seed: u64) {
        (**self).reseed(seed)
    }
}

/// A wrapper around the `rand` crate's `StdRng` implementing [`RandomSource`].
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for RandomNumberGenerator {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn gen_index(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    fn shuffle(&mut self, items: &mut [usize]) {
        items.shuffle(&mut self.rng);
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// An operator parameter that is either drawn from the random source or given.
///
/// Tests pass `Fixed` values to reproduce golden results; the evolution loop
/// uses `Random`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Pick<T> {
    #[default]
    Random,
    Fixed(T),
}

impl<T> Pick<T> {
    pub fn is_fixed(&self) -> bool {
        matches!(self, Pick::Fixed(_))
    }

    /// Returns the fixed value, or draws one with `draw`.
    pub fn resolve<F>(self, draw: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Pick::Fixed(value) => value,
            Pick::Random => draw(),
        }
    }
}
