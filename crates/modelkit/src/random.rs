//! Random service capability consumed by the sampling operations.
//!
//! The containers never reach for a global generator. Whatever randomness a
//! draw needs is injected at the call site as a strategy object, so
//! simulations can run seeded, split generators per worker, or script draws
//! in tests.

use rand::Rng;

/// Minimal source of randomness needed by roulette-wheel sampling.
pub trait RandomService {
    /// Uniform draw in `[0, 1)`.
    fn uniform01(&mut self) -> f64;

    /// Uniform integer draw in `[lo, hi]`, both ends inclusive.
    fn int_range(&mut self, lo: i64, hi: i64) -> i64;
}

impl<R: Rng + ?Sized> RandomService for R {
    #[inline]
    fn uniform01(&mut self) -> f64 {
        self.random_range(0.0..1.0)
    }

    #[inline]
    fn int_range(&mut self, lo: i64, hi: i64) -> i64 {
        self.random_range(lo..=hi)
    }
}
