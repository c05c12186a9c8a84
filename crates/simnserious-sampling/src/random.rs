//! The uniform random primitive supplied by the host.
//!
//! Every sampler in this crate draws its randomness through [`RandomSource`].
//! Any `rand::Rng` already is one, so callers normally pass a seeded
//! `StdRng` or `rand::thread_rng()`.

use rand::Rng;

/// Uniformly distributed numbers over half-open ranges.
///
/// A degenerate range (`high <= low`) yields `low` rather than panicking.
pub trait RandomSource {
    /// A value in `[low, high)`.
    fn uniform_f32(&mut self, low: f32, high: f32) -> f32;

    /// A value in `[low, high)`, double precision.
    fn uniform_f64(&mut self, low: f64, high: f64) -> f64;

    /// An integer in `[low, high)`.
    fn uniform_int(&mut self, low: i32, high: i32) -> i32;

    /// An index in `[0, len)`. Returns 0 when `len` is 0.
    fn uniform_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_f32(&mut self, low: f32, high: f32) -> f32 {
        if high > low {
            self.gen_range(low..high)
        } else {
            low
        }
    }

    fn uniform_f64(&mut self, low: f64, high: f64) -> f64 {
        if high > low {
            self.gen_range(low..high)
        } else {
            low
        }
    }

    fn uniform_int(&mut self, low: i32, high: i32) -> i32 {
        if high > low {
            self.gen_range(low..high)
        } else {
            low
        }
    }

    fn uniform_index(&mut self, len: usize) -> usize {
        if len > 0 {
            self.gen_range(0..len)
        } else {
            0
        }
    }
}
