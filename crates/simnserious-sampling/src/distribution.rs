//! Arbitrary-curve continuous distributions.
//!
//! A [`Distribution`] approximates a one-dimensional density over `[min, max)`
//! with a bar graph: the domain is cut into `precision` equal-width bars and
//! each bar's height is the curve evaluated at the bar's midpoint. Sampling
//! stacks the bars, picks one in proportion to its height, then returns a
//! uniform point inside it.
//!
//! Higher precision tracks steep or discontinuous curves more closely at the
//! cost of `precision` curve evaluations up front and a longer walk per sample.

use crate::error::SamplingError;
use crate::random::RandomSource;

/// Precision used when none is given.
pub const DEFAULT_PRECISION: usize = 50;

/// An immutable bar-graph approximation of a density curve.
///
/// The curve is treated as an unnormalized relative likelihood and is only
/// evaluated during construction. Curves must not return negative values;
/// doing so leaves sampling behavior undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    min: f32,
    max: f32,
    bar_width: f32,
    bar_heights: Vec<f32>,
    total_height: f32,
}

impl Distribution {
    /// Build a distribution from `curve` over `[min, max)` using `precision` bars.
    ///
    /// Fails with [`SamplingError::InvalidArgument`] if `precision` is zero,
    /// either bound is not finite, or `max <= min`.
    pub fn new<F>(curve: F, min: f32, max: f32, precision: usize) -> Result<Self, SamplingError>
    where
        F: Fn(f32) -> f32,
    {
        if precision < 1 {
            return Err(SamplingError::invalid(
                "precision",
                format!("must be at least 1, got {}", precision),
            ));
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(SamplingError::invalid(
                "bounds",
                format!("must be finite, got [{}, {})", min, max),
            ));
        }
        if max <= min {
            return Err(SamplingError::invalid(
                "bounds",
                format!("max must exceed min, got [{}, {})", min, max),
            ));
        }

        let bar_width = (max - min) / precision as f32;

        let bar_heights: Vec<f32> = (0..precision)
            .map(|i| curve(min + (i as f32 + 0.5) * bar_width))
            .collect();
        let total_height = bar_heights.iter().sum();

        Ok(Self {
            min,
            max,
            bar_width,
            bar_heights,
            total_height,
        })
    }

    /// Build a distribution over `[min, max)` with the default precision.
    pub fn with_default_precision<F>(curve: F, min: f32, max: f32) -> Result<Self, SamplingError>
    where
        F: Fn(f32) -> f32,
    {
        Self::new(curve, min, max, DEFAULT_PRECISION)
    }

    /// Build a distribution over `[0, 1)` with the default precision.
    pub fn unit<F>(curve: F) -> Result<Self, SamplingError>
    where
        F: Fn(f32) -> f32,
    {
        Self::new(curve, 0.0, 1.0, DEFAULT_PRECISION)
    }

    /// Every value in `[min, max)` is equally likely.
    ///
    /// A flat curve needs only one bar.
    pub fn uniform(min: f32, max: f32) -> Result<Self, SamplingError> {
        Self::new(|_| 1.0, min, max, 1)
    }

    /// Draw a value from the distribution.
    ///
    /// Bars with zero height are never selected. If rounding keeps the running
    /// sum from ever exceeding the target, the right edge of the domain is
    /// returned.
    pub fn sample(&self, rng: &mut impl RandomSource) -> f32 {
        // Stack the bars until the target height is passed.
        let target = rng.uniform_f32(0.0, self.total_height);
        let mut height_sum = 0.0;
        for (i, height) in self.bar_heights.iter().enumerate() {
            height_sum += height;
            if height_sum > target {
                let offset = rng.uniform_f32(0.0, 1.0);
                let value = self.min + (i as f32 + offset) * self.bar_width;
                // An offset just under 1 can round up onto the right edge.
                return value.min(next_below(self.max));
            }
        }
        self.max()
    }

    /// Draw `count` values.
    pub fn sample_n(&self, rng: &mut impl RandomSource, count: usize) -> Vec<f32> {
        (0..count).map(|_| self.sample(rng)).collect()
    }

    /// Lower bound of the domain.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound of the domain (exclusive).
    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn bar_width(&self) -> f32 {
        self.bar_width
    }

    pub fn bar_heights(&self) -> &[f32] {
        &self.bar_heights
    }

    pub fn total_height(&self) -> f32 {
        self.total_height
    }

    /// Number of bars.
    pub fn precision(&self) -> usize {
        self.bar_heights.len()
    }

    /// Mean of the bar graph: each bar's midpoint weighted by its height.
    ///
    /// Returns `None` when every bar is empty.
    pub fn approximate_mean(&self) -> Option<f32> {
        if self.total_height <= 0.0 {
            return None;
        }
        let weighted: f32 = self
            .bar_heights
            .iter()
            .enumerate()
            .map(|(i, h)| (self.min + (i as f32 + 0.5) * self.bar_width) * h)
            .sum();
        Some(weighted / self.total_height)
    }
}

/// Largest `f32` strictly below a finite `x`.
fn next_below(x: f32) -> f32 {
    if x == 0.0 {
        -f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replays fixed fractions of each requested range.
    struct Scripted {
        fractions: Vec<f32>,
        next: usize,
    }

    impl Scripted {
        fn new(fractions: &[f32]) -> Self {
            Self {
                fractions: fractions.to_vec(),
                next: 0,
            }
        }

        fn fraction(&mut self) -> f32 {
            let f = self.fractions[self.next % self.fractions.len()];
            self.next += 1;
            f
        }
    }

    impl RandomSource for Scripted {
        fn uniform_f32(&mut self, low: f32, high: f32) -> f32 {
            low + (high - low) * self.fraction()
        }
        fn uniform_f64(&mut self, low: f64, high: f64) -> f64 {
            low + (high - low) * self.fraction() as f64
        }
        fn uniform_int(&mut self, low: i32, _high: i32) -> i32 {
            low
        }
        fn uniform_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    /// Returns exactly `high` for float ranges, which a real source never does.
    struct AlwaysTop;

    impl RandomSource for AlwaysTop {
        fn uniform_f32(&mut self, _low: f32, high: f32) -> f32 {
            high
        }
        fn uniform_f64(&mut self, _low: f64, high: f64) -> f64 {
            high
        }
        fn uniform_int(&mut self, low: i32, _high: i32) -> i32 {
            low
        }
        fn uniform_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    #[test]
    fn test_zero_precision_rejected() {
        let err = Distribution::new(|_| 1.0, 0.0, 1.0, 0).unwrap_err();
        assert!(matches!(
            err,
            SamplingError::InvalidArgument {
                name: "precision",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_bounds_rejected() {
        assert!(Distribution::new(|_| 1.0, 1.0, 1.0, 10).is_err());
        assert!(Distribution::new(|_| 1.0, 2.0, 1.0, 10).is_err());
        assert!(Distribution::new(|_| 1.0, f32::NEG_INFINITY, 1.0, 10).is_err());
        assert!(Distribution::uniform(0.0, f32::NAN).is_err());
    }

    #[test]
    fn test_bars_evaluated_at_midpoints() {
        let dist = Distribution::new(|x| x, 10.0, 14.0, 4).unwrap();
        assert_eq!(dist.bar_width(), 1.0);
        assert_eq!(dist.bar_heights(), &[10.5, 11.5, 12.5, 13.5]);
        assert_eq!(dist.total_height(), 48.0);
        assert_eq!(dist.precision(), 4);
        assert_eq!(dist.min(), 10.0);
        assert_eq!(dist.max(), 14.0);
    }

    #[test]
    fn test_total_height_matches_bar_sum() {
        let dist = Distribution::new(|x| x * x, 0.0, 2.0, 50).unwrap();
        let sum: f32 = dist.bar_heights().iter().sum();
        assert_eq!(dist.total_height(), sum);
    }

    #[test]
    fn test_convenience_constructors() {
        let uniform = Distribution::uniform(-90.0, 90.0).unwrap();
        assert_eq!(uniform.precision(), 1);
        assert_eq!(uniform.bar_width(), 180.0);

        let unit = Distribution::unit(|x| 1.0 - x).unwrap();
        assert_eq!(unit.precision(), DEFAULT_PRECISION);
        assert_eq!(unit.min(), 0.0);
        assert!((unit.max() - 1.0).abs() < 1e-6);

        let defaulted = Distribution::with_default_precision(|x| x, 1.0, 2.0).unwrap();
        assert_eq!(defaulted.precision(), DEFAULT_PRECISION);
    }

    #[test]
    fn test_construction_is_deterministic() {
        let a = Distribution::new(|x| (2.0 * x).sin(), 0.0, std::f32::consts::FRAC_PI_2, 50)
            .unwrap();
        let b = Distribution::new(|x| (2.0 * x).sin(), 0.0, std::f32::consts::FRAC_PI_2, 50)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.bar_heights(), b.bar_heights());
    }

    #[test]
    fn test_sample_uses_selected_bar_and_offset() {
        // Bars of height 1, 1, 2: target 0.5 of 4 = 2.0 lands in the third bar.
        let dist = Distribution::new(|x| if x < 2.0 { 1.0 } else { 2.0 }, 0.0, 3.0, 3).unwrap();
        let mut source = Scripted::new(&[0.5, 0.25]);
        let value = dist.sample(&mut source);
        assert!((value - 2.25).abs() < 1e-6);
    }

    #[test]
    fn test_cumulative_sum_must_strictly_exceed_target() {
        // Target lands exactly on the boundary between bar 0 and bar 1.
        let dist = Distribution::new(|_| 1.0, 0.0, 2.0, 2).unwrap();
        let mut source = Scripted::new(&[0.5, 0.0]);
        let value = dist.sample(&mut source);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_zero_height_bars_never_selected() {
        let dist = Distribution::new(|x| if x < 5.0 { 0.0 } else { 1.0 }, 0.0, 10.0, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..5_000 {
            let v = dist.sample(&mut rng);
            assert!(v >= 5.0, "sampled {} from an empty bar", v);
        }
    }

    #[test]
    fn test_fallback_returns_right_edge() {
        let dist = Distribution::new(|x| x, 1.0, 3.0, 4).unwrap();
        assert_eq!(dist.sample(&mut AlwaysTop), dist.max());
        assert_eq!(dist.max(), 3.0);
    }

    #[test]
    fn test_largest_offset_stays_below_max() {
        // Largest f32 below 1.0 as the in-bar offset.
        let top = 1.0 - f32::EPSILON / 2.0;
        let dist = Distribution::uniform(3.0, 7.0).unwrap();
        let value = dist.sample(&mut Scripted::new(&[0.5, top]));
        assert!(value < 7.0, "sampled the right edge {}", value);
        assert!(value > 6.999);

        let wide = Distribution::new(|_| 1.0, -1.0, 1.0, 64).unwrap();
        let value = wide.sample(&mut Scripted::new(&[top, top]));
        assert!((-1.0..1.0).contains(&value), "{} out of range", value);
    }

    #[test]
    fn test_next_below() {
        assert!(next_below(7.0) < 7.0);
        assert!(next_below(-2.0) < -2.0);
        assert!(next_below(0.0) < 0.0);
        assert_eq!(next_below(1.0), 1.0 - f32::EPSILON / 2.0);
    }

    #[test]
    fn test_uniform_samples_stay_in_range() {
        let dist = Distribution::uniform(2.0, 4.0).unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        for v in dist.sample_n(&mut rng, 10_000) {
            assert!((2.0..4.0).contains(&v), "{} out of range", v);
        }
    }

    #[test]
    fn test_square_curve_skews_high() {
        let dist = Distribution::new(|x| x * x, 0.0, 2.0, 50).unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let samples = dist.sample_n(&mut rng, 20_000);
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        // E[x] for density x^2 on [0, 2) is 1.5.
        assert!(mean > 1.4 && mean < 1.6, "mean was {}", mean);

        let low = samples.iter().filter(|&&v| v < 0.5).count();
        let high = samples.iter().filter(|&&v| v >= 1.5).count();
        assert!(high > low * 10);
    }

    #[test]
    fn test_approximate_mean() {
        let flat = Distribution::uniform(0.0, 4.0).unwrap();
        assert_eq!(flat.approximate_mean(), Some(2.0));

        let square = Distribution::new(|x| x * x, 0.0, 2.0, 50).unwrap();
        let mean = square.approximate_mean().unwrap();
        assert!((mean - 1.5).abs() < 0.01);

        let empty = Distribution::new(|_| 0.0, 0.0, 1.0, 5).unwrap();
        assert_eq!(empty.approximate_mean(), None);
    }
}
