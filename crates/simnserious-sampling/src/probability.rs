//! Small probability helpers shared by behaviors and experiments.

use crate::random::RandomSource;

/// True with probability `likelihood` (clamped by nature to `[0, 1]`).
pub fn chance(rng: &mut impl RandomSource, likelihood: f32) -> bool {
    rng.uniform_f32(0.0, 1.0) < likelihood
}

/// Bounded pseudo-Gaussian sample.
///
/// Picks a lower point in the bottom half of `[min, max)` and an upper point
/// in the top half, then a uniform value between them. Values near the
/// center are favored and nothing falls outside `[min, max)`. The raw value
/// is then shifted by `mean` and scaled by `standard_deviation`:
/// `standard_deviation * (raw + mean)`.
pub fn next_gaussian(
    rng: &mut impl RandomSource,
    min: f32,
    max: f32,
    standard_deviation: f32,
    mean: f32,
) -> f32 {
    let center = 0.5 * (min + max);
    let lower = rng.uniform_f32(min, center);
    let upper = rng.uniform_f32(center, max);
    let raw = rng.uniform_f32(lower, upper);
    standard_deviation * (raw + mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1_000 {
            assert!(!chance(&mut rng, 0.0));
            assert!(chance(&mut rng, 1.0));
        }
    }

    #[test]
    fn test_chance_frequency() {
        let mut rng = StdRng::seed_from_u64(2);
        let hits = (0..20_000).filter(|_| chance(&mut rng, 0.3)).count();
        let rate = hits as f64 / 20_000.0;
        assert!((rate - 0.3).abs() < 0.02, "rate was {}", rate);
    }

    #[test]
    fn test_gaussian_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let v = next_gaussian(&mut rng, -8.0, 8.0, 1.0, 0.0);
            assert!((-8.0..8.0).contains(&v), "{} escaped bounds", v);
        }
    }

    #[test]
    fn test_gaussian_scale_and_shift() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..10_000 {
            // raw in [0.5, 1.5) shifted by 1 and doubled lands in [3, 5)
            let v = next_gaussian(&mut rng, 0.5, 1.5, 2.0, 1.0);
            assert!((3.0..5.0).contains(&v), "{} escaped bounds", v);
        }
    }

    #[test]
    fn test_gaussian_concentrates_near_center() {
        let mut rng = StdRng::seed_from_u64(5);
        let samples: Vec<f32> = (0..20_000)
            .map(|_| next_gaussian(&mut rng, -8.0, 8.0, 1.0, 0.0))
            .collect();
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!(mean.abs() < 0.2, "mean was {}", mean);

        let central = samples.iter().filter(|v| v.abs() < 4.0).count();
        let outer = samples.len() - central;
        assert!(central > outer * 2);
    }
}
