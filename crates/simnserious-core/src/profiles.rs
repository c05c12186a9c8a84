//! Trait profiles - the preset distributions each species rolls from.
//!
//! Each profile is built once and shared. Distributions are immutable after
//! construction, so one `TraitProfiles` can serve every creature.

use std::f32::consts::{FRAC_PI_2, PI};

use simnserious_sampling::{Distribution, RandomSource, SamplingError};

use crate::components::*;

/// Frog size, movement and timing distributions
#[derive(Debug, Clone)]
pub struct FrogProfile {
    /// Extremes are more likely, matching a lifecycle with short growth phases.
    pub size: Distribution,
    /// Linear falloff: frequent jumps are unlikely.
    pub jump_interval: Distribution,
    /// Square curve: small jumps are very unlikely.
    pub jump_force: Distribution,
    /// Sine curve peaking at 45 degrees.
    pub jump_angle: Distribution,
    /// Turning is completely random, in degrees.
    pub turn_angle: Distribution,
}

impl FrogProfile {
    pub fn new() -> Result<Self, SamplingError> {
        Ok(Self {
            size: Distribution::with_default_precision(
                |x| 9.0 * (x - 0.3) * (x - 0.3) + 0.1,
                0.2,
                0.35,
            )?,
            jump_interval: Distribution::with_default_precision(|x| 2.0 - x, 1.0, 2.0)?,
            jump_force: Distribution::with_default_precision(|x| x * x, 1.0, 2.0)?,
            jump_angle: Distribution::with_default_precision(|x| (2.0 * x).sin(), 0.0, FRAC_PI_2)?,
            turn_angle: Distribution::uniform(-90.0, 90.0)?,
        })
    }

    pub fn roll_traits(&self, rng: &mut impl RandomSource) -> FrogTraits {
        FrogTraits {
            size: self.size.sample(rng),
        }
    }
}

/// Observer appearance and pacing distributions
#[derive(Debug, Clone)]
pub struct ObserverProfile {
    /// Sine bumps approximating a bell curve.
    pub height: Distribution,
    pub shirt_hue: Distribution,
    /// Muted colors are more common.
    pub shirt_saturation: Distribution,
    /// Darker colors are more common.
    pub shirt_value: Distribution,
    /// Seconds between thoughts.
    pub thought_interval: Distribution,
    pub walk_distance: Distribution,
}

impl ObserverProfile {
    pub fn new() -> Result<Self, SamplingError> {
        Ok(Self {
            height: Distribution::with_default_precision(
                |x| (4.0 * PI * x).sin() * 0.5 + 0.5,
                0.9,
                1.3,
            )?,
            shirt_hue: Distribution::uniform(0.0, 1.0)?,
            shirt_saturation: Distribution::unit(|x| (x - 1.0) * (x - 1.0))?,
            shirt_value: Distribution::unit(|x| (x - 1.0) * (x - 1.0))?,
            thought_interval: Distribution::uniform(1.0, 4.0)?,
            walk_distance: Distribution::uniform(1.0, 3.0)?,
        })
    }

    pub fn roll_traits(&self, rng: &mut impl RandomSource) -> ObserverTraits {
        ObserverTraits {
            height: self.height.sample(rng),
            shirt: Hsv::new(
                self.shirt_hue.sample(rng),
                self.shirt_saturation.sample(rng),
                self.shirt_value.sample(rng),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FireFlyProfile {
    pub glow_intensity: Distribution,
    pub acceleration: Distribution,
}

impl FireFlyProfile {
    pub fn new() -> Result<Self, SamplingError> {
        Ok(Self {
            glow_intensity: Distribution::uniform(2.0, 4.0)?,
            acceleration: Distribution::uniform(6.0, 10.0)?,
        })
    }

    pub fn roll_traits(&self, rng: &mut impl RandomSource) -> FireFlyTraits {
        FireFlyTraits {
            glow_intensity: self.glow_intensity.sample(rng),
            max_acceleration: self.acceleration.sample(rng),
        }
    }
}

/// All species profiles together
#[derive(Debug, Clone)]
pub struct TraitProfiles {
    pub frog: FrogProfile,
    pub observer: ObserverProfile,
    pub firefly: FireFlyProfile,
}

impl TraitProfiles {
    pub fn new() -> Result<Self, SamplingError> {
        Ok(Self {
            frog: FrogProfile::new()?,
            observer: ObserverProfile::new()?,
            firefly: FireFlyProfile::new()?,
        })
    }

    /// Roll a fresh set of traits for `species`
    pub fn roll(&self, species: Species, rng: &mut impl RandomSource) -> CreatureTraits {
        match species {
            Species::Frog => CreatureTraits::Frog(self.frog.roll_traits(rng)),
            Species::Observer => CreatureTraits::Observer(self.observer.roll_traits(rng)),
            Species::FireFly => CreatureTraits::FireFly(self.firefly.roll_traits(rng)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_profiles_build() {
        let profiles = TraitProfiles::new().unwrap();
        assert_eq!(profiles.frog.size.precision(), 50);
        assert_eq!(profiles.frog.turn_angle.precision(), 1);
        assert_eq!(profiles.observer.shirt_value.min(), 0.0);
    }

    #[test]
    fn test_frog_traits_in_range() {
        let profiles = TraitProfiles::new().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let t = profiles.frog.roll_traits(&mut rng);
            assert!(t.size >= 0.2 && t.size < 0.35, "size {}", t.size);
        }
    }

    #[test]
    fn test_frog_size_favors_extremes() {
        // 9(x-0.3)^2 + 0.1 dips at 0.3, so the middle band is rarer than the edges.
        let profiles = TraitProfiles::new().unwrap();
        let mut rng = StdRng::seed_from_u64(43);
        let samples = profiles.frog.size.sample_n(&mut rng, 20_000);
        let near_dip = samples.iter().filter(|&&s| (0.29..0.31).contains(&s)).count();
        let near_low_edge = samples.iter().filter(|&&s| (0.2..0.22).contains(&s)).count();
        assert!(near_low_edge > near_dip);
    }

    #[test]
    fn test_observer_traits_in_range() {
        let profiles = TraitProfiles::new().unwrap();
        let mut rng = StdRng::seed_from_u64(44);
        for _ in 0..1_000 {
            let t = profiles.observer.roll_traits(&mut rng);
            assert!(t.height >= 0.9 && t.height < 1.3);
            assert!((0.0..1.0).contains(&t.shirt.hue));
            assert!((0.0..1.0).contains(&t.shirt.saturation));
            assert!((0.0..1.0).contains(&t.shirt.value));
        }
    }

    #[test]
    fn test_shirt_saturation_skews_low() {
        let profiles = TraitProfiles::new().unwrap();
        let mut rng = StdRng::seed_from_u64(45);
        let samples = profiles.observer.shirt_saturation.sample_n(&mut rng, 10_000);
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        // Density (x-1)^2 on [0, 1) has mean 0.25.
        assert!((mean - 0.25).abs() < 0.03, "mean {}", mean);
    }

    #[test]
    fn test_firefly_traits_in_range() {
        let profiles = TraitProfiles::new().unwrap();
        let mut rng = StdRng::seed_from_u64(46);
        for _ in 0..1_000 {
            let t = profiles.firefly.roll_traits(&mut rng);
            assert!(t.glow_intensity >= 2.0 && t.glow_intensity < 4.0);
            assert!(t.max_acceleration >= 6.0 && t.max_acceleration < 10.0);
        }
    }

    #[test]
    fn test_roll_matches_species() {
        let profiles = TraitProfiles::new().unwrap();
        let mut rng = StdRng::seed_from_u64(47);
        for species in Species::ALL {
            assert_eq!(profiles.roll(species, &mut rng).species(), species);
        }
    }
}
