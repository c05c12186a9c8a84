//! Creature components: the species tag and each species' rolled traits.

use serde::{Deserialize, Serialize};

use super::color::Hsv;

/// Marker component - this entity is a behaver living in the scene
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Behaver;

/// Kinds of creature that can populate the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Frog,
    Observer,
    FireFly,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Frog, Species::Observer, Species::FireFly];

    pub fn name(self) -> &'static str {
        match self {
            Species::Frog => "frog",
            Species::Observer => "observer",
            Species::FireFly => "firefly",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FrogTraits {
    /// Uniform scale of the frog
    pub size: f32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ObserverTraits {
    /// Uniform scale of the observer
    pub height: f32,
    pub shirt: Hsv,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FireFlyTraits {
    /// Peak light intensity of the glow
    pub glow_intensity: f32,
    /// Largest force applied per axis while flying
    pub max_acceleration: f32,
}

/// The traits of any one creature, tagged by species
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum CreatureTraits {
    Frog(FrogTraits),
    Observer(ObserverTraits),
    FireFly(FireFlyTraits),
}

impl CreatureTraits {
    pub fn species(&self) -> Species {
        match self {
            CreatureTraits::Frog(_) => Species::Frog,
            CreatureTraits::Observer(_) => Species::Observer,
            CreatureTraits::FireFly(_) => Species::FireFly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_names() {
        assert_eq!(Species::Frog.to_string(), "frog");
        assert_eq!(Species::FireFly.name(), "firefly");
        assert_eq!(Species::ALL.len(), 3);
    }

    #[test]
    fn test_traits_species_tag() {
        assert_eq!(
            CreatureTraits::Frog(FrogTraits::default()).species(),
            Species::Frog
        );
        assert_eq!(
            CreatureTraits::Observer(ObserverTraits::default()).species(),
            Species::Observer
        );
        assert_eq!(
            CreatureTraits::FireFly(FireFlyTraits::default()).species(),
            Species::FireFly
        );
    }
}
