//! Behaver registry - the explicit set of creatures living in a scene.
//!
//! Every behaver is an entity in a `hecs::World` carrying the [`Behaver`]
//! marker, its [`Species`], and that species' trait component. The registry
//! is passed by reference to whoever needs to look creatures up, rather than
//! living in a global.

use hecs::{Entity, NoSuchEntity, World};
use simnserious_sampling::list_utils::{negation, shuffle};
use simnserious_sampling::RandomSource;

use crate::components::*;
use crate::profiles::TraitProfiles;

/// Owns every behaver in a scene
#[derive(Default)]
pub struct BehaverRegistry {
    world: World,
}

impl BehaverRegistry {
    pub fn new() -> Self {
        Self { world: World::new() }
    }

    /// Spawn a behaver of `species` with freshly rolled traits
    pub fn spawn(
        &mut self,
        species: Species,
        profiles: &TraitProfiles,
        rng: &mut impl RandomSource,
    ) -> Entity {
        let traits = profiles.roll(species, rng);
        let entity = self.spawn_with(traits);
        log::debug!("Spawned {} {:?} with {:?}", species, entity, traits);
        entity
    }

    /// Spawn a behaver with known traits
    pub fn spawn_with(&mut self, traits: CreatureTraits) -> Entity {
        match traits {
            CreatureTraits::Frog(t) => self.world.spawn((Behaver, Species::Frog, t)),
            CreatureTraits::Observer(t) => self.world.spawn((Behaver, Species::Observer, t)),
            CreatureTraits::FireFly(t) => self.world.spawn((Behaver, Species::FireFly, t)),
        }
    }

    /// Replace a behaver's traits with a fresh roll for its species
    pub fn reroll_traits(
        &mut self,
        entity: Entity,
        profiles: &TraitProfiles,
        rng: &mut impl RandomSource,
    ) -> Result<CreatureTraits, NoSuchEntity> {
        let species = self.species_of(entity).ok_or(NoSuchEntity)?;
        let traits = profiles.roll(species, rng);
        match traits {
            CreatureTraits::Frog(t) => self.world.insert_one(entity, t)?,
            CreatureTraits::Observer(t) => self.world.insert_one(entity, t)?,
            CreatureTraits::FireFly(t) => self.world.insert_one(entity, t)?,
        }
        log::debug!("Rerolled {} {:?}: {:?}", species, entity, traits);
        Ok(traits)
    }

    pub fn despawn(&mut self, entity: Entity) -> Result<(), NoSuchEntity> {
        self.world.despawn(entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity) && self.species_of(entity).is_some()
    }

    /// Number of behavers
    pub fn count(&self) -> usize {
        self.world.query::<&Behaver>().iter().count()
    }

    pub fn count_of(&self, species: Species) -> usize {
        self.world
            .query::<&Species>()
            .iter()
            .filter(|(_, s)| **s == species)
            .count()
    }

    pub fn species_of(&self, entity: Entity) -> Option<Species> {
        self.world.get::<&Species>(entity).ok().map(|s| *s)
    }

    pub fn traits_of(&self, entity: Entity) -> Option<CreatureTraits> {
        match self.species_of(entity)? {
            Species::Frog => self
                .world
                .get::<&FrogTraits>(entity)
                .ok()
                .map(|t| CreatureTraits::Frog(*t)),
            Species::Observer => self
                .world
                .get::<&ObserverTraits>(entity)
                .ok()
                .map(|t| CreatureTraits::Observer(*t)),
            Species::FireFly => self
                .world
                .get::<&FireFlyTraits>(entity)
                .ok()
                .map(|t| CreatureTraits::FireFly(*t)),
        }
    }

    /// All behavers, ordered by entity id
    pub fn behavers(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self
            .world
            .query::<&Behaver>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        entities.sort_by_key(|e| e.id());
        entities
    }

    /// Choose a random behaver that is not in `excluded`.
    ///
    /// Returns `None`, with a warning, when every behaver is excluded.
    pub fn random_in_scene(
        &self,
        excluded: &[Entity],
        rng: &mut impl RandomSource,
    ) -> Option<Entity> {
        let mut included = negation(&self.behavers(), excluded);
        if included.is_empty() {
            log::warn!("Attempted to get a random behaver, but none were available");
            return None;
        }
        shuffle(rng, &mut included);
        included.first().copied()
    }

    /// Read access for hosts that query components directly
    pub fn world(&self) -> &World {
        &self.world
    }
}
