//! Lab engine - main entry point for running creatures and experiments

use std::io::{Read, Write};

use hecs::Entity;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simnserious_sampling::SamplingError;

use crate::behavior::{firefly_thrust, plan_frog_jump, plan_observer_thought};
use crate::behavior::{FrogJump, ObserverThought};
use crate::components::*;
use crate::config::{ConfigError, LabConfig};
use crate::experiments::{splatter, AceExperiment, PaintSpot};
use crate::persistence::{load_population, save_population, SaveError};
use crate::profiles::TraitProfiles;
use crate::registry::BehaverRegistry;
use crate::walker::FollowWalker;

/// What happened during one update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub walker: GridPosition,
    /// Two-ace hits in this frame's batch
    pub hits: u32,
    /// Running odds across every batch so far
    pub odds: f64,
}

/// Owns the random source, the population and the running experiments
pub struct LabEngine {
    pub config: LabConfig,
    pub profiles: TraitProfiles,
    pub registry: BehaverRegistry,
    pub walker: FollowWalker,
    pub aces: AceExperiment,
    rng: StdRng,
    frame: u64,
}

impl LabEngine {
    /// Create an engine from a validated config
    pub fn new(config: LabConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            profiles: TraitProfiles::new()?,
            registry: BehaverRegistry::new(),
            walker: FollowWalker::new(&config.walker, config.follow_chance),
            aces: AceExperiment::new(),
            rng,
            frame: 0,
            config,
        })
    }

    /// Spawn the configured population
    pub fn populate(&mut self) -> Vec<Entity> {
        let mut spawned = Vec::with_capacity(self.config.population.total() as usize);
        for species in Species::ALL {
            for _ in 0..self.config.population.count_of(species) {
                spawned.push(self.registry.spawn(species, &self.profiles, &mut self.rng));
            }
        }
        log::info!(
            "Populated scene: {} frogs, {} observers, {} fireflies",
            self.registry.count_of(Species::Frog),
            self.registry.count_of(Species::Observer),
            self.registry.count_of(Species::FireFly),
        );
        spawned
    }

    /// Advance the walker one step toward `target` and run one experiment batch
    pub fn update(&mut self, target: (f32, f32)) -> FrameReport {
        self.frame += 1;
        let walker = self.walker.step(target, &mut self.rng);
        let hits = self.aces.run_batch(self.config.runs_per_frame, &mut self.rng);

        log::debug!(
            "Frame {}: walker at ({}, {}), run {} odds {:.5}",
            self.frame,
            walker.x,
            walker.y,
            self.aces.runs,
            self.aces.odds()
        );

        FrameReport {
            frame: self.frame,
            walker,
            hits,
            odds: self.aces.odds(),
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Scatter one paint splatter with the configured settings
    pub fn splatter(&mut self) -> Vec<PaintSpot> {
        splatter(&self.config.splatter, &mut self.rng)
    }

    pub fn plan_frog_jump(&mut self) -> FrogJump {
        plan_frog_jump(&self.profiles.frog, &mut self.rng)
    }

    pub fn plan_observer_thought(&mut self, observer: Entity) -> ObserverThought {
        plan_observer_thought(observer, &self.registry, &self.profiles.observer, &mut self.rng)
    }

    /// Thrust for a firefly this step, or `None` if `firefly` is not one
    pub fn firefly_thrust(&mut self, firefly: Entity, in_liquid: bool) -> Option<Vec3> {
        match self.registry.traits_of(firefly)? {
            CreatureTraits::FireFly(traits) => Some(firefly_thrust(&traits, in_liquid, &mut self.rng)),
            _ => None,
        }
    }

    /// Reroll the traits of every behaver
    pub fn reroll_all(&mut self) -> usize {
        let mut rerolled = 0;
        for entity in self.registry.behavers() {
            if self
                .registry
                .reroll_traits(entity, &self.profiles, &mut self.rng)
                .is_ok()
            {
                rerolled += 1;
            }
        }
        log::info!("Rerolled traits for {} behavers", rerolled);
        rerolled
    }

    /// Save the population to a writer
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        save_population(writer, &self.registry)
    }

    /// Replace the population with one loaded from a reader
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), SaveError> {
        self.registry = load_population(reader)?;
        Ok(())
    }
}

/// Errors that can occur while creating an engine
#[derive(Debug)]
pub enum EngineError {
    Config(ConfigError),
    Sampling(SamplingError),
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        EngineError::Config(e)
    }
}

impl From<SamplingError> for EngineError {
    fn from(e: SamplingError) -> Self {
        EngineError::Sampling(e)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Config(e) => write!(f, "{}", e),
            EngineError::Sampling(e) => write!(f, "Sampler setup failed: {}", e),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PopulationConfig;

    fn seeded(seed: u64) -> LabConfig {
        LabConfig {
            seed: Some(seed),
            population: PopulationConfig {
                frogs: 3,
                observers: 2,
                fireflies: 4,
            },
            ..LabConfig::default()
        }
    }

    #[test]
    fn test_populate() {
        let mut engine = LabEngine::new(seeded(1)).unwrap();
        let spawned = engine.populate();
        assert_eq!(spawned.len(), 9);
        assert_eq!(engine.registry.count(), 9);
        assert_eq!(engine.registry.count_of(Species::FireFly), 4);
    }

    #[test]
    fn test_update_advances_frame_and_experiment() {
        let mut engine = LabEngine::new(seeded(2)).unwrap();
        for i in 1..=10 {
            let report = engine.update((3.0, 3.0));
            assert_eq!(report.frame, i);
        }
        assert_eq!(engine.frame(), 10);
        assert_eq!(engine.aces.runs, 1_000);
    }

    #[test]
    fn test_seed_makes_runs_reproducible() {
        let mut a = LabEngine::new(seeded(3)).unwrap();
        let mut b = LabEngine::new(seeded(3)).unwrap();
        for _ in 0..20 {
            assert_eq!(a.update((0.0, 0.0)), b.update((0.0, 0.0)));
        }
        assert_eq!(a.splatter(), b.splatter());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LabConfig {
            follow_chance: 2.0,
            ..LabConfig::default()
        };
        assert!(matches!(
            LabEngine::new(config),
            Err(EngineError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_firefly_thrust_only_for_fireflies() {
        let mut engine = LabEngine::new(seeded(4)).unwrap();
        engine.populate();
        let frog = engine
            .registry
            .behavers()
            .into_iter()
            .find(|e| engine.registry.species_of(*e) == Some(Species::Frog))
            .unwrap();
        let firefly = engine
            .registry
            .behavers()
            .into_iter()
            .find(|e| engine.registry.species_of(*e) == Some(Species::FireFly))
            .unwrap();
        assert!(engine.firefly_thrust(frog, false).is_none());
        let lift = engine.firefly_thrust(firefly, true).unwrap();
        assert!(lift.y >= 9.0 && lift.y <= 15.0);
    }

    #[test]
    fn test_observer_thought_targets_others() {
        let mut engine = LabEngine::new(seeded(5)).unwrap();
        engine.populate();
        let observer = engine
            .registry
            .behavers()
            .into_iter()
            .find(|e| engine.registry.species_of(*e) == Some(Species::Observer))
            .unwrap();
        let thought = engine.plan_observer_thought(observer);
        assert!(thought.focal_target.is_some());
        assert_ne!(thought.focal_target, Some(observer));
    }

    #[test]
    fn test_reroll_all() {
        let mut engine = LabEngine::new(seeded(6)).unwrap();
        engine.populate();
        assert_eq!(engine.reroll_all(), 9);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = LabEngine::new(seeded(7)).unwrap();
        engine.populate();

        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).expect("Save failed");

        let mut loaded_engine = LabEngine::new(seeded(8)).unwrap();
        loaded_engine.load(&save_buffer[..]).expect("Load failed");
        assert_eq!(loaded_engine.registry.count(), 9);
        assert_eq!(loaded_engine.registry.count_of(Species::Frog), 3);
    }
}
