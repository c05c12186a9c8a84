//! Save/Load functionality for persisting a population
//!
//! Uses bincode for compact binary serialization of every behaver.
//! Components are serialized individually then reconstructed on load.
//! Entity handles are not preserved; loaded behavers get fresh ones.

use hecs::EntityRef;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::components::*;
use crate::registry::BehaverRegistry;

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of a population
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// All behavers with their components
    pub behavers: Vec<SerializableBehaver>,
}

/// All possible components for a behaver, serialized as optionals
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SerializableBehaver {
    pub species: Option<Species>,
    pub frog: Option<FrogTraits>,
    pub observer: Option<ObserverTraits>,
    pub firefly: Option<FireFlyTraits>,
}

impl SerializableBehaver {
    fn from_entity(entity_ref: EntityRef<'_>) -> Self {
        let mut sb = SerializableBehaver::default();
        if let Some(c) = entity_ref.get::<&Species>() {
            sb.species = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&FrogTraits>() {
            sb.frog = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&ObserverTraits>() {
            sb.observer = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&FireFlyTraits>() {
            sb.firefly = Some(*c);
        }
        sb
    }

    /// The traits matching the stored species, if both are present
    fn traits(&self) -> Option<CreatureTraits> {
        match self.species? {
            Species::Frog => self.frog.map(CreatureTraits::Frog),
            Species::Observer => self.observer.map(CreatureTraits::Observer),
            Species::FireFly => self.firefly.map(CreatureTraits::FireFly),
        }
    }
}

/// Extract every behaver from a registry into serializable form
fn serialize_behavers(registry: &BehaverRegistry) -> Vec<SerializableBehaver> {
    registry
        .behavers()
        .into_iter()
        .filter_map(|entity| registry.world().entity(entity).ok())
        .map(SerializableBehaver::from_entity)
        .collect()
}

/// Rebuild a registry from serialized behavers
fn deserialize_behavers(behavers: Vec<SerializableBehaver>) -> BehaverRegistry {
    let mut registry = BehaverRegistry::new();
    let mut skipped = 0;
    for sb in behavers {
        match sb.traits() {
            Some(traits) => {
                registry.spawn_with(traits);
            }
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("Skipped {} saved behavers with missing traits", skipped);
    }
    registry
}

/// Save every behaver in `registry` to a writer
pub fn save_population<W: Write>(writer: W, registry: &BehaverRegistry) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        behavers: serialize_behavers(registry),
    };

    bincode::serialize_into(writer, &save_data)?;
    log::info!("Saved {} behavers", save_data.behavers.len());
    Ok(())
}

/// Load a population from a reader
pub fn load_population<R: Read>(reader: R) -> Result<BehaverRegistry, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let registry = deserialize_behavers(save_data.behavers);
    log::info!("Loaded {} behavers", registry.count());
    Ok(registry)
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}
