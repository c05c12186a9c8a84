//! SimNSerious Core - creatures and classroom experiments
//!
//! Builds the scene-level pieces of SimNSerious on top of the pure samplers
//! in `simnserious-sampling`, without any rendering or physics:
//! - **Registry**: behavers (frogs, observers, fireflies) stored as `hecs` entities
//! - **Profiles**: the preset distributions each species rolls its traits from
//! - **Behavior**: jump, thought and thrust decisions a host applies
//! - **Experiments**: random walkers, the two-ace deal and paint splatters
//!
//! # Example
//!
//! ```rust,no_run
//! use simnserious_core::prelude::*;
//!
//! let mut engine = LabEngine::new(LabConfig::default()).unwrap();
//!
//! // Fill the scene with creatures
//! engine.populate();
//!
//! // Step the walker toward the cursor and deal another batch of cards
//! loop {
//!     let report = engine.update((4.0, -2.0));
//!     println!("odds after frame {}: {:.4}", report.frame, report.odds);
//! }
//! ```

pub mod behavior;
pub mod components;
pub mod config;
pub mod engine;
pub mod experiments;
pub mod persistence;
pub mod profiles;
pub mod registry;
pub mod walker;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::LabConfig;
    pub use crate::engine::LabEngine;
    pub use crate::registry::BehaverRegistry;
}
