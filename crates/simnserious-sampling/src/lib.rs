//! Pure random-sampling logic for SimNSerious.
//!
//! This crate contains the sampling core that the creature traits and the
//! classroom experiments are built on. Nothing here touches an engine, a
//! scene, or the filesystem: every operation takes its randomness from an
//! injected [`random::RandomSource`] and returns plain data, so it can be
//! driven by a seeded `StdRng` in tests and by any host at runtime.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`chance_table`] | Weighted outcome table with roll (with replacement) and draw (without) |
//! | [`distribution`] | Arbitrary-curve continuous sampler backed by a precomputed bar graph |
//! | [`error`] | Construction and lookup errors |
//! | [`list_utils`] | Fisher–Yates shuffle and list negation |
//! | [`probability`] | Single-chance rolls and bounded pseudo-Gaussian sampling |
//! | [`random`] | The uniform random primitive the host supplies |
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use simnserious_sampling::chance_table::ChanceTable;
//! use simnserious_sampling::distribution::Distribution;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! // Small jumps are unlikely.
//! let jump_force = Distribution::new(|x| x * x, 1.0, 2.0, 50).unwrap();
//! let force = jump_force.sample(&mut rng);
//! assert!((1.0..2.0).contains(&force));
//!
//! let mut deck: ChanceTable<bool> = ChanceTable::new();
//! deck.add_outcome(true, 4.0);
//! deck.add_outcome(false, 48.0);
//! let _card = deck.draw(&mut rng);
//! ```

pub mod chance_table;
pub mod distribution;
pub mod error;
pub mod list_utils;
pub mod probability;
pub mod random;

pub use chance_table::ChanceTable;
pub use distribution::Distribution;
pub use error::SamplingError;
pub use random::RandomSource;
