//! Classroom probability experiments.
//!
//! - The ace experiment deals two cards without replacement from a fresh
//!   52-card deck and counts how often both are aces.
//! - The paint splatter scatters spots with bounded pseudo-Gaussian offsets
//!   and sizes.

use serde::{Deserialize, Serialize};
use simnserious_sampling::probability::next_gaussian;
use simnserious_sampling::{ChanceTable, RandomSource};

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Aces in a standard deck.
pub const ACES: usize = 4;

/// Exact probability of drawing two aces in a row: 4/52 × 3/51.
pub const EXPECTED_TWO_ACE_ODDS: f64 = (4.0 / 52.0) * (3.0 / 51.0);

/// A fresh deck where `true` marks an ace
pub fn ace_deck() -> ChanceTable<bool> {
    let mut deck = ChanceTable::with_capacity(DECK_SIZE);
    for _ in 0..DECK_SIZE - ACES {
        deck.add_outcome(false, 1.0);
    }
    for _ in 0..ACES {
        deck.add_outcome(true, 1.0);
    }
    deck
}

/// Deal two cards from a fresh deck; true when both are aces
pub fn draws_two_aces(rng: &mut impl RandomSource) -> bool {
    let mut deck = ace_deck();
    deck.draw(rng) == Some(true) && deck.draw(rng) == Some(true)
}

/// Running tally of the ace experiment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AceExperiment {
    pub runs: u64,
    pub occurrences: u64,
}

impl AceExperiment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `count` more deals, returning how many hit two aces
    pub fn run_batch(&mut self, count: u32, rng: &mut impl RandomSource) -> u32 {
        let mut hits = 0;
        for _ in 0..count {
            if draws_two_aces(rng) {
                hits += 1;
            }
        }
        self.runs += count as u64;
        self.occurrences += hits as u64;
        hits
    }

    /// Observed odds so far, 0 before any run
    pub fn odds(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.occurrences as f64 / self.runs as f64
        }
    }

    /// Distance of the observed odds from the exact answer
    pub fn error(&self) -> f64 {
        (self.odds() - EXPECTED_TWO_ACE_ODDS).abs()
    }
}

/// Parameters of one paint splatter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplatterConfig {
    /// Fewest spots per splatter (inclusive)
    pub min_spots: i32,
    /// Most spots per splatter (exclusive)
    pub max_spots: i32,
    /// Spots land within `[-spread, spread)` before scaling
    pub spread: f32,
    pub spread_deviation: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub size_deviation: f32,
}

impl Default for SplatterConfig {
    fn default() -> Self {
        Self {
            min_spots: 10,
            max_spots: 30,
            spread: 8.0,
            spread_deviation: 0.5,
            min_size: 0.5,
            max_size: 1.5,
            size_deviation: 1.0,
        }
    }
}

/// One spot of paint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintSpot {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// Scatter one splatter's worth of spots
pub fn splatter(config: &SplatterConfig, rng: &mut impl RandomSource) -> Vec<PaintSpot> {
    let count = rng.uniform_int(config.min_spots, config.max_spots).max(0);
    (0..count)
        .map(|_| PaintSpot {
            x: next_gaussian(rng, -config.spread, config.spread, config.spread_deviation, 0.0),
            y: next_gaussian(rng, -config.spread, config.spread, config.spread_deviation, 0.0),
            scale: next_gaussian(rng, config.min_size, config.max_size, config.size_deviation, 0.0),
        })
        .collect()
}
