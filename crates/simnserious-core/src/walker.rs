//! Random walkers on an integer grid.
//!
//! A [`Walker`] keeps one chance table per axis over the moves `-1`, `0` and
//! `+1`, and rolls both every step. A [`FollowWalker`] sometimes ignores its
//! tables and steps toward a target point instead.

use serde::{Deserialize, Serialize};
use simnserious_sampling::probability::chance;
use simnserious_sampling::{ChanceTable, RandomSource};

use crate::components::GridPosition;

/// Relative weights of each move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerWeights {
    /// Weight of staying put, shared by both axes
    pub no_move: f64,
    pub left: f64,
    pub right: f64,
    pub up: f64,
    pub down: f64,
}

impl Default for WalkerWeights {
    fn default() -> Self {
        Self {
            no_move: 1.0,
            left: 1.0,
            right: 1.0,
            up: 1.0,
            down: 1.0,
        }
    }
}

/// A grid walker driven by per-axis chance tables
#[derive(Debug, Clone)]
pub struct Walker {
    horizontal: ChanceTable<i32>,
    vertical: ChanceTable<i32>,
    position: GridPosition,
}

impl Walker {
    pub fn new(weights: &WalkerWeights) -> Self {
        let mut horizontal = ChanceTable::with_capacity(3);
        horizontal.add_outcome(-1, weights.left);
        horizontal.add_outcome(0, weights.no_move);
        horizontal.add_outcome(1, weights.right);

        let mut vertical = ChanceTable::with_capacity(3);
        vertical.add_outcome(-1, weights.down);
        vertical.add_outcome(0, weights.no_move);
        vertical.add_outcome(1, weights.up);

        log::debug!("Horizontal chance table: {}", horizontal);
        log::debug!("Vertical chance table: {}", vertical);

        Self {
            horizontal,
            vertical,
            position: GridPosition::ORIGIN,
        }
    }

    /// Take one random step and return the new position
    pub fn step(&mut self, rng: &mut impl RandomSource) -> GridPosition {
        self.position.x += self.horizontal.roll(rng).copied().unwrap_or(0);
        self.position.y += self.vertical.roll(rng).copied().unwrap_or(0);
        self.position
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    pub fn set_position(&mut self, position: GridPosition) {
        self.position = position;
    }

    pub fn horizontal_table(&self) -> &ChanceTable<i32> {
        &self.horizontal
    }

    pub fn vertical_table(&self) -> &ChanceTable<i32> {
        &self.vertical
    }
}

/// A walker that is drawn toward a target some of the time
#[derive(Debug, Clone)]
pub struct FollowWalker {
    walker: Walker,
    chance_to_follow: f32,
}

impl FollowWalker {
    pub fn new(weights: &WalkerWeights, chance_to_follow: f32) -> Self {
        Self {
            walker: Walker::new(weights),
            chance_to_follow: chance_to_follow.clamp(0.0, 1.0),
        }
    }

    /// Step toward `target` with the follow chance, otherwise step randomly.
    ///
    /// Following always moves one cell on both axes; a target exactly level
    /// with the walker on an axis still moves it in the positive direction.
    pub fn step(&mut self, target: (f32, f32), rng: &mut impl RandomSource) -> GridPosition {
        if !chance(rng, self.chance_to_follow) {
            return self.walker.step(rng);
        }

        let mut position = self.walker.position();
        position.x += if target.0 < position.x as f32 { -1 } else { 1 };
        position.y += if target.1 < position.y as f32 { -1 } else { 1 };
        self.walker.set_position(position);
        position
    }

    pub fn position(&self) -> GridPosition {
        self.walker.position()
    }

    pub fn chance_to_follow(&self) -> f32 {
        self.chance_to_follow
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }
}
