//! Behavior decisions for each species.
//!
//! These functions only decide; they never move anything. A host applies the
//! returned plan with whatever physics and timing it owns, then calls back
//! after `wait_seconds` for the next decision.

use hecs::Entity;
use simnserious_sampling::probability::chance;
use simnserious_sampling::RandomSource;

use crate::components::*;
use crate::profiles::{FrogProfile, ObserverProfile};
use crate::registry::BehaverRegistry;

/// Chance an observer picks a new place to walk to on each thought.
pub const CHANGE_POSITION_CHANCE: f32 = 0.7;

/// Chance an observer takes a picture on each thought.
pub const TAKE_PICTURE_CHANCE: f32 = 0.05;

/// Upward thrust multiplier for a firefly escaping liquid.
pub const LIQUID_LIFT_FACTOR: f32 = 1.5;

/// One frog jump: turn first, then leap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrogJump {
    pub turn_degrees: f32,
    pub force: f32,
    /// Launch angle above the horizon, in radians
    pub angle: f32,
    /// Seconds until the next jump is considered
    pub wait_seconds: f32,
}

impl FrogJump {
    /// Impulse split into `(up, forward)` components.
    pub fn impulse(&self) -> (f32, f32) {
        (self.force * self.angle.sin(), self.force * self.angle.cos())
    }
}

pub fn plan_frog_jump(profile: &FrogProfile, rng: &mut impl RandomSource) -> FrogJump {
    FrogJump {
        turn_degrees: profile.turn_angle.sample(rng),
        force: profile.jump_force.sample(rng),
        angle: profile.jump_angle.sample(rng),
        wait_seconds: profile.jump_interval.sample(rng),
    }
}

/// What an observer decided on one thought.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverThought {
    /// Another behaver to look at, if any exist
    pub focal_target: Option<Entity>,
    /// New walk target relative to the current position, on the ground plane `(x, z)`
    pub walk_offset: Option<(f32, f32)>,
    pub take_picture: bool,
    pub wait_seconds: f32,
}

pub fn plan_observer_thought(
    observer: Entity,
    registry: &BehaverRegistry,
    profile: &ObserverProfile,
    rng: &mut impl RandomSource,
) -> ObserverThought {
    let focal_target = registry.random_in_scene(&[observer], rng);

    let walk_offset = if chance(rng, CHANGE_POSITION_CHANCE) {
        // Left or right, back or forward, each a fresh distance.
        let x_sign = if rng.uniform_int(0, 2) == 1 { -1.0 } else { 1.0 };
        let z_sign = if rng.uniform_int(0, 2) == 1 { -1.0 } else { 1.0 };
        Some((
            x_sign * profile.walk_distance.sample(rng),
            z_sign * profile.walk_distance.sample(rng),
        ))
    } else {
        None
    };

    let take_picture = chance(rng, TAKE_PICTURE_CHANCE);

    ObserverThought {
        focal_target,
        walk_offset,
        take_picture,
        wait_seconds: profile.thought_interval.sample(rng),
    }
}

/// Force a firefly applies this physics step.
///
/// Inside liquid it only climbs; otherwise every axis wanders in
/// `[-max_acceleration, max_acceleration)`.
pub fn firefly_thrust(traits: &FireFlyTraits, in_liquid: bool, rng: &mut impl RandomSource) -> Vec3 {
    let max = traits.max_acceleration;
    if in_liquid {
        return Vec3::UP * (max * LIQUID_LIFT_FACTOR);
    }
    Vec3::new(
        rng.uniform_f32(-max, max),
        rng.uniform_f32(-max, max),
        rng.uniform_f32(-max, max),
    )
}
