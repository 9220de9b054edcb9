//! Spawn controller
//!
//! Decides entity population changes in response to time and stage. All
//! randomness comes from the session RNG so spawn sequences replay under the
//! same seed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::arena::{Arena, EntityKind};
use super::state::SessionState;
use crate::consts::*;

fn sample_velocity(rng: &mut Pcg32, max: f32) -> Vec2 {
    Vec2::new(rng.random_range(-max..=max), rng.random_range(-max..=max))
}

fn sample_position(rng: &mut Pcg32) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..=ARENA_WIDTH),
        rng.random_range(0.0..=ARENA_HEIGHT),
    )
}

/// Pre-seed the dish with the starting roamer population
pub fn seed_initial_roamers<A: Arena>(state: &mut SessionState, arena: &mut A) {
    for _ in 0..INITIAL_ROAMERS {
        spawn_roamer(state, arena);
    }
}

/// Ambient spawn: one roamer at a random in-bounds position
pub fn spawn_roamer<A: Arena>(state: &mut SessionState, arena: &mut A) {
    let pos = sample_position(&mut state.rng);
    let vel = sample_velocity(&mut state.rng, ROAMER_MAX_SPEED);
    arena.spawn(EntityKind::Roamer, pos, vel);
}

/// Duplication spawn, once per stage-enter event at stage 2 and above: one
/// extra cell at the player's position. It joins the roamer group and is
/// collectible like any other roamer.
pub fn spawn_duplicate<A: Arena>(state: &mut SessionState, arena: &mut A) {
    let pos = arena.player_pos();
    let vel = sample_velocity(&mut state.rng, ROAMER_MAX_SPEED);
    arena.spawn(EntityKind::Roamer, pos, vel);
    log::debug!("duplicated cell at {pos:?}");
}

/// Timed resource spawn: a stage-dependent batch at the player's position.
/// Nothing spawns below stage 2.
pub fn spawn_resources<A: Arena>(state: &mut SessionState, arena: &mut A) {
    if state.stage < 2 {
        return;
    }
    let count = if state.stage == 2 { 1 } else { 2 };
    let pos = arena.player_pos();
    for _ in 0..count {
        let vel = sample_velocity(&mut state.rng, RESOURCE_MAX_SPEED);
        arena.spawn(EntityKind::Resource, pos, vel);
    }
    log::debug!("spawned {count} resource cells at stage {}", state.stage);
}

/// Re-randomize every live roamer's velocity, duplication spawns included
pub fn shuffle_roamer_velocities<A: Arena>(state: &mut SessionState, arena: &mut A) {
    for id in arena.ids(EntityKind::Roamer) {
        let vel = sample_velocity(&mut state.rng, ROAMER_MAX_SPEED);
        arena.set_velocity(id, vel);
    }
}
