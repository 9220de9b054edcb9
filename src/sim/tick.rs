//! Fixed timestep session tick
//!
//! One frame of the session: input edges, due timers, collection resolution,
//! and the per-frame progression checks, in that order. Stage changes fully
//! reconfigure the timer table before the next dispatch, so no timer callback
//! ever observes a half-applied stage. Arena kinematics (`WorldArena::step`)
//! are advanced by the caller after the tick.

use glam::Vec2;
use rand::Rng;

use super::arena::{Arena, EntityKind};
use super::clock::{TimerKind, Timers};
use super::progression;
use super::spawn;
use super::state::{GameEvent, SessionState};
use crate::consts::*;
use crate::secs_to_ticks;
use crate::settings::UserKind;

/// Input edges for a single tick. `confirm` must be sent on the key-down
/// edge only, never while held.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player steering direction (normalized internally; zero = stand still)
    pub move_dir: Vec2,
    /// Confirm edge: manual upgrade, or direct stage advance in dev mode
    pub confirm: bool,
}

/// Set up a fresh session: seed the starting population and schedule the
/// recurring timers. Call once before the first [`tick`].
pub fn start<A: Arena>(state: &mut SessionState, timers: &mut Timers, arena: &mut A) {
    spawn::seed_initial_roamers(state, arena);

    timers.every(state.time_ticks, state.ambient_interval, TimerKind::AmbientSpawn);
    timers.every(
        state.time_ticks,
        secs_to_ticks(RESOURCE_SPAWN_SECS),
        TimerKind::ResourceSpawn,
    );
    timers.every(
        state.time_ticks,
        secs_to_ticks(VELOCITY_SHUFFLE_SECS),
        TimerKind::VelocityShuffle,
    );
    progression::reschedule_decay(state, timers);

    log::info!(
        "session started: user={} users={} seed={} ambient={}t",
        state.user_kind.as_str(),
        state.total_users,
        state.seed,
        state.ambient_interval
    );
}

/// Advance the session by one frame
pub fn tick<A: Arena>(
    state: &mut SessionState,
    timers: &mut Timers,
    arena: &mut A,
    input: &TickInput,
) {
    state.time_ticks += 1;

    arena.set_player_velocity(input.move_dir.normalize_or_zero() * PLAYER_SPEED);

    // Confirm edge. Dev advances unconditionally; everyone else goes through
    // the eligibility gate, which clears immediately on use.
    if input.confirm {
        if state.user_kind == UserKind::Dev {
            progression::advance_stage(state, timers, arena);
        } else if state.upgrade_eligible {
            progression::advance_stage(state, timers, arena);
            state.upgrade_eligible = false;
        }
    }

    for kind in timers.due(state.time_ticks) {
        match kind {
            TimerKind::Decay => progression::decay_tick(state),
            TimerKind::AmbientSpawn => spawn::spawn_roamer(state, arena),
            TimerKind::ResourceSpawn => spawn::spawn_resources(state, arena),
            TimerKind::VelocityShuffle => spawn::shuffle_roamer_velocities(state, arena),
        }
    }

    resolve_collections(state, arena);
    progression::check_evolution(state, timers, arena);
    passive_gain(state, arena);

    state.upgrade_eligible =
        progression::upgrade_eligible(state.score, state.stage, state.total_users);
    if state.score >= 0 {
        state.depletion_signalled = false;
    }
}

/// Remove overlapped collectibles and grant their rewards. Removal is the
/// debounce: a removed handle can never re-trigger a reward.
fn resolve_collections<A: Arena>(state: &mut SessionState, arena: &mut A) {
    for (kind, reward) in [
        (EntityKind::Roamer, ROAMER_REWARD),
        (EntityKind::Resource, RESOURCE_REWARD),
    ] {
        for id in arena.player_overlaps(kind) {
            if arena.remove(id) {
                state.score += reward;
                state.push_event(GameEvent::Collected { kind, reward });
            }
        }
    }
}

/// Passive income at max stage: each live resource independently pays out
/// with fixed probability, every frame, without being consumed.
fn passive_gain<A: Arena>(state: &mut SessionState, arena: &mut A) {
    if state.stage < 3 {
        return;
    }
    for _ in arena.ids(EntityKind::Resource) {
        if state.rng.random_bool(PASSIVE_GAIN_CHANCE) {
            state.score += state.rng.random_range(PASSIVE_GAIN_MIN..=PASSIVE_GAIN_MAX);
        }
    }
}
