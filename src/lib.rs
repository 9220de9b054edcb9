//! Petri - a cell-growth arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (progression, spawning, arena, timers)
//! - `settings`: Session configuration (user kind, seed, user count)
//!
//! The player cell roams a bounded dish collecting nutrients while a periodic
//! upkeep cost drains score. Reaching stage thresholds unlocks new spawn
//! behavior. Rendering and input devices live outside this crate; the sim is
//! driven through [`sim::tick`] with a [`sim::TickInput`] per frame.

pub mod settings;
pub mod sim;

pub use settings::{Settings, UserKind};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per second
    pub const TICK_RATE: u64 = 60;

    /// Dish dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player cell
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_RADIUS: f32 = 16.0;

    /// Roaming nutrient cells
    pub const ROAMER_RADIUS: f32 = 8.0;
    /// Velocity components sampled uniformly from ±this
    pub const ROAMER_MAX_SPEED: f32 = 50.0;
    /// Roamers pre-seeded at session start
    pub const INITIAL_ROAMERS: u32 = 10;

    /// Special resource cells
    pub const RESOURCE_RADIUS: f32 = 6.0;
    pub const RESOURCE_MAX_SPEED: f32 = 100.0;

    /// Score rewards
    pub const ROAMER_REWARD: i64 = 1;
    pub const RESOURCE_REWARD: i64 = 10;

    /// Passive income at max stage (per resource, per frame)
    pub const PASSIVE_GAIN_CHANCE: f64 = 0.5;
    pub const PASSIVE_GAIN_MIN: i64 = 5;
    pub const PASSIVE_GAIN_MAX: i64 = 10;

    /// Upkeep intervals by stage (seconds); stage 3+ disables upkeep
    pub const DECAY_STAGE1_SECS: u64 = 10;
    pub const DECAY_STAGE2_SECS: u64 = 20;

    /// Ambient roamer spawn interval range (seconds, sampled once per session)
    pub const AMBIENT_SPAWN_MIN_SECS: u64 = 5;
    pub const AMBIENT_SPAWN_MAX_SECS: u64 = 15;
    /// Special resource spawn interval (seconds)
    pub const RESOURCE_SPAWN_SECS: u64 = 5;
    /// Roamer velocity re-randomization interval (seconds)
    pub const VELOCITY_SHUFFLE_SECS: u64 = 1;
}

/// Convert a whole-second interval to simulation ticks
#[inline]
pub const fn secs_to_ticks(secs: u64) -> u64 {
    secs * consts::TICK_RATE
}
