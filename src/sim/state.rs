//! Session state aggregate
//!
//! One explicit mutable aggregate for everything the progression and spawn
//! logic reads or writes; no ambient globals. Lifetime = one game session.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::EntityKind;
use super::clock::TimerId;
use super::progression;
use crate::consts::*;
use crate::secs_to_ticks;
use crate::settings::{Settings, UserKind};

/// Interval between automatic score decrements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumptionRate {
    /// Upkeep fires every this many ticks
    Every(u64),
    /// No upkeep (max stage or dev mode)
    Disabled,
}

impl ConsumptionRate {
    pub fn ticks(&self) -> Option<u64> {
        match self {
            ConsumptionRate::Every(ticks) => Some(*ticks),
            ConsumptionRate::Disabled => None,
        }
    }
}

/// Events surfaced to the session layer (UI, game-over policy)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Stage increased by one (automatic, manual, or dev advance)
    StageAdvanced { from: u32, to: u32 },
    /// Score dropped below zero. Signalled once per crossing; re-armed only
    /// if the score recovers to non-negative.
    ResourceDepleted,
    /// Player collected an entity
    Collected { kind: EntityKind, reward: i64 },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// User mode, fixed for the session
    pub user_kind: UserKind,
    /// Connected user count (multi-user stub, stays at its configured value)
    pub total_users: u32,
    /// Current score; no floor, may go negative
    pub score: i64,
    /// Current stage, starts at 1, never decreases
    pub stage: u32,
    /// Current upkeep rate, re-derived on every stage change
    pub rate: ConsumptionRate,
    /// Whether a manual upgrade would succeed right now (recomputed per frame)
    pub upgrade_eligible: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Live decay timer, if any. At most one ever exists.
    pub decay_timer: Option<TimerId>,
    /// Ambient roamer spawn interval in ticks, sampled once at session start
    pub ambient_interval: u64,
    /// Depletion latch: true after signalling, until score recovers
    pub depletion_signalled: bool,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Session RNG
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl SessionState {
    /// Create session state from settings. Samples the ambient spawn interval
    /// once; it is reused for every ambient fire.
    pub fn new(settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let ambient_interval = rng.random_range(
            secs_to_ticks(AMBIENT_SPAWN_MIN_SECS)..=secs_to_ticks(AMBIENT_SPAWN_MAX_SECS),
        );

        Self {
            seed: settings.seed,
            user_kind: settings.user_kind,
            total_users: settings.total_users,
            score: 0,
            stage: 1,
            rate: progression::consumption_rate(1, settings.user_kind),
            upgrade_eligible: false,
            time_ticks: 0,
            decay_timer: None,
            ambient_interval,
            depletion_signalled: false,
            events: Vec::new(),
            rng,
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
