//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID, timers by creation order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod clock;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arena::{Arena, EntityId, EntityKind, WorldArena};
pub use clock::{TimerId, TimerKind, Timers};
pub use progression::{StageRule, consumption_rate, stage_rule, upgrade_eligible};
pub use state::{ConsumptionRate, GameEvent, SessionState};
pub use tick::{TickInput, start, tick};
