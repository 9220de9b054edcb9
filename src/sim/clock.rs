//! Recurring timer table
//!
//! The sim schedules its periodic work (upkeep, spawns, velocity shuffles)
//! through an explicit timer table rather than callbacks. Timer identity is
//! plain data so a superseded timer can be positively cancelled; a cancelled
//! timer can never fire again. Dispatch order is creation order, which keeps
//! the sim deterministic.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerId(u32);

/// What a timer drives when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Periodic score upkeep (stage/user dependent)
    Decay,
    /// Ambient roamer spawn
    AmbientSpawn,
    /// Special resource spawn
    ResourceSpawn,
    /// Roamer velocity re-randomization
    VelocityShuffle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    interval: u64,
    next_fire: u64,
}

/// Table of live recurring timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    timers: Vec<Timer>,
    next_id: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a recurring timer. The first fire is a full `interval` after
    /// `now`, so re-creating a timer restarts its countdown.
    pub fn every(&mut self, now: u64, interval: u64, kind: TimerKind) -> TimerId {
        debug_assert!(interval > 0, "zero-interval timer");
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            kind,
            interval,
            next_fire: now + interval,
        });
        id
    }

    /// Remove a timer from the table. Returns false if it was not alive.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        before != self.timers.len()
    }

    /// Collect all timers due at `now`, advancing their next fire time.
    /// Fires are returned in timer-creation order.
    pub fn due(&mut self, now: u64) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            while timer.next_fire <= now {
                fired.push(timer.kind);
                timer.next_fire += timer.interval;
            }
        }
        fired
    }

    /// Is this timer still alive?
    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Number of live timers of a given kind
    pub fn count(&self, kind: TimerKind) -> usize {
        self.timers.iter().filter(|t| t.kind == kind).count()
    }
}
