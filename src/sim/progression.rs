//! Progression engine
//!
//! State machine over the session stage. Transitions come from two places:
//! the per-frame automatic check against the evolution threshold, and the
//! edge-triggered manual upgrade (handled in `tick`). Entering a stage
//! re-derives the upkeep rate, swaps the decay timer, and triggers the
//! duplication spawn.

use super::arena::Arena;
use super::clock::{TimerKind, Timers};
use super::spawn;
use super::state::{ConsumptionRate, GameEvent, SessionState};
use crate::consts::*;
use crate::secs_to_ticks;
use crate::settings::UserKind;

/// Requirements to advance past a stage
#[derive(Debug, Clone, Copy)]
pub struct StageRule {
    /// Score required
    pub threshold: i64,
    /// Connected users required for a manual upgrade
    pub users_required: u32,
}

/// Evolution table, indexed by current stage. Stages past the table never
/// advance automatically and are never upgrade-eligible; they are reachable
/// only through the dev advance and reuse stage-3 behavior.
pub const STAGE_RULES: [StageRule; 3] = [
    StageRule { threshold: 30, users_required: 2 },
    StageRule { threshold: 50, users_required: 3 },
    StageRule { threshold: 100, users_required: 5 },
];

/// Rule for advancing from `stage`, if the table defines one
pub fn stage_rule(stage: u32) -> Option<&'static StageRule> {
    stage
        .checked_sub(1)
        .and_then(|i| STAGE_RULES.get(i as usize))
}

/// Upkeep interval as a pure function of stage and user kind
pub fn consumption_rate(stage: u32, user_kind: UserKind) -> ConsumptionRate {
    if user_kind == UserKind::Dev {
        return ConsumptionRate::Disabled;
    }
    match stage {
        1 => ConsumptionRate::Every(secs_to_ticks(DECAY_STAGE1_SECS)),
        2 => ConsumptionRate::Every(secs_to_ticks(DECAY_STAGE2_SECS)),
        _ => ConsumptionRate::Disabled,
    }
}

/// Would a manual upgrade succeed? Pure, safe to call every frame.
pub fn upgrade_eligible(score: i64, stage: u32, total_users: u32) -> bool {
    stage_rule(stage).is_some_and(|rule| score >= rule.threshold && total_users >= rule.users_required)
}

/// Per-frame automatic advance: threshold met and enough users (dev bypasses
/// the user gate). At most one advance per frame.
pub fn check_evolution<A: Arena>(state: &mut SessionState, timers: &mut Timers, arena: &mut A) {
    let Some(rule) = stage_rule(state.stage) else {
        return;
    };
    let users_ok = state.total_users >= state.stage + 1 || state.user_kind == UserKind::Dev;
    if state.score >= rule.threshold && users_ok {
        advance_stage(state, timers, arena);
    }
}

/// Advance the stage by exactly one and run the stage-enter effects.
pub fn advance_stage<A: Arena>(state: &mut SessionState, timers: &mut Timers, arena: &mut A) {
    let from = state.stage;
    state.stage += 1;
    on_stage_enter(state, timers, arena);
    state.push_event(GameEvent::StageAdvanced { from, to: state.stage });
    log::info!(
        "stage {} -> {} (score {}, rate {:?})",
        from,
        state.stage,
        state.score,
        state.rate
    );
}

/// Stage-enter effects, run exactly once per transition: re-derive the upkeep
/// rate, swap the decay timer, and duplicate a cell at stage 2 and above.
fn on_stage_enter<A: Arena>(state: &mut SessionState, timers: &mut Timers, arena: &mut A) {
    state.rate = consumption_rate(state.stage, state.user_kind);
    reschedule_decay(state, timers);
    if state.stage >= 2 {
        spawn::spawn_duplicate(state, arena);
    }
}

/// Replace the decay timer to match the current rate. The old timer is
/// positively cancelled; a new one starts a fresh countdown.
pub fn reschedule_decay(state: &mut SessionState, timers: &mut Timers) {
    if let Some(id) = state.decay_timer.take() {
        timers.cancel(id);
    }
    if let Some(interval) = state.rate.ticks() {
        state.decay_timer = Some(timers.every(state.time_ticks, interval, TimerKind::Decay));
    }
}

/// One upkeep fire: score drops by one. Crossing below zero signals
/// depletion once; the latch re-arms only if the score recovers.
pub fn decay_tick(state: &mut SessionState) {
    state.score -= 1;
    if state.score < 0 && !state.depletion_signalled {
        state.depletion_signalled = true;
        state.push_event(GameEvent::ResourceDepleted);
        log::warn!("resources depleted (score {})", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::arena::{EntityKind, WorldArena};
    use crate::settings::Settings;
    use proptest::prelude::*;

    fn dev_settings() -> Settings {
        Settings {
            user_kind: UserKind::Dev,
            ..Settings::default()
        }
    }

    #[test]
    fn test_consumption_rate_table() {
        let s1 = secs_to_ticks(DECAY_STAGE1_SECS);
        let s2 = secs_to_ticks(DECAY_STAGE2_SECS);
        assert_eq!(consumption_rate(1, UserKind::Normal), ConsumptionRate::Every(s1));
        assert_eq!(consumption_rate(2, UserKind::Normal), ConsumptionRate::Every(s2));
        assert_eq!(consumption_rate(3, UserKind::Normal), ConsumptionRate::Disabled);
        assert_eq!(consumption_rate(7, UserKind::Normal), ConsumptionRate::Disabled);
        // Dev never pays upkeep, at any stage
        for stage in 1..5 {
            assert_eq!(consumption_rate(stage, UserKind::Dev), ConsumptionRate::Disabled);
        }
    }

    #[test]
    fn test_upgrade_eligibility() {
        assert!(upgrade_eligible(30, 1, 2));
        assert!(!upgrade_eligible(29, 1, 2));
        // Score meets stage 2's threshold, but at stage 3 only stage 3's
        // rule counts
        assert!(!upgrade_eligible(50, 3, 5));
        // User gate
        assert!(!upgrade_eligible(30, 1, 1));
        // Past the table: never eligible
        assert!(!upgrade_eligible(1_000_000, 4, 100));
        assert!(!upgrade_eligible(10, 0, 10));
    }

    #[test]
    fn test_auto_advance_requires_threshold_and_users() {
        let mut state = SessionState::new(&Settings {
            total_users: 2,
            ..Settings::default()
        });
        let mut timers = Timers::new();
        let mut arena = WorldArena::default();

        state.score = 29;
        check_evolution(&mut state, &mut timers, &mut arena);
        assert_eq!(state.stage, 1);

        state.score = 30;
        check_evolution(&mut state, &mut timers, &mut arena);
        assert_eq!(state.stage, 2);

        // One advance per frame, even with a huge score
        state.score = 1000;
        state.total_users = 10;
        check_evolution(&mut state, &mut timers, &mut arena);
        assert_eq!(state.stage, 3);
    }

    #[test]
    fn test_auto_advance_user_gate_blocked_at_default_count() {
        let mut state = SessionState::new(&Settings::default());
        let mut timers = Timers::new();
        let mut arena = WorldArena::default();

        // total_users = 1 < stage + 1: the gate holds regardless of score
        state.score = 500;
        check_evolution(&mut state, &mut timers, &mut arena);
        assert_eq!(state.stage, 1);
    }

    #[test]
    fn test_dev_bypasses_user_gate() {
        let mut state = SessionState::new(&dev_settings());
        let mut timers = Timers::new();
        let mut arena = WorldArena::default();

        state.score = 30;
        check_evolution(&mut state, &mut timers, &mut arena);
        assert_eq!(state.stage, 2);
    }

    #[test]
    fn test_stage_enter_swaps_decay_timer() {
        let mut state = SessionState::new(&Settings::default());
        let mut timers = Timers::new();
        let mut arena = WorldArena::default();
        reschedule_decay(&mut state, &mut timers);

        let stage1_timer = state.decay_timer.unwrap();
        assert_eq!(timers.count(TimerKind::Decay), 1);

        advance_stage(&mut state, &mut timers, &mut arena);
        let stage2_timer = state.decay_timer.unwrap();
        assert_ne!(stage1_timer, stage2_timer);
        assert!(!timers.contains(stage1_timer));
        assert_eq!(timers.count(TimerKind::Decay), 1);

        // Stage 3: upkeep stops, no timer remains
        advance_stage(&mut state, &mut timers, &mut arena);
        assert!(state.decay_timer.is_none());
        assert_eq!(timers.count(TimerKind::Decay), 0);
    }

    #[test]
    fn test_dev_never_gets_decay_timer() {
        let mut state = SessionState::new(&dev_settings());
        let mut timers = Timers::new();
        reschedule_decay(&mut state, &mut timers);
        assert!(state.decay_timer.is_none());
        assert_eq!(timers.count(TimerKind::Decay), 0);
    }

    #[test]
    fn test_stage_enter_duplicates_cell_from_stage_two() {
        let mut state = SessionState::new(&Settings::default());
        let mut timers = Timers::new();
        let mut arena = WorldArena::default();

        advance_stage(&mut state, &mut timers, &mut arena);
        assert_eq!(arena.count(EntityKind::Roamer), 1);

        advance_stage(&mut state, &mut timers, &mut arena);
        assert_eq!(arena.count(EntityKind::Roamer), 2);
    }

    #[test]
    fn test_depletion_signalled_once_at_crossing() {
        let mut state = SessionState::new(&Settings::default());

        decay_tick(&mut state);
        assert_eq!(state.score, -1);
        assert_eq!(state.drain_events(), vec![GameEvent::ResourceDepleted]);

        decay_tick(&mut state);
        decay_tick(&mut state);
        assert_eq!(state.score, -3);
        assert!(state.drain_events().is_empty(), "depletion repeated");
    }

    proptest! {
        #[test]
        fn prop_eligibility_monotone_in_score(
            score in -100i64..200,
            bump in 0i64..100,
            stage in 1u32..4,
            users in 0u32..8,
        ) {
            // More score never revokes eligibility at a fixed stage
            if upgrade_eligible(score, stage, users) {
                prop_assert!(upgrade_eligible(score + bump, stage, users));
            }
        }

        #[test]
        fn prop_rate_total_and_dev_disabled(stage in 0u32..10) {
            // The rate function is total and dev always disables upkeep
            let _ = consumption_rate(stage, UserKind::Normal);
            prop_assert_eq!(
                consumption_rate(stage, UserKind::Dev),
                ConsumptionRate::Disabled
            );
        }
    }
}
