//! Headless session driver
//!
//! Runs a scripted session for a fixed duration and logs progression events.
//! Useful for balance checks and for watching the stage machine without a
//! renderer attached.
//!
//! Usage: petri [--dev] [--seed N] [--secs N] [--settings FILE]

use std::error::Error;
use std::path::PathBuf;

use glam::Vec2;

use petri::consts::{SIM_DT, TICK_RATE};
use petri::sim::{self, GameEvent, SessionState, TickInput, Timers, WorldArena};
use petri::{Settings, UserKind, secs_to_ticks};

fn parse_args() -> Result<(Settings, u64), Box<dyn Error>> {
    let mut settings = Settings::default();
    let mut secs = 120u64;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dev" => settings.user_kind = UserKind::Dev,
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                settings.seed = value.parse()?;
            }
            "--secs" => {
                let value = args.next().ok_or("--secs needs a value")?;
                secs = value.parse()?;
            }
            "--settings" => {
                let path = PathBuf::from(args.next().ok_or("--settings needs a path")?);
                settings = Settings::load(&path)?;
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
    }
    Ok((settings, secs))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let (settings, secs) = parse_args()?;

    let mut state = SessionState::new(&settings);
    let mut timers = Timers::new();
    let mut arena = WorldArena::default();
    sim::start(&mut state, &mut timers, &mut arena);

    let dev = settings.user_kind == UserKind::Dev;
    for t in 1..=secs_to_ticks(secs) {
        // Scripted wander: slow sweep around the dish
        let angle = t as f32 * SIM_DT * 0.4;
        let input = TickInput {
            move_dir: Vec2::new(angle.cos(), angle.sin()),
            // Dev script: advance a stage every 30 seconds
            confirm: dev && t % secs_to_ticks(30) == 0,
        };

        sim::tick(&mut state, &mut timers, &mut arena, &input);
        arena.step(SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::StageAdvanced { from, to } => {
                    log::info!("[{}s] stage {from} -> {to}", t / TICK_RATE);
                }
                GameEvent::ResourceDepleted => {
                    log::warn!("[{}s] resources depleted", t / TICK_RATE);
                }
                GameEvent::Collected { kind, reward } => {
                    log::debug!("[{}s] collected {kind:?} (+{reward})", t / TICK_RATE);
                }
            }
        }
    }

    println!(
        "session over: score={} stage={} after {}s (seed {})",
        state.score, state.stage, secs, state.seed
    );
    Ok(())
}
