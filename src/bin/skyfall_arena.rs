//! Skyfall Arena - Headless Session Driver
//!
//! Run with: `cargo run --bin skyfall-arena`
//!
//! Drives the simulation core with a scripted pilot at a fixed 60 Hz step
//! and prints a per-second status line plus a final summary. Useful for
//! balance smoke-checks and profiling without a presentation layer.
//!
//! Options:
//! - `--seed <u64>`: fixed RNG seed (default 2024)
//! - `--seconds <f32>`: session length in simulated seconds (default 120)
//! - `--hard`: hard difficulty (faster spawns, airborne drop-ins)
//! - `--versus`: two scripted pilots dueling instead of survival
//! - `--balance <path>`: load a JSON balance table instead of the default
//! - `--arena <path>`: load a JSON arena config instead of the default

use std::env;
use std::path::Path;
use std::process;

use glam::{Vec2, Vec3};
use skyfall_engine::game::config::{self, ArenaConfig, BalanceConfig};
use skyfall_engine::{Difficulty, FrameInput, GameMode, GamePhase, GameState};

const STEP: f32 = 1.0 / 60.0;

struct Options {
    seed: u64,
    seconds: f32,
    difficulty: Difficulty,
    mode: GameMode,
    balance: BalanceConfig,
    arena: ArenaConfig,
}

fn parse_options() -> Result<Options, String> {
    let mut options = Options {
        seed: 2024,
        seconds: 120.0,
        difficulty: Difficulty::Normal,
        mode: GameMode::Survival,
        balance: BalanceConfig::default(),
        arena: ArenaConfig::default(),
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                options.seed = value.parse().map_err(|_| format!("bad seed: {value}"))?;
            }
            "--seconds" => {
                let value = args.next().ok_or("--seconds needs a value")?;
                options.seconds = value.parse().map_err(|_| format!("bad seconds: {value}"))?;
            }
            "--hard" => options.difficulty = Difficulty::Hard,
            "--versus" => options.mode = GameMode::Versus,
            "--balance" => {
                let path = args.next().ok_or("--balance needs a path")?;
                options.balance = config::load_config(Path::new(&path))
                    .map_err(|e| format!("balance config: {e}"))?;
            }
            "--arena" => {
                let path = args.next().ok_or("--arena needs a path")?;
                options.arena = config::load_config(Path::new(&path))
                    .map_err(|e| format!("arena config: {e}"))?;
            }
            other => return Err(format!("unknown option: {other}")),
        }
    }
    Ok(options)
}

/// Scripted pilot: orbit the arena center, aim at the nearest hostile,
/// hold fire, and dash on a fixed cadence.
fn pilot_input(state: &GameState, slot: usize, t: f32) -> FrameInput {
    let mut input = FrameInput::default();
    let me = &state.combatants()[slot];

    // Circle-strafe around the center at a comfortable radius.
    let orbit = Vec2::new((t * 0.4).cos(), (t * 0.4).sin());
    let target_pos = orbit * 18.0;
    let to_orbit = target_pos - Vec2::new(me.position.x, me.position.z);
    input.players[slot].move_dir = to_orbit;

    // Aim at the nearest enemy, or the opponent in versus.
    let aim = state
        .enemies()
        .map(|e| e.position)
        .chain(
            state
                .combatants()
                .iter()
                .filter(|c| c.id != me.id)
                .map(|c| c.position),
        )
        .min_by(|a, b| {
            a.distance_squared(me.position)
                .total_cmp(&b.distance_squared(me.position))
        })
        .unwrap_or(Vec3::new(0.0, 0.0, -10.0));
    input.players[slot].aim_point = aim;
    input.players[slot].fire_held = true;
    input.players[slot].dash_pressed = (t % 2.5) < STEP;

    input
}

fn merge(a: FrameInput, b: FrameInput) -> FrameInput {
    let mut merged = a;
    merged.players[1] = b.players[1];
    merged
}

fn main() {
    let options = match parse_options() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("skyfall-arena: {message}");
            process::exit(2);
        }
    };

    let mut state = GameState::with_configs(options.balance, options.arena, options.seed);
    state.start_game(options.mode, options.difficulty);
    println!(
        "skyfall-arena: {:?} / {:?}, seed {}, {}s @ 60 Hz",
        options.mode, options.difficulty, options.seed, options.seconds
    );

    let steps = (options.seconds / STEP) as u32;
    let mut next_report = 1.0;
    for step in 0..steps {
        let t = step as f32 * STEP;
        let mut input = pilot_input(&state, 0, t);
        if options.mode == GameMode::Versus {
            // Second pilot runs the same script with a phase offset.
            input = merge(input, pilot_input(&state, 1, t + 1.3));
        }
        state.update(STEP, &input);

        match state.phase() {
            GamePhase::GameOver => {
                println!("pilot down at t={t:.1}s");
                break;
            }
            GamePhase::VersusResult(winner) => {
                println!("duel over at t={t:.1}s, winner: {winner:?}");
                break;
            }
            _ => {}
        }

        if state.game_time >= next_report {
            next_report += 1.0;
            let view = state.frame_view();
            let me = &view.combatants[0];
            println!(
                "t={:6.1}s stage {} kills {}/{} enemies {:3} bullets {:3} hp {:3}/{:3} lvl {}",
                state.game_time,
                view.hud.stage,
                view.hud.stage_kills,
                view.hud.kills_required,
                view.enemies.len(),
                view.bullets.len(),
                me.hp,
                me.max_hp,
                me.level,
            );
        }
    }

    let view = state.frame_view();
    println!(
        "done: phase {:?}, stage {}, time {:.1}s",
        view.phase, view.hud.stage, state.game_time
    );
}
