//! Dust Arena headless simulator
//!
//! Runs the desert yard for a fixed number of 60 Hz frames with a scripted
//! player: capture the pointer, sweep the view across the targets while
//! firing, walk a short loop and jump now and then.
//!
//! Run with: cargo run --bin dust-sim -- [frames]

use dust_runtime::prelude::*;
use std::process::ExitCode;

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 600;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let frames = match frame_count(std::env::args().nth(1).as_deref()) {
        Some(frames) => frames,
        None => return ExitCode::FAILURE,
    };

    let config = match GameConfig::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut world = match GameWorld::new(config, &Arena::dust_yard()) {
        Ok(world) => world,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Simulating {} frames", frames);
    let mut shots = 0u32;
    for frame in 0..frames {
        let input = scripted_input(frame);
        let report = world.update(FRAME_DT, &input);

        if report.fired.is_some() {
            shots += 1;
        }
        for hit in &report.hits {
            log::info!(
                "Frame {}: projectile {:?} hit target {:?}",
                report.frame,
                hit.slot,
                hit.target
            );
        }
        if frame % 120 == 0 {
            log::debug!("{}", world.debug_info());
        }
    }

    let p = world.player().position;
    log::info!(
        "Done: {} frames ({:.1}s), {} shots, {} targets destroyed, {} left",
        world.frame(),
        world.elapsed(),
        shots,
        world.destroyed_count(),
        world.targets().alive_count()
    );
    log::info!("Final player position ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);

    ExitCode::SUCCESS
}

/// Frames to run: the default when no argument is given, `None` when it is
/// not a positive integer
fn frame_count(arg: Option<&str>) -> Option<u64> {
    let Some(arg) = arg else {
        return Some(DEFAULT_FRAMES);
    };
    match arg.parse::<u64>() {
        Ok(frames) if frames > 0 => Some(frames),
        _ => {
            log::error!("Frame count must be a positive integer, got {:?}", arg);
            None
        }
    }
}

/// Input for a given frame of the demo script
fn scripted_input(frame: u64) -> InputState {
    let mut input = InputState::idle();

    if frame == 0 {
        return input.with_capture(true);
    }

    // Sweep the view left and right across the field
    let sweep = if matches!((frame / 90) % 4, 0 | 3) { -4.0 } else { 4.0 };
    input = input.with_look(sweep, 0.0);

    if frame % 12 == 0 {
        input = input.with_fire();
    }

    // Walk a loop: forward, strafe right, back, strafe left
    match (frame / 60) % 4 {
        0 => input.forward = true,
        1 => input.right = true,
        2 => input.backward = true,
        _ => input.left = true,
    }

    if frame % 150 == 75 {
        input = input.with_jump();
    }

    input
}
