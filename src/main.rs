//! Rayboing entry point
//!
//! Runs a level headless on autopilot at the fixed frame rate and logs the
//! outcome. A presentation layer drives the same `tick` with real input.

use std::path::Path;

use anyhow::ensure;

use rayboing::Settings;
use rayboing::assets::{Assets, PathLoader};
use rayboing::consts::*;
use rayboing::level::FsLevelSource;
use rayboing::sim::{GameEvent, GameMode, GameSession, TickInput, tick};

/// Simulated frames before giving up (ten minutes of play)
const MAX_FRAMES: u64 = 60 * 60 * 10;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [level-file]", args[0]);
        std::process::exit(2);
    }

    let settings = Settings::load_or_default(Settings::FILE_NAME);
    let level = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| settings.default_level.clone());
    ensure!(
        Path::new(&level).is_file(),
        "Level file {level} does not exist"
    );

    log::info!("Rayboing starting with {level} (seed {})", settings.seed);

    // Headless runs draw nothing, so a partial resource tree only warrants a warning
    let (_assets, complete) = Assets::load(&mut PathLoader, &settings.resource_root);
    if !complete {
        log::warn!(
            "Resource tree under {} is incomplete; a windowed build would refuse to start",
            settings.resource_root
        );
    }

    let mut session = GameSession::new(settings, FsLevelSource, level);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    while session.mode != GameMode::Exit && session.time_ticks < MAX_FRAMES {
        tick(&mut session, &input, FRAME_DT);
        for event in session.drain_events() {
            match event {
                GameEvent::ModeChanged(mode) => {
                    let hud = session.hud();
                    log::info!(
                        "{:?}: level {} {:?}, score {}, lives {}, {} blocks left",
                        mode,
                        hud.level_number,
                        hud.level_title,
                        hud.score,
                        hud.lives,
                        hud.blocks_remaining
                    );
                    if let Some(message) = hud.status_message() {
                        log::info!("{message}");
                    }
                }
                GameEvent::Sound(sound) => log::trace!("Sound {sound:?}"),
            }
        }
    }

    if let Some(e) = session.load_error.take() {
        return Err(e.context("Game stopped on a level load failure"));
    }

    let hud = session.hud();
    log::info!(
        "Finished after {} frames in {:?}: score {}, level {}",
        session.time_ticks,
        hud.mode,
        hud.score,
        hud.level_number
    );
    Ok(())
}
