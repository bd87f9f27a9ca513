//! Per-frame game update
//!
//! [`tick`] dispatches on the session's mode. Within `Play` the order is
//! fixed: input, paddle, gauge or ball, collision outcomes, then the mode
//! transition check.

use super::ball::BallStep;
use super::paddle::MoveDir;
use super::state::{GameMode, GameSession};
use crate::assets::SoundId;
use crate::level::next_level_path;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Absolute pointer X (mouse/touch)
    pub pointer_x: Option<f32>,
    /// Primary action: release the ball
    pub launch: bool,
    /// Move on after a win
    pub confirm: bool,
    /// Try again after a loss or cancel
    pub restart: bool,
    pub quit: bool,
    /// Demo mode: the game plays itself
    pub autopilot: bool,
}

impl TickInput {
    fn move_dir(&self) -> MoveDir {
        match (self.move_left, self.move_right) {
            (true, false) => MoveDir::Left,
            (false, true) => MoveDir::Right,
            _ => MoveDir::None,
        }
    }
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    session.time_ticks += 1;

    let input = if input.autopilot {
        autopilot_input(session, input)
    } else {
        input.clone()
    };

    match session.mode {
        GameMode::InitGame => run_init(session),
        GameMode::Play => run_play(session, &input, dt),
        GameMode::Win | GameMode::Lose | GameMode::Cancel => run_end(session, &input),
        GameMode::Exit => {}
    }
}

/// Load (if needed) and start an attempt at `pending_level`
fn run_init(session: &mut GameSession) {
    let new_level = session.level_path.as_deref() != Some(session.pending_level.as_str());

    if session.lives == 0 || new_level {
        if let Err(e) = session.load_pending_level() {
            log::error!("{e:#}");
            session.load_error = Some(e);
            session.set_mode(GameMode::Exit);
            return;
        }
        session.lives = session.settings.initial_lives;
        session.score.reset();
    }

    // Each attempt costs a life up front
    session.lives = session.lives.saturating_sub(1);
    session.reset_attempt();
    session.set_mode(GameMode::Play);
}

fn run_play(session: &mut GameSession, input: &TickInput, dt: f32) {
    if input.quit {
        session.lives = 0;
        session.set_mode(GameMode::Cancel);
        return;
    }

    session.paddle.move_dir(input.move_dir(), dt);
    if let Some(x) = input.pointer_x {
        session.paddle.set_position(x);
    }

    if session.ball.is_unlaunched() {
        session.gauge.update(dt);
        if input.launch && session.ball.release(session.gauge.launch_angle()) {
            session.play_sound(SoundId::BallShot);
            session.gauge.reset();
        }
    }

    let step = session.ball.update(
        dt,
        &session.arena,
        &mut session.paddle,
        &mut session.grid,
        &mut session.rng,
    );
    apply_step(session, &step);

    if step.lost {
        session.play_sound(SoundId::BallLost);
        if session.lives == 0 {
            session.play_sound(SoundId::GameOver);
        }
        session.set_mode(GameMode::Lose);
    } else if session.grid.remaining() == 0 {
        session.play_sound(SoundId::Applause);
        log::info!("Level {:?} cleared, score {}", session.level_title, session.score.value());
        session.set_mode(GameMode::Win);
    }
}

/// Sounds and score for one ball step
fn apply_step(session: &mut GameSession, step: &BallStep) {
    if step.wall_bounce {
        session.play_sound(SoundId::Boing);
    }
    if step.paddle_hit {
        session.play_sound(SoundId::Paddle);
    }
    if let Some(activation) = &step.block {
        if let Some(sound) = activation.sound() {
            session.play_sound(sound);
        }
        if activation.scores() {
            session.score.add(session.settings.score_per_block);
        }
    }
}

/// Win/Lose/Cancel: wait for the player
fn run_end(session: &mut GameSession, input: &TickInput) {
    if input.quit {
        session.set_mode(GameMode::Exit);
        return;
    }

    match session.mode {
        GameMode::Win if input.confirm => {
            let next = session
                .level_path
                .as_deref()
                .and_then(next_level_path)
                .filter(|path| session.source.exists(path));
            match next {
                Some(path) => {
                    log::info!("Advancing to {path}");
                    session.lives = 0;
                    session.pending_level = path;
                    run_init(session);
                }
                None => {
                    log::info!("No next level, exiting");
                    session.set_mode(GameMode::Exit);
                }
            }
        }
        GameMode::Lose | GameMode::Cancel if input.restart => {
            if let Some(path) = session.level_path.clone() {
                session.pending_level = path;
            }
            run_init(session);
        }
        _ => {}
    }
}

/// Demo input: launch at once, follow the ball, and accept every prompt
fn autopilot_input(session: &GameSession, input: &TickInput) -> TickInput {
    let mut input = input.clone();

    match session.mode {
        GameMode::Play => {
            input.launch = session.ball.is_unlaunched();
            // Wander around the ball so the paddle angle varies
            let t = session.time_ticks as f32 * 0.02;
            let wobble = (t.sin() * 0.6 + (t * 0.37).sin() * 0.3) * session.paddle.width() * 0.5;
            input.pointer_x = Some(session.ball.center().x + wobble);
        }
        GameMode::Win => input.confirm = true,
        GameMode::Lose if session.lives > 0 => input.restart = true,
        GameMode::Lose | GameMode::Cancel => input.quit = true,
        GameMode::InitGame | GameMode::Exit => {}
    }

    input
}
