//! Game session state
//!
//! [`GameSession`] is the single owner of everything a running game needs:
//! the mode machine, lives, the loaded level, the ball/paddle/gauge/grid
//! and the score. The tick functions thread it through each frame.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::block::BlockGrid;
use super::gauge::LaunchGauge;
use super::geometry::Arena;
use super::paddle::Paddle;
use crate::Settings;
use crate::assets::SoundId;
use crate::level::{LevelSource, level_number};

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Load/reset, then straight into `Play`
    InitGame,
    /// Ball in play
    Play,
    /// Level cleared, waiting for confirm
    Win,
    /// Ball lost, waiting for restart
    Lose,
    /// Player quit mid-level
    Cancel,
    /// Finished
    Exit,
}

/// Running score for the current level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score(u64);

impl Score {
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn add(&mut self, points: u64) {
        self.0 = self.0.saturating_add(points);
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundId),
    ModeChanged(GameMode),
}

/// Display snapshot for the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub mode: GameMode,
    pub blocks_remaining: u32,
    pub reversed: bool,
    pub level_title: String,
    pub level_number: u32,
}

impl Hud {
    /// Centered status banner for the end-of-attempt modes
    pub fn status_message(&self) -> Option<String> {
        match self.mode {
            GameMode::Win => Some("You Won! Congrats!!!".to_string()),
            GameMode::Lose if self.lives > 0 => {
                Some(format!("Remaining attempts: {}", self.lives))
            }
            GameMode::Lose => Some("You Lost! Sadface...".to_string()),
            GameMode::Cancel => Some("Game canceled".to_string()),
            _ => None,
        }
    }
}

/// Everything owned by one running game
pub struct GameSession {
    pub settings: Settings,
    pub mode: GameMode,
    /// Attempts left after the current one
    pub lives: u32,
    /// Level the next `InitGame` will run
    pub pending_level: String,
    /// Level whose grid is loaded
    pub level_path: Option<String>,
    pub level_title: String,
    pub level_number: u32,
    /// Seconds, display only
    pub time_limit: u32,
    pub arena: Arena,
    pub grid: BlockGrid,
    pub paddle: Paddle,
    pub ball: Ball,
    pub gauge: LaunchGauge,
    pub score: Score,
    /// Why the last level load failed
    pub load_error: Option<anyhow::Error>,
    /// Frames simulated
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    pub(crate) source: Box<dyn LevelSource>,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// New session that will start `level_path` on its first tick
    pub fn new(
        settings: Settings,
        source: impl LevelSource + 'static,
        level_path: impl Into<String>,
    ) -> Self {
        let arena = Arena::standard();
        let paddle = Paddle::new(&arena, settings.paddle_velocity);
        let ball = Ball::new(&paddle, &settings);
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            gauge: LaunchGauge::new(settings.gauge_frame_rate),
            mode: GameMode::InitGame,
            lives: 0,
            pending_level: level_path.into(),
            level_path: None,
            level_title: String::new(),
            level_number: 0,
            time_limit: 0,
            grid: BlockGrid::empty(&arena),
            arena,
            paddle,
            ball,
            score: Score::default(),
            load_error: None,
            time_ticks: 0,
            source: Box::new(source),
            events: Vec::new(),
            settings,
        }
    }

    /// Start (or retry) a level on the next tick
    pub fn select_level(&mut self, path: impl Into<String>) {
        self.pending_level = path.into();
        self.load_error = None;
        self.set_mode(GameMode::InitGame);
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            log::debug!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.events.push(GameEvent::ModeChanged(mode));
        }
    }

    pub fn play_sound(&mut self, sound: SoundId) {
        self.events.push(GameEvent::Sound(sound));
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score.value(),
            lives: self.lives,
            mode: self.mode,
            blocks_remaining: self.grid.remaining(),
            reversed: self.paddle.reversed,
            level_title: self.level_title.clone(),
            level_number: self.level_number,
        }
    }

    /// Load `pending_level` into the grid
    pub(crate) fn load_pending_level(&mut self) -> anyhow::Result<()> {
        let path = self.pending_level.clone();
        let level = self.source.load(&path)?;
        self.grid = BlockGrid::load(&level.rows, &self.arena);
        log::info!(
            "Loaded level {:?} from {} with {} blocks",
            level.title,
            path,
            self.grid.remaining()
        );
        self.level_title = level.title;
        self.time_limit = level.time_limit;
        self.level_number = level_number(&path);
        self.level_path = Some(path);
        Ok(())
    }

    /// Fresh paddle, ball and gauge for a new attempt
    pub(crate) fn reset_attempt(&mut self) {
        self.paddle.reset(&self.arena);
        self.ball = Ball::new(&self.paddle, &self.settings);
        self.gauge.reset();
    }
}
