//! Rayboing - a brick-breaking arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, block grid, paddle, game modes)
//! - `level`: Level file parsing and next-level lookup
//! - `assets`: Symbolic texture/sound handles and the resource manifest
//! - `settings`: Data-driven game tunables

pub mod assets;
pub mod level;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed frame delta (60 Hz frame callback)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Window dimensions
    pub const SCREEN_WIDTH: f32 = 575.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Play field placement inside the window
    pub const PLAY_X_OFFSET: f32 = 35.0;
    pub const PLAY_Y_OFFSET: f32 = 60.0;
    pub const PLAY_X_PADDING: f32 = 40.0;
    pub const PLAY_Y_PADDING: f32 = 70.0;
    /// Thickness of the collision walls surrounding the play field
    pub const WALL_THICKNESS: f32 = 30.0;

    /// Block grid dimensions
    pub const BLOCK_ROWS_MAX: usize = 15;
    pub const BLOCK_COLS_MAX: usize = 9;
    /// Extra empty rows below the blocks reserved for the paddle
    pub const PADDLE_ROWS: usize = 3;
    /// Standard block sprite size
    pub const BLOCK_WIDTH: f32 = 40.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;

    /// Ball defaults
    pub const BALL_WIDTH: f32 = 20.0;
    pub const BALL_HEIGHT: f32 = 19.0;
    pub const BALL_START_SPEED: f32 = 400.0;
    pub const BALL_SPEED_UP: f32 = 1.25;
    /// Random spread added to every wall/block bounce (degrees, +/-)
    pub const BOUNCE_VARIANCE_DEG: f32 = 10.0;
    /// Steepest paddle deflection, measured from vertical
    pub const PADDLE_MAX_DEFLECT_DEG: f32 = 60.0;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_VELOCITY: f32 = 600.0;
    /// Gap between the paddle's bottom edge and the floor
    pub const PADDLE_DIST_BASE: f32 = 30.0;

    /// Launch gauge
    pub const GAUGE_MIN_FRAME: i32 = 1;
    pub const GAUGE_MAX_FRAME: i32 = 11;
    pub const GAUGE_FRAME_RATE: f32 = 8.0;

    /// Game rules
    pub const INITIAL_LIVES: u32 = 3;
    pub const SCORE_PER_BLOCK: u64 = 100;

    /// Resource locations
    pub const DEFAULT_LEVEL: &str = "resource/levels/level01.data";
    pub const RESOURCE_ROOT: &str = "resource";
}

/// Unit direction for an angle measured counter-clockwise from +X with
/// screen Y pointing down (so positive angles travel up-screen).
#[inline]
pub fn screen_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Angle of a screen-space velocity, inverse of [`screen_direction`]
#[inline]
pub fn screen_angle(vel: Vec2) -> f32 {
    (-vel.y).atan2(vel.x)
}
