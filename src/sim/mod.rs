//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta only
//! - Seeded RNG only
//! - Row-major block iteration
//! - No rendering, audio or filesystem access (levels arrive through `LevelSource`)

pub mod anim;
pub mod ball;
pub mod block;
pub mod collision;
pub mod gauge;
pub mod geometry;
pub mod paddle;
pub mod state;
pub mod tick;

pub use anim::AnimPreset;
pub use ball::{Ball, BallPhase, BallStep};
pub use block::{
    Activation, ActivationOutcome, ActivationRule, BLOCK_TABLE, Block, BlockEffect, BlockGrid,
    BlockKind, BlockSpec,
};
pub use collision::{BounceAxis, CollisionResult, rect_collision};
pub use gauge::LaunchGauge;
pub use geometry::{Arena, Rect, Wall};
pub use paddle::{MoveDir, Paddle, PaddleSize, SizeChange};
pub use state::{GameEvent, GameMode, GameSession, Hud, Score};
pub use tick::{TickInput, tick};
