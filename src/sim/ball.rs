//! Ball motion and collision resolution
//!
//! A launched ball is integrated with the frame delta and then resolved,
//! once per frame, against (in order) the floor, the other three walls,
//! the paddle and the block grid. There is no sub-stepping: a fast ball
//! can pass through a thin obstacle in one frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::anim::AnimPreset;
use super::block::{Activation, BallEffect, BlockEffect, BlockGrid, PaddleEffect};
use super::collision::{BounceAxis, jitter_bounce, paddle_deflection, paddle_hit_offset};
use super::geometry::{Arena, Rect, Wall};
use super::paddle::{Paddle, SizeChange};
use crate::Settings;
use crate::assets::TextureId;
use crate::consts::*;
use crate::screen_direction;

/// Launch phase of the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Resting on the paddle center before the first launch
    Spawned,
    /// Caught by a sticky paddle at `anchor = paddle_pos - ball_pos`
    Attached { anchor: Vec2 },
    /// In flight
    Free,
}

/// What happened during one [`Ball::update`]
#[derive(Debug, Clone, Default)]
pub struct BallStep {
    /// Ball touched the floor
    pub lost: bool,
    /// Top, left or right wall bounce
    pub wall_bounce: bool,
    pub paddle_hit: bool,
    /// Sticky paddle caught the ball
    pub caught: bool,
    /// Block activated this frame (at most one)
    pub block: Option<Activation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Velocity magnitude while free
    pub speed: f32,
    pub phase: BallPhase,
    /// False once the ball has dropped off screen
    pub visible: bool,
    /// Animation clock
    pub anim_time: f32,
    size: Vec2,
    speed_up: f32,
    bounce_variance_deg: f32,
}

impl Ball {
    /// New ball resting on the paddle
    pub fn new(paddle: &Paddle, settings: &Settings) -> Self {
        Self {
            pos: spawn_point(paddle, Vec2::new(BALL_WIDTH, BALL_HEIGHT)),
            vel: Vec2::ZERO,
            speed: settings.ball_speed,
            phase: BallPhase::Spawned,
            visible: true,
            anim_time: 0.0,
            size: Vec2::new(BALL_WIDTH, BALL_HEIGHT),
            speed_up: settings.ball_speed_up,
            bounce_variance_deg: settings.bounce_variance_deg,
        }
    }

    /// Returns true until the ball has been launched
    pub fn is_unlaunched(&self) -> bool {
        !matches!(self.phase, BallPhase::Free)
    }

    pub fn collision_rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Current cycle frame (0-based)
    pub fn frame_index(&self) -> usize {
        AnimPreset::BALL_CYCLE.sample(self.anim_time, 0.0)
    }

    /// Sprite for the current frame; a fresh ball plays its birth sequence first
    pub fn texture(&self) -> TextureId {
        let birth = AnimPreset::BALL_BIRTH;
        if self.anim_time < birth.duration() {
            TextureId::BallBirth(birth.sample(self.anim_time, 0.0) as u8 + 1)
        } else {
            TextureId::Ball(self.frame_index() as u8 + 1)
        }
    }

    /// Launch from the spawned or attached phase; returns true if launched
    pub fn release(&mut self, angle: f32) -> bool {
        if !self.is_unlaunched() {
            return false;
        }
        self.vel = screen_direction(angle) * self.speed;
        self.phase = BallPhase::Free;
        true
    }

    /// Multiply the speed, keeping the heading
    pub fn increase_speed(&mut self) {
        self.speed *= self.speed_up;
        self.vel = self.vel.normalize_or_zero() * self.speed;
    }

    /// Advance one frame
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        arena: &Arena,
        paddle: &mut Paddle,
        grid: &mut BlockGrid,
        rng: &mut R,
    ) -> BallStep {
        self.anim_time += dt;

        match self.phase {
            BallPhase::Spawned => {
                self.pos = spawn_point(paddle, self.size);
                BallStep::default()
            }
            BallPhase::Attached { anchor } => {
                self.follow_paddle(anchor, arena, paddle);
                BallStep::default()
            }
            BallPhase::Free => self.step_free(dt, arena, paddle, grid, rng),
        }
    }

    fn follow_paddle(&mut self, anchor: Vec2, arena: &Arena, paddle: &Paddle) {
        let paddle_pos = Vec2::new(paddle.x, paddle.y);
        self.pos = paddle_pos - anchor;

        let max_x = arena.right_inner() - self.size.x;
        let clamped = self.pos.x.clamp(arena.left_inner(), max_x.max(arena.left_inner()));
        if clamped != self.pos.x {
            self.pos.x = clamped;
            self.phase = BallPhase::Attached {
                anchor: paddle_pos - self.pos,
            };
        }
    }

    fn step_free<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        arena: &Arena,
        paddle: &mut Paddle,
        grid: &mut BlockGrid,
        rng: &mut R,
    ) -> BallStep {
        let mut step = BallStep::default();
        let old_pos = self.pos;
        self.pos += self.vel * dt;

        let rect = self.collision_rect();

        // Floor wins over every other contact
        if rect.overlaps(&arena.wall(Wall::Bottom)) {
            self.pos.y = SCREEN_HEIGHT;
            self.visible = false;
            step.lost = true;
            return step;
        }

        let mut flip_x = false;
        let mut flip_y = false;
        let mut step_back = false;

        if rect.overlaps(&arena.wall(Wall::Top)) {
            flip_y = true;
            step_back = true;
        }
        if rect.overlaps(&arena.wall(Wall::Left)) || rect.overlaps(&arena.wall(Wall::Right)) {
            flip_x = true;
            step_back = true;
        }
        step.wall_bounce = flip_x || flip_y;
        if flip_x {
            self.vel.x = -self.vel.x;
        }
        if flip_y {
            self.vel.y = -self.vel.y;
        }

        let paddle_rect = paddle.rect();
        if self.vel.y > 0.0 && rect.overlaps(&paddle_rect) {
            step.paddle_hit = true;
            self.pos.y = paddle.y - self.size.y;
            let t = paddle_hit_offset(&self.collision_rect(), &paddle_rect);
            self.vel = paddle_deflection(t, self.speed, PADDLE_MAX_DEFLECT_DEG);

            if paddle.sticky {
                paddle.sticky = false;
                self.vel = Vec2::ZERO;
                self.phase = BallPhase::Attached {
                    anchor: Vec2::new(paddle.x, paddle.y) - self.pos,
                };
                step.caught = true;
                return step;
            }
        }

        let mut block_flip = false;
        if let Some((row, col, hit)) = grid.first_overlap(&rect) {
            step_back = true;
            let activation = grid.activate(row, col);
            // Each axis flips at most once per frame, walls included
            match hit.bounce_axis() {
                BounceAxis::Horizontal if !flip_x => self.vel.x = -self.vel.x,
                BounceAxis::Vertical if !flip_y => self.vel.y = -self.vel.y,
                _ => {}
            }
            block_flip = true;
            self.apply_effect(activation.effect, paddle);
            step.block = Some(activation);
        }

        if step_back {
            self.pos = old_pos;
        }

        // The paddle sets its own outgoing angle; jitter only bounces
        if (step.wall_bounce || block_flip) && !step.paddle_hit {
            self.vel = jitter_bounce(self.vel, self.speed, self.bounce_variance_deg, rng);
        }

        step
    }

    fn apply_effect(&mut self, effect: Option<BlockEffect>, paddle: &mut Paddle) {
        match effect {
            Some(BlockEffect::Ball(BallEffect::SpeedUp)) => self.increase_speed(),
            Some(BlockEffect::Paddle(PaddleEffect::ArmSticky)) => paddle.sticky = true,
            Some(BlockEffect::Paddle(PaddleEffect::ToggleReverse)) => {
                paddle.reversed = !paddle.reversed;
            }
            Some(BlockEffect::Paddle(PaddleEffect::Shrink)) => {
                paddle.change_size(SizeChange::Down);
            }
            Some(BlockEffect::Paddle(PaddleEffect::Expand)) => {
                paddle.change_size(SizeChange::Up);
            }
            None => {}
        }
    }
}

/// Ball position centered on top of the paddle
fn spawn_point(paddle: &Paddle, size: Vec2) -> Vec2 {
    Vec2::new(paddle.center_x() - size.x * 0.5, paddle.y - size.y)
}
