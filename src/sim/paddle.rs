//! The player's paddle
//!
//! A horizontal bar with a three-step size ladder. Position is the left
//! edge and is clamped between the arena walls after every change.

use serde::{Deserialize, Serialize};

use super::geometry::{Arena, Rect};
use crate::consts::*;

/// Paddle size tier, ordered small to huge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PaddleSize {
    Small,
    Medium,
    Huge,
}

impl PaddleSize {
    /// Sprite width in pixels
    pub fn width(self) -> f32 {
        match self {
            PaddleSize::Small => 40.0,
            PaddleSize::Medium => 50.0,
            PaddleSize::Huge => 70.0,
        }
    }

    /// One tier up, or `self` at the top
    pub fn grow(self) -> Self {
        match self {
            PaddleSize::Small => PaddleSize::Medium,
            PaddleSize::Medium | PaddleSize::Huge => PaddleSize::Huge,
        }
    }

    /// One tier down, or `self` at the bottom
    pub fn shrink(self) -> Self {
        match self {
            PaddleSize::Huge => PaddleSize::Medium,
            PaddleSize::Medium | PaddleSize::Small => PaddleSize::Small,
        }
    }
}

/// Horizontal movement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveDir {
    Left,
    #[default]
    None,
    Right,
}

impl MoveDir {
    fn sign(self) -> f32 {
        match self {
            MoveDir::Left => -1.0,
            MoveDir::None => 0.0,
            MoveDir::Right => 1.0,
        }
    }
}

/// Size change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeChange {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed for the level)
    pub y: f32,
    pub size: PaddleSize,
    /// Left/right input is swapped
    pub reversed: bool,
    /// Next ball contact catches the ball
    pub sticky: bool,
    /// Keyboard speed in px/s
    pub speed: f32,
    min_x: f32,
    max_right: f32,
}

impl Paddle {
    /// Medium paddle centered above the floor
    pub fn new(arena: &Arena, speed: f32) -> Self {
        let mut paddle = Self {
            x: 0.0,
            y: arena.bounds.bottom() - PADDLE_DIST_BASE - PADDLE_HEIGHT,
            size: PaddleSize::Medium,
            reversed: false,
            sticky: false,
            speed,
            min_x: arena.left_inner(),
            max_right: arena.right_inner(),
        };
        paddle.reset(arena);
        paddle
    }

    /// Start-of-life state: medium, centered, no modifiers
    pub fn reset(&mut self, arena: &Arena) {
        self.size = PaddleSize::Medium;
        self.reversed = false;
        self.sticky = false;
        self.min_x = arena.left_inner();
        self.max_right = arena.right_inner();
        self.y = arena.bounds.bottom() - PADDLE_DIST_BASE - PADDLE_HEIGHT;
        self.x = arena.bounds.center().x - self.width() * 0.5;
        self.clamp();
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width() * 0.5
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width(), PADDLE_HEIGHT)
    }

    fn clamp(&mut self) {
        let max_x = (self.max_right - self.width()).max(self.min_x);
        self.x = self.x.clamp(self.min_x, max_x);
    }

    /// Keyboard movement for one frame; reverse control flips the direction
    pub fn move_dir(&mut self, dir: MoveDir, dt: f32) {
        let mut sign = dir.sign();
        if self.reversed {
            sign = -sign;
        }
        self.x += sign * self.speed * dt;
        self.clamp();
    }

    /// Absolute pointer control: center the paddle on `pointer_x`
    pub fn set_position(&mut self, pointer_x: f32) {
        self.x = pointer_x - self.width() * 0.5;
        self.clamp();
    }

    /// Step the size ladder, keeping the center where it was
    pub fn change_size(&mut self, change: SizeChange) {
        let old_width = self.width();
        self.size = match change {
            SizeChange::Up => self.size.grow(),
            SizeChange::Down => self.size.shrink(),
        };
        self.x -= (self.width() - old_width) * 0.5;
        self.clamp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paddle() -> (Arena, Paddle) {
        let arena = Arena::standard();
        let paddle = Paddle::new(&arena, PADDLE_VELOCITY);
        (arena, paddle)
    }

    #[test]
    fn test_new_paddle_is_centered_medium() {
        let (arena, p) = paddle();
        assert_eq!(p.size, PaddleSize::Medium);
        assert!((p.center_x() - arena.bounds.center().x).abs() < 1e-4);
        assert_eq!(p.rect().bottom(), arena.bounds.bottom() - PADDLE_DIST_BASE);
    }

    #[test]
    fn test_move_clamps_at_walls() {
        let (arena, mut p) = paddle();
        for _ in 0..200 {
            p.move_dir(MoveDir::Left, FRAME_DT);
        }
        assert_eq!(p.x, arena.left_inner());
        for _ in 0..200 {
            p.move_dir(MoveDir::Right, FRAME_DT);
        }
        assert_eq!(p.rect().right(), arena.right_inner());
    }

    #[test]
    fn test_reverse_swaps_direction() {
        let (_, mut p) = paddle();
        let start = p.x;
        p.reversed = true;
        p.move_dir(MoveDir::Left, 0.1);
        assert!(p.x > start);
    }

    #[test]
    fn test_size_ladder_stops_at_ends() {
        let (_, mut p) = paddle();
        p.change_size(SizeChange::Up);
        p.change_size(SizeChange::Up);
        assert_eq!(p.size, PaddleSize::Huge);
        p.change_size(SizeChange::Down);
        p.change_size(SizeChange::Down);
        p.change_size(SizeChange::Down);
        assert_eq!(p.size, PaddleSize::Small);
    }

    #[test]
    fn test_size_change_keeps_center() {
        let (_, mut p) = paddle();
        let center = p.center_x();
        p.change_size(SizeChange::Up);
        assert!((p.center_x() - center).abs() < 1e-4);
        p.change_size(SizeChange::Down);
        p.change_size(SizeChange::Down);
        assert!((p.center_x() - center).abs() < 1e-4);
    }

    #[test]
    fn test_grow_against_wall_is_reclamped() {
        let (arena, mut p) = paddle();
        p.set_position(10_000.0);
        p.change_size(SizeChange::Up);
        assert_eq!(p.rect().right(), arena.right_inner());
    }

    fn size_change() -> impl Strategy<Value = Option<SizeChange>> {
        prop_oneof![
            Just(Some(SizeChange::Up)),
            Just(Some(SizeChange::Down)),
            Just(None),
        ]
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_between_walls(
            ops in prop::collection::vec((size_change(), -2000.0f32..2000.0, 0u8..3), 1..64)
        ) {
            let (arena, mut p) = paddle();
            for (change, pointer, dir) in ops {
                match change {
                    Some(c) => p.change_size(c),
                    None => p.set_position(pointer),
                }
                let dir = match dir {
                    0 => MoveDir::Left,
                    1 => MoveDir::None,
                    _ => MoveDir::Right,
                };
                p.move_dir(dir, FRAME_DT);
                prop_assert!(p.x >= arena.left_inner());
                prop_assert!(p.x <= arena.right_inner() - p.width() + 1e-3);
            }
        }
    }
}
