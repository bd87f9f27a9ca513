//! Arena geometry for the rectangular play field
//!
//! The arena is a play-field rectangle surrounded by four collision walls.
//! Everything here is a pure function of that rectangle:
//! - walls sit just outside the field, `WALL_THICKNESS` deep
//! - the block grid divides the field into `BLOCK_COLS_MAX` columns and
//!   `BLOCK_ROWS_MAX + PADDLE_ROWS` rows (the extra rows are paddle space)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle in screen space (origin top-left, Y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle with its top-left corner at `pos`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// One of the four arena walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// The bordered play field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Interior of the play field; walls lie outside it
    pub bounds: Rect,
}

impl Default for Arena {
    fn default() -> Self {
        Self::standard()
    }
}

impl Arena {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Play field for the standard 575x720 window
    pub fn standard() -> Self {
        Self::new(Rect::new(
            PLAY_X_OFFSET,
            PLAY_Y_OFFSET,
            SCREEN_WIDTH - PLAY_X_PADDING * 2.0,
            SCREEN_HEIGHT - PLAY_Y_PADDING * 2.0,
        ))
    }

    /// Collision rectangle of a wall
    pub fn wall(&self, wall: Wall) -> Rect {
        let b = self.bounds;
        let t = WALL_THICKNESS;
        match wall {
            Wall::Left => Rect::new(b.left() - t, b.top() - t, t, b.h + 2.0 * t),
            Wall::Right => Rect::new(b.right(), b.top() - t, t, b.h + 2.0 * t),
            Wall::Top => Rect::new(b.left() - t, b.top() - t, b.w + 2.0 * t, t),
            Wall::Bottom => Rect::new(b.left() - t, b.bottom(), b.w + 2.0 * t, t),
        }
    }

    /// Innermost X a left edge may reach
    #[inline]
    pub fn left_inner(&self) -> f32 {
        self.bounds.left()
    }

    /// Innermost X a right edge may reach
    #[inline]
    pub fn right_inner(&self) -> f32 {
        self.bounds.right()
    }

    /// Size of one grid cell (whole pixels, like the sprite layout)
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            (self.bounds.w / BLOCK_COLS_MAX as f32).floor(),
            (self.bounds.h / (BLOCK_ROWS_MAX + PADDLE_ROWS) as f32).floor(),
        )
    }

    /// Top-left corner of a grid cell
    pub fn cell_origin(&self, row: usize, col: usize) -> Vec2 {
        let cell = self.cell_size();
        Vec2::new(
            self.bounds.x + col as f32 * cell.x,
            self.bounds.y + row as f32 * cell.y,
        )
    }

    /// Full rectangle of a grid cell
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::from_pos_size(self.cell_origin(row, col), self.cell_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_arena_bounds() {
        let arena = Arena::standard();
        assert_eq!(arena.bounds, Rect::new(35.0, 60.0, 495.0, 580.0));
        assert_eq!(arena.cell_size(), Vec2::new(55.0, 32.0));
    }

    #[test]
    fn test_walls_touch_field_without_overlapping() {
        let arena = Arena::standard();
        for wall in [Wall::Left, Wall::Right, Wall::Top, Wall::Bottom] {
            assert!(!arena.wall(wall).overlaps(&arena.bounds), "{wall:?}");
        }
        assert_eq!(arena.wall(Wall::Left).right(), arena.left_inner());
        assert_eq!(arena.wall(Wall::Right).left(), arena.right_inner());
        assert_eq!(arena.wall(Wall::Bottom).top(), arena.bounds.bottom());
    }

    #[test]
    fn test_rect_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(9.0, 9.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_cell_rect_layout() {
        let arena = Arena::standard();
        let r = arena.cell_rect(2, 3);
        assert_eq!(r, Rect::new(35.0 + 3.0 * 55.0, 60.0 + 2.0 * 32.0, 55.0, 32.0));
    }
}
