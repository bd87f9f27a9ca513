//! Collision detection and response for axis-aligned rectangles
//!
//! The ball, paddle, blocks and walls are all rectangles. A hit is resolved
//! by reflecting one velocity axis; which one depends on the penetration
//! depth along each axis.

use glam::Vec2;
use rand::Rng;

use super::geometry::Rect;
use crate::{screen_angle, screen_direction};

/// Velocity axis to reflect after a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Side hit: negate X
    Horizontal,
    /// Top/bottom hit: negate Y
    Vertical,
}

/// Result of a rectangle-vs-rectangle check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the rectangles overlap
    pub hit: bool,
    /// Overlap depth along X
    pub overlap_x: f32,
    /// Overlap depth along Y
    pub overlap_y: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            overlap_x: 0.0,
            overlap_y: 0.0,
        }
    }

    /// Axis with the shallower penetration. Ties go to `Vertical`.
    pub fn bounce_axis(&self) -> BounceAxis {
        if self.overlap_x < self.overlap_y {
            BounceAxis::Horizontal
        } else {
            BounceAxis::Vertical
        }
    }
}

/// Check a moving rectangle against a static one
pub fn rect_collision(mover: &Rect, obstacle: &Rect) -> CollisionResult {
    if !mover.overlaps(obstacle) {
        return CollisionResult::miss();
    }

    let delta = mover.center() - obstacle.center();
    CollisionResult {
        hit: true,
        overlap_x: (mover.w + obstacle.w) * 0.5 - delta.x.abs(),
        overlap_y: (mover.h + obstacle.h) * 0.5 - delta.y.abs(),
    }
}

/// Reflect a velocity across one axis
#[inline]
pub fn reflect_velocity(vel: Vec2, axis: BounceAxis) -> Vec2 {
    match axis {
        BounceAxis::Horizontal => Vec2::new(-vel.x, vel.y),
        BounceAxis::Vertical => Vec2::new(vel.x, -vel.y),
    }
}

/// Perturb the heading of `vel` by a uniform offset in `[-variance_deg, variance_deg]`
/// and rebuild it at exactly `speed`.
pub fn jitter_bounce<R: Rng + ?Sized>(vel: Vec2, speed: f32, variance_deg: f32, rng: &mut R) -> Vec2 {
    let offset = if variance_deg > 0.0 {
        rng.random_range(-variance_deg..=variance_deg).to_radians()
    } else {
        0.0
    };
    screen_direction(screen_angle(vel) + offset) * speed
}

/// Normalized horizontal hit offset of `ball` against `paddle`, in `[-1, 1]`
pub fn paddle_hit_offset(ball: &Rect, paddle: &Rect) -> f32 {
    let half = paddle.w * 0.5;
    if half <= 0.0 {
        return 0.0;
    }
    ((ball.center().x - paddle.center().x) / half).clamp(-1.0, 1.0)
}

/// Outgoing paddle velocity for a hit offset `t`: never steeper than
/// `max_deflect_deg` from vertical, always upward, magnitude `speed`.
pub fn paddle_deflection(t: f32, speed: f32, max_deflect_deg: f32) -> Vec2 {
    let max_deflect = max_deflect_deg.to_radians();
    let mut vx = t.clamp(-1.0, 1.0) * speed * max_deflect.sin();
    let mut vy = -(speed * speed - vx * vx).max(0.0).sqrt();
    let min_vy = speed * max_deflect.cos();
    if vy.abs() < min_vy {
        // Floating point drift near the limit: pin the vertical component
        vy = -min_vy;
        let vx_mag = (speed * speed - vy * vy).max(0.0).sqrt();
        vx = vx_mag.copysign(vx);
    }
    Vec2::new(vx, vy)
}
