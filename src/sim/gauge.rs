//! Launch gauge
//!
//! While the ball waits on the paddle, the gauge sweeps back and forth
//! through frames 1..=11 at a fixed rate. The frame maps linearly to a
//! launch angle: frame 11 fires at 45°, frame 1 at 135°.

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

use crate::consts::*;

const START_FRAME: i32 = GAUGE_MAX_FRAME;
const START_DIRECTION: i32 = -1;
const ANGLE_MIN: f32 = FRAC_PI_4;
const ANGLE_MAX: f32 = 3.0 * FRAC_PI_4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchGauge {
    /// Current frame, always in `GAUGE_MIN_FRAME..=GAUGE_MAX_FRAME`
    frame: i32,
    /// +1 or -1
    direction: i32,
    timer: f32,
    /// Frames per second
    frame_rate: f32,
}

impl Default for LaunchGauge {
    fn default() -> Self {
        Self::new(GAUGE_FRAME_RATE)
    }
}

impl LaunchGauge {
    pub fn new(frame_rate: f32) -> Self {
        Self {
            frame: START_FRAME,
            direction: START_DIRECTION,
            timer: 0.0,
            frame_rate: frame_rate.max(f32::EPSILON),
        }
    }

    #[inline]
    pub fn frame(&self) -> i32 {
        self.frame
    }

    #[inline]
    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// Advance the sweep by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() {
            return;
        }
        self.timer += dt;
        let frame_time = 1.0 / self.frame_rate;

        // The sweep repeats every full down-and-up pass
        let cycle = frame_time * (2 * (GAUGE_MAX_FRAME - GAUGE_MIN_FRAME)) as f32;
        if self.timer >= cycle {
            self.timer %= cycle;
        }

        while self.timer >= frame_time {
            self.timer -= frame_time;
            self.frame += self.direction;

            if self.frame > GAUGE_MAX_FRAME {
                self.frame = GAUGE_MAX_FRAME - 1;
                self.direction = -1;
            } else if self.frame < GAUGE_MIN_FRAME {
                self.frame = GAUGE_MIN_FRAME + 1;
                self.direction = 1;
            }
        }
    }

    /// Launch angle in radians for the current frame
    pub fn launch_angle(&self) -> f32 {
        let t = (GAUGE_MAX_FRAME - self.frame) as f32 / (GAUGE_MAX_FRAME - GAUGE_MIN_FRAME) as f32;
        ANGLE_MIN + t * (ANGLE_MAX - ANGLE_MIN)
    }

    /// Back to the starting frame and direction
    pub fn reset(&mut self) {
        self.frame = START_FRAME;
        self.direction = START_DIRECTION;
        self.timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tick_frames(gauge: &mut LaunchGauge, n: usize) {
        for _ in 0..n {
            gauge.update(1.0 / GAUGE_FRAME_RATE);
        }
    }

    #[test]
    fn test_angle_endpoints() {
        let mut g = LaunchGauge::default();
        assert!((g.launch_angle() - 45f32.to_radians()).abs() < 1e-5);
        tick_frames(&mut g, 10);
        assert_eq!(g.frame(), GAUGE_MIN_FRAME);
        assert!((g.launch_angle() - 135f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn test_angle_is_monotonic_in_frame() {
        let mut g = LaunchGauge::default();
        let mut last = g.launch_angle();
        for _ in 0..10 {
            tick_frames(&mut g, 1);
            let angle = g.launch_angle();
            assert!(angle > last);
            last = angle;
        }
    }

    #[test]
    fn test_ping_pong_at_lower_bound() {
        let mut g = LaunchGauge::default();
        tick_frames(&mut g, 11);
        assert_eq!(g.frame(), 2);
        assert_eq!(g.direction(), 1);
    }

    #[test]
    fn test_ping_pong_at_upper_bound() {
        let mut g = LaunchGauge::default();
        // Down to 1 (10 ticks), bounce to 2, then back up to 11 (9 more) and over
        tick_frames(&mut g, 21);
        assert_eq!(g.frame(), 10);
        assert_eq!(g.direction(), -1);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut g = LaunchGauge::default();
        tick_frames(&mut g, 7);
        g.update(0.05);
        g.reset();
        assert_eq!(g.frame(), GAUGE_MAX_FRAME);
        assert_eq!(g.direction(), -1);
        // A partial frame accumulated before reset must not leak through
        g.update(1.0 / GAUGE_FRAME_RATE - 0.01);
        assert_eq!(g.frame(), GAUGE_MAX_FRAME);
    }

    #[test]
    fn test_non_finite_dt_is_ignored() {
        let mut g = LaunchGauge::default();
        g.update(f32::INFINITY);
        g.update(f32::NAN);
        assert_eq!(g.frame(), GAUGE_MAX_FRAME);
        assert_eq!(g.direction(), -1);
        tick_frames(&mut g, 1);
        assert_eq!(g.frame(), GAUGE_MAX_FRAME - 1);
    }

    #[test]
    fn test_huge_dt_stays_in_range() {
        let mut g = LaunchGauge::default();
        g.update(1.0e30);
        assert!((GAUGE_MIN_FRAME..=GAUGE_MAX_FRAME).contains(&g.frame()));
    }

    proptest! {
        #[test]
        fn prop_frame_stays_in_range(steps in prop::collection::vec(0.0f32..0.5, 1..200)) {
            let mut g = LaunchGauge::default();
            for dt in steps {
                g.update(dt);
                prop_assert!((GAUGE_MIN_FRAME..=GAUGE_MAX_FRAME).contains(&g.frame()));
                prop_assert!(g.direction() == 1 || g.direction() == -1);
            }
        }
    }
}
