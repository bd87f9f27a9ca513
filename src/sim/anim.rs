//! Sprite animation sampling
//!
//! Animations are stateless: the frame is a pure function of elapsed time,
//! so sprites that share a clock but use different phase offsets stay
//! out of step without storing anything per sprite.

/// Frame layout of one animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimPreset {
    pub frame_count: usize,
    pub fps: f32,
    /// Wrap around; otherwise hold the last frame
    pub looping: bool,
}

impl AnimPreset {
    pub const BALL_CYCLE: AnimPreset = AnimPreset::new(4, 10.0, true);
    pub const BALL_BIRTH: AnimPreset = AnimPreset::new(8, 8.0, false);

    pub const fn new(frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            frame_count,
            fps,
            looping,
        }
    }

    /// Seconds for one pass through every frame
    pub fn duration(&self) -> f32 {
        self.frame_count as f32 / self.fps
    }

    /// Zero-based frame index at `elapsed + phase_offset` seconds
    pub fn sample(&self, elapsed: f32, phase_offset: f32) -> usize {
        if self.frame_count == 0 {
            return 0;
        }
        let t = (elapsed + phase_offset).max(0.0);
        let frame = (t * self.fps) as usize;
        if self.looping {
            frame % self.frame_count
        } else {
            frame.min(self.frame_count - 1)
        }
    }
}
