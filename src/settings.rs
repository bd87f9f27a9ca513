//! Game settings
//!
//! Gameplay tunables, read from a JSON file. Missing fields take their
//! default values, so a settings file only needs the keys it changes.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rules ===
    /// Attempts granted when a level is (re)loaded
    pub initial_lives: u32,
    /// Points per block activation
    pub score_per_block: u64,

    // === Ball ===
    /// Launch speed in px/s
    pub ball_speed: f32,
    /// Speed multiplier applied by the speed block
    pub ball_speed_up: f32,
    /// Random spread added to wall/block bounces (degrees, +/-)
    pub bounce_variance_deg: f32,

    // === Paddle / gauge ===
    /// Keyboard paddle speed in px/s
    pub paddle_velocity: f32,
    /// Launch gauge frames per second
    pub gauge_frame_rate: f32,

    // === Run ===
    /// Seed for the bounce RNG
    pub seed: u64,
    /// Level used when none is given on the command line
    pub default_level: String,
    /// Directory holding textures and sounds
    pub resource_root: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_lives: INITIAL_LIVES,
            score_per_block: SCORE_PER_BLOCK,

            ball_speed: BALL_START_SPEED,
            ball_speed_up: BALL_SPEED_UP,
            bounce_variance_deg: BOUNCE_VARIANCE_DEG,

            paddle_velocity: PADDLE_VELOCITY,
            gauge_frame_rate: GAUGE_FRAME_RATE,

            seed: 0x5eed_b0b1,
            default_level: DEFAULT_LEVEL.to_string(),
            resource_root: RESOURCE_ROOT.to_string(),
        }
    }
}

impl Settings {
    /// Settings file looked up next to the working directory
    pub const FILE_NAME: &'static str = "rayboing.json";

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid settings JSON")
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("In {}", path.display()))
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e:#}; using default settings");
                Self::default()
            }
        }
    }

    /// Pretty JSON for writing a settings file
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "initial_lives": 5, "seed": 9 }"#).expect("parse");
        assert_eq!(settings.initial_lives, 5);
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.ball_speed, BALL_START_SPEED);
        assert_eq!(settings.default_level, DEFAULT_LEVEL);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            bounce_variance_deg: 0.0,
            ..Settings::default()
        };
        let json = settings.to_json().expect("serialize");
        assert_eq!(Settings::from_json(&json).expect("parse"), settings);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ nope").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("definitely/not/here/rayboing.json");
        assert_eq!(settings, Settings::default());
    }
}
