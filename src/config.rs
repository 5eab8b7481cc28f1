//! Game geometry and tuning
//!
//! Loaded once at startup. Every field falls back to the default in
//! [`crate::consts`], so a JSON file only needs the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration errors, reported once before the first frame
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Playfield geometry and match rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between each paddle and its side wall
    pub paddle_inset: f32,
    /// Gap a paddle keeps from the top and bottom walls
    pub paddle_margin: f32,
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_size: f32,
    pub horizontal_speed: f32,
    pub vertical_speed_limit: i32,
    pub bounce_speedup: f32,

    // === Rules ===
    pub max_score: u32,
    pub countdown_from: u32,
    pub countdown_step_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            paddle_margin: PADDLE_MARGIN,
            paddle_speed: PADDLE_SPEED,

            ball_size: BALL_SIZE,
            horizontal_speed: HORIZONTAL_SPEED_THRESHOLD,
            vertical_speed_limit: VERTICAL_SPEED_LIMIT,
            bounce_speedup: BOUNCE_SPEEDUP,

            max_score: MAX_SCORE,
            countdown_from: COUNTDOWN_FROM,
            countdown_step_ms: COUNTDOWN_STEP_MS,
        }
    }
}

impl GameConfig {
    /// X of the left paddle's left edge
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_inset
    }

    /// X of the right paddle's left edge
    pub fn right_paddle_x(&self) -> f32 {
        self.width - self.paddle_width - self.paddle_inset
    }

    pub fn paddle_min_y(&self) -> f32 {
        self.paddle_margin
    }

    pub fn paddle_max_y(&self) -> f32 {
        self.height - self.paddle_height - self.paddle_margin
    }

    /// Clamp paddle Y to the playfield
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.max(self.paddle_min_y()).min(self.paddle_max_y())
    }

    /// Reject geometry the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_size", self.ball_size),
            ("horizontal_speed", self.horizontal_speed),
            ("bounce_speedup", self.bounce_speedup),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.paddle_inset < 0.0 || self.paddle_margin < 0.0 {
            return Err(ConfigError::Invalid(
                "paddle_inset and paddle_margin must not be negative".into(),
            ));
        }
        if self.paddle_min_y() > self.paddle_max_y() {
            return Err(ConfigError::Invalid(format!(
                "paddle of height {} does not fit a field of height {}",
                self.paddle_height, self.height
            )));
        }
        if self.left_paddle_x() + self.paddle_width + self.ball_size > self.right_paddle_x() {
            return Err(ConfigError::Invalid(format!(
                "field of width {} leaves no room between the paddles",
                self.width
            )));
        }
        if self.ball_size >= self.height {
            return Err(ConfigError::Invalid(format!(
                "ball_size {} does not fit a field of height {}",
                self.ball_size, self.height
            )));
        }
        if self.vertical_speed_limit <= 0 {
            return Err(ConfigError::Invalid(
                "vertical_speed_limit must be positive".into(),
            ));
        }
        if self.max_score == 0 {
            return Err(ConfigError::Invalid("max_score must be at least 1".into()));
        }
        if self.countdown_from == 0 {
            return Err(ConfigError::Invalid(
                "countdown_from must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
