//! Pong Loop - two-player Pong as a pure reducer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, match phases, effects)
//! - `config`: Data-driven geometry and tuning
//! - `input`: Keyboard events to actions
//! - `runtime`: Action queue and effect runner
//! - `autopilot`: Demo paddle driver

pub mod autopilot;
pub mod config;
pub mod input;
pub mod runtime;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use runtime::Store;
pub use sim::{Action, Effect, MatchState, reduce};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 1000.0;
    pub const CANVAS_HEIGHT: f32 = 700.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Distance between a paddle and its side wall
    pub const PADDLE_INSET: f32 = 20.0;
    /// Closest a paddle may get to the top or bottom wall
    pub const PADDLE_MARGIN: f32 = 10.0;
    /// Paddle speed (units per second)
    pub const PADDLE_SPEED: f32 = 350.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    /// Horizontal serve speed (units per second)
    pub const HORIZONTAL_SPEED_THRESHOLD: f32 = 300.0;
    /// Vertical speeds are drawn from [-limit, limit)
    pub const VERTICAL_SPEED_LIMIT: i32 = 250;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const BOUNCE_SPEEDUP: f32 = 1.03;

    /// Match rules
    pub const MAX_SCORE: u32 = 10;
    pub const COUNTDOWN_FROM: u32 = 3;
    pub const COUNTDOWN_STEP_MS: u32 = 1000;
}
