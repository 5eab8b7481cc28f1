//! Paddle motion
//!
//! Velocity is set by player intents; position is integrated on every tick
//! and clamped to the playfield.

use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::frame::Frame;
use crate::config::GameConfig;

/// A paddle snapshot. X is fixed per side, see [`GameConfig::left_paddle_x`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleState {
    /// Units per second, negative is up
    pub velocity: f32,
    /// Top edge
    pub y: f32,
}

impl PaddleState {
    /// Resting paddle, vertically centred
    pub fn centered(config: &GameConfig) -> Self {
        Self {
            velocity: 0.0,
            y: config.height / 2.0 - config.paddle_height / 2.0,
        }
    }

    /// Y of the paddle's vertical centre
    pub fn center_y(&self, config: &GameConfig) -> f32 {
        self.y + config.paddle_height / 2.0
    }
}

/// Player intents for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleAction {
    GoUp,
    GoDown,
    Stop,
}

/// What a paddle reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaddleStep {
    Tick(Frame),
    Move(PaddleAction),
}

/// Advance a paddle by one step. The effect is always `Effect::None`.
pub fn step(state: &PaddleState, action: PaddleStep, config: &GameConfig) -> (PaddleState, Effect) {
    let next = match action {
        PaddleStep::Tick(frame) => PaddleState {
            y: config.clamp_paddle_y(state.y + state.velocity * frame.seconds()),
            ..*state
        },
        PaddleStep::Move(PaddleAction::GoUp) => PaddleState {
            velocity: -config.paddle_speed,
            ..*state
        },
        PaddleStep::Move(PaddleAction::GoDown) => PaddleState {
            velocity: config.paddle_speed,
            ..*state
        },
        PaddleStep::Move(PaddleAction::Stop) => PaddleState {
            velocity: 0.0,
            ..*state
        },
    };
    (next, Effect::None)
}
