//! Demo paddle driver
//!
//! Plays one side by issuing the same intents a player would. Used by the
//! headless runner so a match can play itself out.

use crate::config::GameConfig;
use crate::sim::{Action, MatchState, PaddleAction, Side};

/// Follows the ball with a wandering aim so rallies eventually end
#[derive(Debug, Clone)]
pub struct Autopilot {
    side: Side,
    /// Half-width of the band around the target where the paddle rests
    dead_zone: f32,
    /// How far off-centre the paddle aims, as a fraction of its height
    sloppiness: f32,
    phase: f32,
    last: Option<PaddleAction>,
}

impl Autopilot {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            dead_zone: 8.0,
            sloppiness: 0.6,
            phase: 0.0,
            last: None,
        }
    }

    pub fn with_sloppiness(mut self, sloppiness: f32) -> Self {
        self.sloppiness = sloppiness.max(0.0);
        self
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Where the paddle centre should be right now
    fn target_y(&self, state: &MatchState, config: &GameConfig) -> f32 {
        let ball = match state {
            MatchState::Playing { ball, .. } => ball,
            _ => return config.height / 2.0,
        };
        let incoming = match self.side {
            Side::Left => ball.vx < 0.0,
            Side::Right => ball.vx > 0.0,
        };
        if !incoming {
            return config.height / 2.0;
        }
        // Oscillating offset so the paddle sometimes meets the ball with its edge
        let offset = (self.phase.sin() * 0.7 + (self.phase * 0.37).sin() * 0.3)
            * config.paddle_height
            * self.sloppiness;
        ball.y + config.ball_size / 2.0 + offset
    }

    /// Next intent for this frame, or `None` if nothing changes
    pub fn steer(&mut self, state: &MatchState, config: &GameConfig) -> Option<Action> {
        self.phase += 0.013;

        let target = self.target_y(state, config);
        let center = state.paddle(self.side).center_y(config);
        let intent = if target < center - self.dead_zone {
            PaddleAction::GoUp
        } else if target > center + self.dead_zone {
            PaddleAction::GoDown
        } else {
            PaddleAction::Stop
        };

        if self.last == Some(intent) {
            return None;
        }
        self.last = Some(intent);
        Some(Action::paddle(self.side, intent))
    }
}
