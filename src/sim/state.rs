//! Match state and actions
//!
//! Every reduction produces a fresh [`MatchState`]; nothing is mutated in
//! place.

use serde::{Deserialize, Serialize};

use super::ball::BallState;
use super::frame::Frame;
use super::paddle::{PaddleAction, PaddleState};
use crate::config::GameConfig;

/// One side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Who puts the ball back in play after a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Serve {
    Left,
    Right,
    /// Fresh match; the kickoff ball keeps its own position
    Neutral,
}

impl From<Side> for Serve {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Serve::Left,
            Side::Right => Serve::Right,
        }
    }
}

/// A paddle together with its owner's score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub paddle: PaddleState,
    pub score: u32,
}

impl Player {
    pub fn new(paddle: PaddleState) -> Self {
        Self { paddle, score: 0 }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchState {
    /// Waiting for the first Start
    Welcome {
        left: PaddleState,
        right: PaddleState,
    },
    /// Counting down to the next rally
    Countdown {
        count: u32,
        serve: Serve,
        left: Player,
        right: Player,
        ball: BallState,
    },
    /// Rally in progress
    Playing {
        left: Player,
        right: Player,
        ball: BallState,
    },
    /// Match over until the next Start
    Won {
        winner: Side,
        left: PaddleState,
        right: PaddleState,
    },
}

impl MatchState {
    /// Initial state, both paddles centred
    pub fn welcome(config: &GameConfig) -> Self {
        MatchState::Welcome {
            left: PaddleState::centered(config),
            right: PaddleState::centered(config),
        }
    }

    pub fn phase_name(&self) -> &'static str {
        match self {
            MatchState::Welcome { .. } => "Welcome",
            MatchState::Countdown { .. } => "Countdown",
            MatchState::Playing { .. } => "Playing",
            MatchState::Won { .. } => "Won",
        }
    }

    pub fn left_paddle(&self) -> &PaddleState {
        match self {
            MatchState::Welcome { left, .. } | MatchState::Won { left, .. } => left,
            MatchState::Countdown { left, .. } | MatchState::Playing { left, .. } => &left.paddle,
        }
    }

    pub fn right_paddle(&self) -> &PaddleState {
        match self {
            MatchState::Welcome { right, .. } | MatchState::Won { right, .. } => right,
            MatchState::Countdown { right, .. } | MatchState::Playing { right, .. } => {
                &right.paddle
            }
        }
    }

    pub fn paddle(&self, side: Side) -> &PaddleState {
        match side {
            Side::Left => self.left_paddle(),
            Side::Right => self.right_paddle(),
        }
    }

    /// (left, right) scores while a match is running
    pub fn scores(&self) -> Option<(u32, u32)> {
        match self {
            MatchState::Countdown { left, right, .. } | MatchState::Playing { left, right, .. } => {
                Some((left.score, right.score))
            }
            _ => None,
        }
    }

    /// The live ball, if one is in play or waiting to be served
    pub fn ball(&self) -> Option<&BallState> {
        match self {
            MatchState::Countdown { ball, .. } | MatchState::Playing { ball, .. } => Some(ball),
            _ => None,
        }
    }
}

/// Ball sub-actions. The ball only reacts to ticks, so nothing can be
/// dispatched to it; the variant stays so the action set mirrors the parts
/// of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallAction {}

/// Everything the reducer reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Tick(Frame),
    LeftPaddle(PaddleAction),
    RightPaddle(PaddleAction),
    Ball(BallAction),
    Start,
    DecrementCount,
}

impl Action {
    pub fn paddle(side: Side, action: PaddleAction) -> Action {
        match side {
            Side::Left => Action::LeftPaddle(action),
            Side::Right => Action::RightPaddle(action),
        }
    }
}
