//! Ball motion and collision
//!
//! Axis-aligned rectangles only. Leaving the field sideways is not handled
//! here: the match reducer checks the field edges before calling [`step`].

use serde::{Deserialize, Serialize};

use super::effect::{Effect, Sound};
use super::paddle::PaddleState;
use super::speed::SpeedSource;
use super::state::Side;
use crate::config::GameConfig;

/// Ball snapshot; (x, y) is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

/// Everything a ball step looks at besides the ball
#[derive(Debug, Clone, Copy)]
pub struct BallContext<'a> {
    pub left: &'a PaddleState,
    pub right: &'a PaddleState,
    /// Elapsed time (ms)
    pub delta_time: f64,
}

fn overlaps_vertically(ball: &BallState, paddle: &PaddleState, config: &GameConfig) -> bool {
    ball.y + config.ball_size > paddle.y && ball.y < paddle.y + config.paddle_height
}

/// Advance the ball one tick: paddle rebounds, then walls, then free flight
pub fn step<S: SpeedSource + ?Sized>(
    ball: &BallState,
    ctx: BallContext<'_>,
    config: &GameConfig,
    speeds: &mut S,
) -> (BallState, Effect) {
    let size = config.ball_size;
    let right_x = config.right_paddle_x();
    let left_edge = config.left_paddle_x() + config.paddle_width;

    if ball.x + size > right_x && overlaps_vertically(ball, ctx.right, config) {
        log::trace!("Ball hit right paddle at y={:.1}", ball.y);
        let next = BallState {
            x: right_x - size,
            vx: -ball.vx * config.bounce_speedup,
            vy: speeds.vertical_speed(config.vertical_speed_limit),
            ..*ball
        };
        return (next, Effect::PlaySound(Sound::PaddleHit));
    }

    if ball.x < left_edge && overlaps_vertically(ball, ctx.left, config) {
        log::trace!("Ball hit left paddle at y={:.1}", ball.y);
        let next = BallState {
            x: left_edge,
            vx: -ball.vx * config.bounce_speedup,
            vy: speeds.vertical_speed(config.vertical_speed_limit),
            ..*ball
        };
        return (next, Effect::PlaySound(Sound::PaddleHit));
    }

    if ball.y < 0.0 {
        let next = BallState {
            y: 0.0,
            vy: -ball.vy,
            ..*ball
        };
        return (next, Effect::PlaySound(Sound::WallHit));
    }

    if ball.y > config.height - size {
        let next = BallState {
            y: config.height - size,
            vy: -ball.vy,
            ..*ball
        };
        return (next, Effect::PlaySound(Sound::WallHit));
    }

    let dt = (ctx.delta_time / 1000.0) as f32;
    let next = BallState {
        x: ball.x + ball.vx * dt,
        y: ball.y + ball.vy * dt,
        ..*ball
    };
    (next, Effect::None)
}

/// Centred resting ball, drawn while no match is running
pub fn still(config: &GameConfig) -> BallState {
    BallState {
        x: config.width / 2.0 - config.ball_size / 2.0,
        y: config.height / 2.0 - config.ball_size / 2.0,
        vx: 0.0,
        vy: 0.0,
    }
}

/// Centred ball already moving toward a random side, for a fresh match
pub fn kickoff<S: SpeedSource + ?Sized>(config: &GameConfig, speeds: &mut S) -> BallState {
    let vx = match speeds.kickoff_side() {
        Side::Left => -config.horizontal_speed,
        Side::Right => config.horizontal_speed,
    };
    BallState {
        vx,
        vy: speeds.vertical_speed(config.vertical_speed_limit),
        ..still(config)
    }
}

/// Place `ball` flush against `side`'s paddle, vertically centred on it
pub fn pin(ball: &BallState, side: Side, paddle: &PaddleState, config: &GameConfig) -> BallState {
    let x = match side {
        Side::Left => config.left_paddle_x() + config.paddle_width,
        Side::Right => config.right_paddle_x() - config.ball_size,
    };
    BallState {
        x,
        y: paddle.y + config.paddle_height / 2.0 - config.ball_size / 2.0,
        ..*ball
    }
}

/// Ball served by `side`: pinned to its paddle, heading for the opponent
pub fn serve<S: SpeedSource + ?Sized>(
    side: Side,
    paddle: &PaddleState,
    config: &GameConfig,
    speeds: &mut S,
) -> BallState {
    let vx = match side {
        Side::Left => config.horizontal_speed,
        Side::Right => -config.horizontal_speed,
    };
    let ball = BallState {
        vx,
        vy: speeds.vertical_speed(config.vertical_speed_limit),
        ..BallState::default()
    };
    pin(&ball, side, paddle, config)
}
