//! Match reducer
//!
//! Folds one action into the previous state. Pure apart from the injected
//! speed source: no clocks, no I/O, every (state, action) pair handled.

use super::ball::{self, BallContext};
use super::effect::{Effect, Sound};
use super::frame::Frame;
use super::paddle::{self, PaddleAction, PaddleState, PaddleStep};
use super::speed::SpeedSource;
use super::state::{Action, MatchState, Player, Serve, Side};
use crate::config::GameConfig;

/// Reduce `action` against `state`, returning the next state and the
/// effects the runner should carry out
pub fn reduce<S: SpeedSource + ?Sized>(
    state: &MatchState,
    action: &Action,
    config: &GameConfig,
    speeds: &mut S,
) -> (MatchState, Effect) {
    match action {
        Action::Tick(frame) => tick(state, *frame, config, speeds),
        Action::LeftPaddle(intent) => move_paddle(state, Side::Left, *intent, config),
        Action::RightPaddle(intent) => move_paddle(state, Side::Right, *intent, config),
        Action::Ball(msg) => match *msg {},
        Action::Start => start(state, config, speeds),
        Action::DecrementCount => decrement_count(state, config),
    }
}

fn unchanged(state: &MatchState) -> (MatchState, Effect) {
    (state.clone(), Effect::None)
}

fn schedule_decrement(config: &GameConfig) -> Effect {
    Effect::Schedule {
        delay_ms: config.countdown_step_ms,
        action: Action::DecrementCount,
    }
}

/// Replace one paddle, keeping the phase and everything else
fn with_paddle(state: &MatchState, side: Side, paddle: PaddleState) -> MatchState {
    let mut next = state.clone();
    match &mut next {
        MatchState::Welcome { left, right } | MatchState::Won { left, right, .. } => match side {
            Side::Left => *left = paddle,
            Side::Right => *right = paddle,
        },
        MatchState::Countdown { left, right, .. } | MatchState::Playing { left, right, .. } => {
            match side {
                Side::Left => left.paddle = paddle,
                Side::Right => right.paddle = paddle,
            }
        }
    }
    next
}

fn move_paddle(
    state: &MatchState,
    side: Side,
    intent: PaddleAction,
    config: &GameConfig,
) -> (MatchState, Effect) {
    let (paddle, effect) = paddle::step(state.paddle(side), PaddleStep::Move(intent), config);
    (with_paddle(state, side, paddle), effect)
}

fn start<S: SpeedSource + ?Sized>(
    state: &MatchState,
    config: &GameConfig,
    speeds: &mut S,
) -> (MatchState, Effect) {
    match state {
        MatchState::Welcome { left, right } | MatchState::Won { left, right, .. } => {
            log::debug!("{} -> Countdown: new match", state.phase_name());
            let next = MatchState::Countdown {
                count: config.countdown_from,
                serve: Serve::Neutral,
                left: Player::new(*left),
                right: Player::new(*right),
                ball: ball::kickoff(config, speeds),
            };
            (next, schedule_decrement(config))
        }
        MatchState::Countdown { .. } | MatchState::Playing { .. } => {
            log::debug!("Start ignored during {}", state.phase_name());
            unchanged(state)
        }
    }
}

fn decrement_count(state: &MatchState, config: &GameConfig) -> (MatchState, Effect) {
    match state {
        MatchState::Countdown { count: 0, .. } => {
            if cfg!(debug_assertions) {
                panic!("countdown reached zero without starting play: {state:?}");
            }
            unchanged(state)
        }
        MatchState::Countdown {
            count: 1,
            left,
            right,
            ball,
            ..
        } => {
            log::debug!("Countdown -> Playing");
            let next = MatchState::Playing {
                left: *left,
                right: *right,
                ball: *ball,
            };
            (next, Effect::None)
        }
        MatchState::Countdown {
            count,
            serve,
            left,
            right,
            ball,
        } => {
            log::trace!("Countdown {} -> {}", count, count - 1);
            let next = MatchState::Countdown {
                count: count - 1,
                serve: *serve,
                left: *left,
                right: *right,
                ball: *ball,
            };
            (next, schedule_decrement(config))
        }
        _ => unchanged(state),
    }
}

fn tick<S: SpeedSource + ?Sized>(
    state: &MatchState,
    frame: Frame,
    config: &GameConfig,
    speeds: &mut S,
) -> (MatchState, Effect) {
    let (left, left_effect) = paddle::step(state.left_paddle(), PaddleStep::Tick(frame), config);
    let (right, right_effect) = paddle::step(state.right_paddle(), PaddleStep::Tick(frame), config);
    let paddle_effects = Effect::batch([left_effect, right_effect]);

    match state {
        MatchState::Welcome { .. } => (MatchState::Welcome { left, right }, paddle_effects),
        MatchState::Won { winner, .. } => (
            MatchState::Won {
                winner: *winner,
                left,
                right,
            },
            paddle_effects,
        ),
        MatchState::Countdown {
            count,
            serve,
            left: prev_left,
            right: prev_right,
            ball,
        } => {
            // The ball rides along with the serving paddle until play resumes
            let ball = match serve {
                Serve::Left => ball::pin(ball, Side::Left, &left, config),
                Serve::Right => ball::pin(ball, Side::Right, &right, config),
                Serve::Neutral => *ball,
            };
            let next = MatchState::Countdown {
                count: *count,
                serve: *serve,
                left: Player {
                    paddle: left,
                    score: prev_left.score,
                },
                right: Player {
                    paddle: right,
                    score: prev_right.score,
                },
                ball,
            };
            (next, paddle_effects)
        }
        MatchState::Playing {
            left: prev_left,
            right: prev_right,
            ball,
        } => {
            let next_left = Player {
                paddle: left,
                score: prev_left.score,
            };
            let next_right = Player {
                paddle: right,
                score: prev_right.score,
            };

            // The serve leaves from where the conceding paddle stood when the ball went out
            if ball.x < 0.0 {
                let serve_from = prev_left.paddle;
                return score_point(
                    Side::Right,
                    next_left,
                    next_right,
                    &serve_from,
                    paddle_effects,
                    config,
                    speeds,
                );
            }
            if ball.x + config.ball_size > config.width {
                let serve_from = prev_right.paddle;
                return score_point(
                    Side::Left,
                    next_left,
                    next_right,
                    &serve_from,
                    paddle_effects,
                    config,
                    speeds,
                );
            }

            let ctx = BallContext {
                left: &prev_left.paddle,
                right: &prev_right.paddle,
                delta_time: frame.delta_time,
            };
            let (ball, ball_effect) = ball::step(ball, ctx, config, speeds);
            let next = MatchState::Playing {
                left: next_left,
                right: next_right,
                ball,
            };
            (next, Effect::batch([paddle_effects, ball_effect]))
        }
    }
}

/// `scorer` wins the rally; either the match ends or the other side serves
fn score_point<S: SpeedSource + ?Sized>(
    scorer: Side,
    mut left: Player,
    mut right: Player,
    serve_from: &PaddleState,
    paddle_effects: Effect,
    config: &GameConfig,
    speeds: &mut S,
) -> (MatchState, Effect) {
    let points = match scorer {
        Side::Left => left.score.saturating_add(1),
        Side::Right => right.score.saturating_add(1),
    };

    if points >= config.max_score {
        log::info!("{} player won", scorer.as_str());
        let next = MatchState::Won {
            winner: scorer,
            left: left.paddle,
            right: right.paddle,
        };
        return (next, Effect::batch([paddle_effects, Effect::PlaySound(Sound::Score)]));
    }

    match scorer {
        Side::Left => left.score = points,
        Side::Right => right.score = points,
    }
    log::info!(
        "{} scores: {}-{}",
        scorer.as_str(),
        left.score,
        right.score
    );

    let server = scorer.opponent();
    let ball = ball::serve(server, serve_from, config, speeds);
    let next = MatchState::Countdown {
        count: config.countdown_from,
        serve: server.into(),
        left,
        right,
        ball,
    };
    let effects = Effect::batch([
        paddle_effects,
        Effect::PlaySound(Sound::Score),
        schedule_decrement(config),
    ]);
    (next, effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ball::BallState;
    use crate::sim::speed::ScriptedSpeeds;

    fn player(y: f32, score: u32) -> Player {
        Player {
            paddle: PaddleState { velocity: 0.0, y },
            score,
        }
    }

    fn tick_ms(ms: f64) -> Action {
        Action::Tick(Frame::new(0.0, ms))
    }

    #[test]
    fn test_start_from_welcome() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::constant(50.0).with_sides([Side::Left]);
        let state = MatchState::welcome(&config);

        let (next, effect) = reduce(&state, &Action::Start, &config, &mut speeds);
        let MatchState::Countdown {
            count,
            serve,
            left,
            right,
            ball,
        } = next
        else {
            panic!("expected Countdown, got {next:?}");
        };
        assert_eq!(count, 3);
        assert_eq!(serve, Serve::Neutral);
        assert_eq!((left.score, right.score), (0, 0));
        assert_eq!(ball, BallState { x: 490.0, y: 340.0, vx: -300.0, vy: 50.0 });
        assert_eq!(effect.scheduled(), vec![(1000, &Action::DecrementCount)]);
        assert!(effect.sounds().is_empty());
    }

    #[test]
    fn test_start_from_won_resets_scores() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let paddle = PaddleState { velocity: 350.0, y: 120.0 };
        let state = MatchState::Won {
            winner: Side::Left,
            left: paddle,
            right: paddle,
        };

        let (next, effect) = reduce(&state, &Action::Start, &config, &mut speeds);
        assert_eq!(next.scores(), Some((0, 0)));
        assert_eq!(next.left_paddle(), &paddle);
        assert!(matches!(next, MatchState::Countdown { count: 3, serve: Serve::Neutral, .. }));
        assert_eq!(effect.scheduled().len(), 1);
    }

    #[test]
    fn test_start_ignored_mid_match() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let state = MatchState::Playing {
            left: player(100.0, 2),
            right: player(200.0, 5),
            ball: BallState::default(),
        };
        let (next, effect) = reduce(&state, &Action::Start, &config, &mut speeds);
        assert_eq!(next, state);
        assert!(effect.is_none());
    }

    #[test]
    fn test_countdown_steps() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let ball = BallState { x: 40.0, y: 240.0, vx: 300.0, vy: 10.0 };
        let state = MatchState::Countdown {
            count: 3,
            serve: Serve::Left,
            left: player(200.0, 0),
            right: player(300.0, 1),
            ball,
        };

        let (two, effect) = reduce(&state, &Action::DecrementCount, &config, &mut speeds);
        assert!(matches!(two, MatchState::Countdown { count: 2, .. }));
        assert_eq!(effect.scheduled(), vec![(1000, &Action::DecrementCount)]);

        let (one, _) = reduce(&two, &Action::DecrementCount, &config, &mut speeds);
        assert!(matches!(one, MatchState::Countdown { count: 1, .. }));

        let (playing, effect) = reduce(&one, &Action::DecrementCount, &config, &mut speeds);
        assert_eq!(
            playing,
            MatchState::Playing {
                left: player(200.0, 0),
                right: player(300.0, 1),
                ball,
            }
        );
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_decrement_outside_countdown_is_noop() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let state = MatchState::welcome(&config);
        let (next, effect) = reduce(&state, &Action::DecrementCount, &config, &mut speeds);
        assert_eq!(next, state);
        assert!(effect.is_none());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "countdown reached zero")]
    fn test_zero_countdown_is_a_defect() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let state = MatchState::Countdown {
            count: 0,
            serve: Serve::Neutral,
            left: player(300.0, 0),
            right: player(300.0, 0),
            ball: BallState::default(),
        };
        let _ = reduce(&state, &Action::DecrementCount, &config, &mut speeds);
    }

    #[test]
    fn test_countdown_tick_tracks_serving_paddle() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let ball = BallState { x: 940.0, y: 340.0, vx: -300.0, vy: 7.0 };
        let mut right = player(300.0, 4);
        right.paddle.velocity = 350.0;
        let state = MatchState::Countdown {
            count: 2,
            serve: Serve::Right,
            left: player(300.0, 6),
            right,
            ball,
        };

        let (next, effect) = reduce(&state, &tick_ms(100.0), &config, &mut speeds);
        let MatchState::Countdown { ball: moved, right, count, .. } = next else {
            panic!("expected Countdown, got {next:?}");
        };
        assert_eq!(count, 2);
        assert!((right.paddle.y - 335.0).abs() < 0.001);
        assert_eq!(moved.x, 940.0);
        assert!((moved.y - (right.paddle.y + 40.0)).abs() < 0.001);
        assert_eq!((moved.vx, moved.vy), (-300.0, 7.0));
        assert!(effect.is_none());
    }

    #[test]
    fn test_neutral_countdown_leaves_ball() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let ball = BallState { x: 490.0, y: 340.0, vx: 300.0, vy: 7.0 };
        let mut left = player(300.0, 0);
        left.paddle.velocity = -350.0;
        let state = MatchState::Countdown {
            count: 3,
            serve: Serve::Neutral,
            left,
            right: player(300.0, 0),
            ball,
        };
        let (next, _) = reduce(&state, &tick_ms(16.0), &config, &mut speeds);
        assert_eq!(next.ball(), Some(&ball));
        assert!(next.left_paddle().y < 300.0);
    }

    #[test]
    fn test_right_scores_and_left_serves() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::constant(-20.0);
        let state = MatchState::Playing {
            left: player(250.0, 8),
            right: player(300.0, 3),
            ball: BallState { x: -1.0, y: 300.0, vx: -50.0, vy: 10.0 },
        };

        let (next, effect) = reduce(&state, &tick_ms(16.0), &config, &mut speeds);
        let MatchState::Countdown { count, serve, left, right, ball } = next else {
            panic!("expected Countdown, got {next:?}");
        };
        assert_eq!(count, 3);
        assert_eq!(serve, Serve::Left);
        assert_eq!((left.score, right.score), (8, 4));
        assert_eq!(ball.x, config.left_paddle_x() + config.paddle_width);
        assert_eq!(ball.y, 250.0 + 50.0 - 10.0);
        assert_eq!(ball.vx, 300.0);
        assert_eq!(effect.sounds(), vec![Sound::Score]);
        assert_eq!(effect.scheduled(), vec![(1000, &Action::DecrementCount)]);
    }

    #[test]
    fn test_left_scores_and_right_serves() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::constant(0.0);
        let state = MatchState::Playing {
            left: player(250.0, 0),
            right: player(100.0, 0),
            ball: BallState { x: 985.0, y: 300.0, vx: 300.0, vy: 0.0 },
        };

        let (next, _) = reduce(&state, &tick_ms(16.0), &config, &mut speeds);
        let MatchState::Countdown { serve, left, ball, .. } = next else {
            panic!("expected Countdown, got {next:?}");
        };
        assert_eq!(serve, Serve::Right);
        assert_eq!(left.score, 1);
        assert_eq!(ball.x, config.right_paddle_x() - config.ball_size);
        assert_eq!(ball.y, 140.0);
        assert_eq!(ball.vx, -300.0);
    }

    #[test]
    fn test_match_point_wins() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let state = MatchState::Playing {
            left: player(250.0, 9),
            right: player(300.0, 7),
            ball: BallState { x: 990.0, y: 300.0, vx: 300.0, vy: 0.0 },
        };

        let (next, effect) = reduce(&state, &tick_ms(16.0), &config, &mut speeds);
        assert_eq!(
            next,
            MatchState::Won {
                winner: Side::Left,
                left: player(250.0, 9).paddle,
                right: player(300.0, 7).paddle,
            }
        );
        assert_eq!(effect, Effect::PlaySound(Sound::Score));
    }

    #[test]
    fn test_serve_uses_paddle_before_the_tick() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let mut left = player(300.0, 0);
        left.paddle.velocity = 350.0;
        let state = MatchState::Playing {
            left,
            right: player(300.0, 0),
            ball: BallState { x: -1.0, y: 300.0, vx: -300.0, vy: 0.0 },
        };

        let (next, _) = reduce(&state, &tick_ms(100.0), &config, &mut speeds);
        let MatchState::Countdown { serve, left, ball, .. } = next else {
            panic!("expected Countdown, got {next:?}");
        };
        assert_eq!(serve, Serve::Left);
        assert!((left.paddle.y - 335.0).abs() < 0.001);
        assert_eq!(ball.y, 300.0 + 50.0 - 10.0);

        // The next countdown tick catches the ball up with the moving paddle
        let (next, _) = reduce(&next, &tick_ms(0.0), &config, &mut speeds);
        let ball = next.ball().copied().unwrap();
        assert!((ball.y - (335.0 + 50.0 - 10.0)).abs() < 0.001);
    }

    #[test]
    fn test_saturated_score_still_wins() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let state = MatchState::Playing {
            left: player(250.0, u32::MAX),
            right: player(300.0, 0),
            ball: BallState { x: 990.0, y: 300.0, vx: 300.0, vy: 0.0 },
        };

        let (next, effect) = reduce(&state, &tick_ms(16.0), &config, &mut speeds);
        assert!(matches!(next, MatchState::Won { winner: Side::Left, .. }));
        assert_eq!(effect, Effect::PlaySound(Sound::Score));
    }

    #[test]
    fn test_playing_tick_moves_ball_and_paddles() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let mut left = player(300.0, 1);
        left.paddle.velocity = 350.0;
        let state = MatchState::Playing {
            left,
            right: player(300.0, 2),
            ball: BallState { x: 500.0, y: 300.0, vx: 300.0, vy: 100.0 },
        };

        let (next, effect) = reduce(&state, &tick_ms(100.0), &config, &mut speeds);
        let MatchState::Playing { left, right, ball } = next else {
            panic!("expected Playing, got {next:?}");
        };
        assert!((left.paddle.y - 335.0).abs() < 0.001);
        assert_eq!((left.score, right.score), (1, 2));
        assert!((ball.x - 530.0).abs() < 0.001);
        assert!((ball.y - 310.0).abs() < 0.001);
        assert!(effect.is_none());
    }

    #[test]
    fn test_playing_tick_reports_bounce() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let state = MatchState::Playing {
            left: player(300.0, 0),
            right: player(300.0, 0),
            ball: BallState { x: 500.0, y: 695.0, vx: 300.0, vy: 100.0 },
        };
        let (_, effect) = reduce(&state, &tick_ms(16.0), &config, &mut speeds);
        assert_eq!(effect.sounds(), vec![Sound::WallHit]);
    }

    #[test]
    fn test_paddle_messages_in_every_phase() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let states = [
            MatchState::welcome(&config),
            MatchState::Countdown {
                count: 2,
                serve: Serve::Neutral,
                left: player(300.0, 3),
                right: player(300.0, 4),
                ball: BallState::default(),
            },
            MatchState::Playing {
                left: player(300.0, 3),
                right: player(300.0, 4),
                ball: BallState::default(),
            },
            MatchState::Won {
                winner: Side::Right,
                left: player(300.0, 0).paddle,
                right: player(300.0, 0).paddle,
            },
        ];

        for state in &states {
            let action = Action::LeftPaddle(PaddleAction::GoDown);
            let (next, effect) = reduce(state, &action, &config, &mut speeds);
            assert_eq!(next.phase_name(), state.phase_name());
            assert_eq!(next.left_paddle().velocity, 350.0);
            assert_eq!(next.right_paddle(), state.right_paddle());
            assert_eq!(next.scores(), state.scores());
            assert!(effect.is_none());

            let action = Action::RightPaddle(PaddleAction::GoUp);
            let (next, _) = reduce(&next, &action, &config, &mut speeds);
            assert_eq!(next.right_paddle().velocity, -350.0);
        }
    }

    #[test]
    fn test_welcome_tick_moves_paddles() {
        let config = GameConfig::default();
        let mut speeds = ScriptedSpeeds::default();
        let state = MatchState::Welcome {
            left: PaddleState { velocity: -350.0, y: 300.0 },
            right: PaddleState { velocity: 350.0, y: 300.0 },
        };
        let (next, effect) = reduce(&state, &tick_ms(1000.0), &config, &mut speeds);
        assert_eq!(next.left_paddle().y, 10.0);
        assert_eq!(next.right_paddle().y, 590.0);
        assert!(matches!(next, MatchState::Welcome { .. }));
        assert!(effect.is_none());
    }
}
