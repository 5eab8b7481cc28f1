//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes in through `Action::Tick` only
//! - Randomness comes from an injected `SpeedSource` only
//! - Side effects are returned as `Effect` values, never performed
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod effect;
pub mod frame;
pub mod paddle;
pub mod reducer;
pub mod speed;
pub mod state;

pub use ball::{BallContext, BallState};
pub use effect::{Effect, Sound};
pub use frame::{Frame, FrameClock};
pub use paddle::{PaddleAction, PaddleState, PaddleStep};
pub use reducer::reduce;
pub use speed::{PcgSpeeds, ScriptedSpeeds, SpeedSource};
pub use state::{Action, BallAction, MatchState, Player, Serve, Side};
