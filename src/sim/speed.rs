//! Random serve and bounce speeds
//!
//! The simulation never calls a global RNG; the caller hands in a
//! [`SpeedSource`] so runs can be seeded or fully scripted.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Side;

/// Supplies the random parts of serves and paddle bounces
pub trait SpeedSource {
    /// Vertical speed drawn uniformly from the integers in `[-limit, limit)`
    fn vertical_speed(&mut self, limit: i32) -> f32;

    /// Side the ball heads toward on a fresh kickoff
    fn kickoff_side(&mut self) -> Side;
}

/// Seeded PCG speed source
#[derive(Debug, Clone)]
pub struct PcgSpeeds {
    rng: Pcg32,
}

impl PcgSpeeds {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl SpeedSource for PcgSpeeds {
    fn vertical_speed(&mut self, limit: i32) -> f32 {
        if limit <= 0 {
            return 0.0;
        }
        self.rng.random_range(-limit..limit) as f32
    }

    fn kickoff_side(&mut self) -> Side {
        if self.rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Replays fixed values, for tests and replays
///
/// Once a queue runs dry the last value handed out is repeated
/// (0.0 / `Side::Right` if the queue was always empty).
#[derive(Debug, Clone, Default)]
pub struct ScriptedSpeeds {
    vertical: VecDeque<f32>,
    sides: VecDeque<Side>,
    last_vertical: f32,
    last_side: Option<Side>,
}

impl ScriptedSpeeds {
    pub fn new(vertical: impl IntoIterator<Item = f32>) -> Self {
        Self {
            vertical: vertical.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Always draw the same vertical speed
    pub fn constant(vy: f32) -> Self {
        Self::new([vy])
    }

    pub fn with_sides(mut self, sides: impl IntoIterator<Item = Side>) -> Self {
        self.sides = sides.into_iter().collect();
        self
    }
}

impl SpeedSource for ScriptedSpeeds {
    fn vertical_speed(&mut self, _limit: i32) -> f32 {
        if let Some(vy) = self.vertical.pop_front() {
            self.last_vertical = vy;
        }
        self.last_vertical
    }

    fn kickoff_side(&mut self) -> Side {
        if let Some(side) = self.sides.pop_front() {
            self.last_side = Some(side);
        }
        self.last_side.unwrap_or(Side::Right)
    }
}
