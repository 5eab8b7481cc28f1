//! Frame timing
//!
//! Turns raw animation-frame timestamps into ticks carrying elapsed time.

use serde::{Deserialize, Serialize};

/// One animation frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Frame timestamp (ms)
    pub timestamp: f64,
    /// Time since the previous frame (ms), 0 on the first frame
    pub delta_time: f64,
}

impl Frame {
    pub fn new(timestamp: f64, delta_time: f64) -> Self {
        Self {
            timestamp,
            delta_time,
        }
    }

    /// Elapsed time in seconds, for integrating per-second velocities
    pub fn seconds(&self) -> f32 {
        (self.delta_time / 1000.0) as f32
    }
}

/// Pairs consecutive timestamps into frames
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the frame for `timestamp`
    pub fn frame(&mut self, timestamp: f64) -> Frame {
        let delta_time = match self.last {
            Some(last) => (timestamp - last).max(0.0),
            None => 0.0,
        };
        self.last = Some(timestamp);
        Frame::new(timestamp, delta_time)
    }

    /// Timestamp of the most recent frame
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last
    }
}
