//! Sound playback
//!
//! The simulation only names sounds. A [`SoundSink`] turns them into
//! playback; the headless build logs them instead of making noise.

use crate::sim::Sound;

/// Anything that can play a sound, fire-and-forget
pub trait SoundSink {
    fn play(&mut self, sound: Sound);
}

impl Sound {
    /// Sample file for this sound
    pub fn resource(self) -> &'static str {
        match self {
            Sound::PaddleHit => "paddle_hit.wav",
            Sound::WallHit => "wall_hit.wav",
            Sound::Score => "score.wav",
        }
    }
}

/// Headless sink: logs each sound it is asked to play
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    played: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> u64 {
        self.played
    }
}

impl SoundSink for LogSink {
    fn play(&mut self, sound: Sound) {
        self.played += 1;
        log::debug!("Playing {}", sound.resource());
    }
}

/// Keeps every sound in order, for tests
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub sounds: Vec<Sound>,
}

impl SoundSink for RecordingSink {
    fn play(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }
}
