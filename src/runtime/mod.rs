//! Action queue and effect runner
//!
//! [`Store`] owns the current [`MatchState`] and feeds actions to the
//! reducer strictly one at a time, in the order they were produced. Effects
//! returned by each reduction are carried out exactly once: sounds go to a
//! [`SoundSink`], delayed actions wait until a frame reaches their due time.

pub mod sound;

pub use sound::{LogSink, RecordingSink, SoundSink};

use std::collections::VecDeque;

use crate::config::{ConfigError, GameConfig};
use crate::sim::{Action, Effect, FrameClock, MatchState, SpeedSource, reduce};

/// An action waiting for its delay to elapse
#[derive(Debug, Clone)]
struct Pending {
    due: f64,
    seq: u64,
    action: Action,
}

/// Holds the match and runs the reducer
pub struct Store<S, K> {
    state: MatchState,
    config: GameConfig,
    speeds: S,
    sink: K,
    clock: FrameClock,
    queue: VecDeque<Action>,
    pending: Vec<Pending>,
    next_seq: u64,
    /// Time of the latest frame (ms)
    now: f64,
    reductions: u64,
}

impl<S: SpeedSource, K: SoundSink> Store<S, K> {
    /// Validate `config` and start at the welcome screen
    pub fn new(config: GameConfig, speeds: S, sink: K) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: MatchState::welcome(&config),
            config,
            speeds,
            sink,
            clock: FrameClock::new(),
            queue: VecDeque::new(),
            pending: Vec::new(),
            next_seq: 0,
            now: 0.0,
            reductions: 0,
        })
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Delayed actions not yet released
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Total actions reduced so far
    pub fn reductions(&self) -> u64 {
        self.reductions
    }

    /// Queue an action and process everything queued
    pub fn dispatch(&mut self, action: Action) {
        self.queue.push_back(action);
        self.drain();
    }

    /// Advance to an animation frame at `timestamp` (ms).
    ///
    /// Delayed actions due by then run first, oldest due time first, then
    /// the frame's tick.
    pub fn frame(&mut self, timestamp: f64) {
        let frame = self.clock.frame(timestamp);
        self.now = frame.timestamp;
        self.release_due();
        self.queue.push_back(Action::Tick(frame));
        self.drain();
    }

    fn release_due(&mut self) {
        let now = self.now;
        let (mut ready, waiting): (Vec<Pending>, Vec<Pending>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.due <= now);
        self.pending = waiting;
        ready.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        for pending in ready {
            log::trace!("Releasing {:?} due at {:.0}", pending.action, pending.due);
            self.queue.push_back(pending.action);
        }
    }

    fn drain(&mut self) {
        while let Some(action) = self.queue.pop_front() {
            let (next, effect) = reduce(&self.state, &action, &self.config, &mut self.speeds);
            if next.phase_name() != self.state.phase_name() {
                log::debug!("{} -> {}", self.state.phase_name(), next.phase_name());
            }
            self.state = next;
            self.reductions += 1;
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        for leaf in effect.into_leaves() {
            match leaf {
                Effect::PlaySound(sound) => self.sink.play(sound),
                Effect::Schedule { delay_ms, action } => {
                    let due = self.now + f64::from(delay_ms);
                    log::trace!("Scheduling {:?} at {:.0}", action, due);
                    self.pending.push(Pending {
                        due,
                        seq: self.next_seq,
                        action,
                    });
                    self.next_seq += 1;
                }
                Effect::None | Effect::Batch(_) => {}
            }
        }
    }
}
