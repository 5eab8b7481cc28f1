//! Keyboard input classification
//!
//! W/S drive the left paddle, Up/Down the right one, Enter starts a match.
//! A paddle stops only when the key currently driving it is released, so
//! rolling from W to S and then letting go of W keeps the paddle moving down.

use crate::sim::{Action, PaddleAction, Side};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    ArrowUp,
    ArrowDown,
    Enter,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Key::W),
            "KeyS" => Some(Key::S),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "Enter" | "NumpadEnter" => Some(Key::Enter),
            _ => None,
        }
    }

    /// Paddle and direction a movement key controls
    fn binding(self) -> Option<(Side, PaddleAction)> {
        match self {
            Key::W => Some((Side::Left, PaddleAction::GoUp)),
            Key::S => Some((Side::Left, PaddleAction::GoDown)),
            Key::ArrowUp => Some((Side::Right, PaddleAction::GoUp)),
            Key::ArrowDown => Some((Side::Right, PaddleAction::GoDown)),
            Key::Enter => None,
        }
    }
}

/// A raw key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Auto-repeat from a held key
    pub repeat: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key, repeat: false }
    }

    pub fn repeated(key: Key) -> Self {
        Self { key, repeat: true }
    }
}

/// Turns key events into actions, remembering which key drives each paddle
#[derive(Debug, Clone, Default)]
pub struct InputClassifier {
    left_held: Option<Key>,
    right_held: Option<Key>,
}

impl InputClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn held_mut(&mut self, side: Side) -> &mut Option<Key> {
        match side {
            Side::Left => &mut self.left_held,
            Side::Right => &mut self.right_held,
        }
    }

    pub fn key_down(&mut self, event: KeyEvent) -> Option<Action> {
        if event.repeat {
            return None;
        }
        if event.key == Key::Enter {
            return Some(Action::Start);
        }
        let (side, intent) = event.key.binding()?;
        *self.held_mut(side) = Some(event.key);
        Some(Action::paddle(side, intent))
    }

    pub fn key_up(&mut self, key: Key) -> Option<Action> {
        let (side, _) = key.binding()?;
        let held = self.held_mut(side);
        if *held != Some(key) {
            return None;
        }
        *held = None;
        Some(Action::paddle(side, PaddleAction::Stop))
    }

    /// Forget held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        for side in [Side::Left, Side::Right] {
            if self.held_mut(side).take().is_some() {
                actions.push(Action::paddle(side, PaddleAction::Stop));
            }
        }
        actions
    }
}
