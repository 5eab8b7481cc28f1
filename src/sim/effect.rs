//! Effect descriptions
//!
//! The reducer never plays sounds or starts timers itself. It returns an
//! [`Effect`] next to the new state and the runner in [`crate::runtime`]
//! carries it out.

use serde::{Deserialize, Serialize};

use super::state::Action;

/// Sound effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// Ball hits a paddle
    PaddleHit,
    /// Ball hits the top or bottom wall
    WallHit,
    /// Ball left the field
    Score,
}

/// A side action for the runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    None,
    /// Fire-and-forget playback
    PlaySound(Sound),
    /// Dispatch `action` after `delay_ms`
    Schedule { delay_ms: u32, action: Action },
    /// Every member runs; order carries no meaning
    Batch(Vec<Effect>),
}

impl Effect {
    /// Combine effects into one, flattening nested batches and dropping `None`
    pub fn batch(effects: impl IntoIterator<Item = Effect>) -> Effect {
        let mut leaves = Vec::new();
        for effect in effects {
            effect.flatten_into(&mut leaves);
        }
        match leaves.len() {
            0 => Effect::None,
            1 => leaves.swap_remove(0),
            _ => Effect::Batch(leaves),
        }
    }

    fn flatten_into(self, out: &mut Vec<Effect>) {
        match self {
            Effect::None => {}
            Effect::Batch(effects) => {
                for effect in effects {
                    effect.flatten_into(out);
                }
            }
            leaf => out.push(leaf),
        }
    }

    pub fn is_none(&self) -> bool {
        match self {
            Effect::None => true,
            Effect::Batch(effects) => effects.iter().all(Effect::is_none),
            _ => false,
        }
    }

    /// Leaf effects in order
    pub fn into_leaves(self) -> Vec<Effect> {
        let mut leaves = Vec::new();
        self.flatten_into(&mut leaves);
        leaves
    }

    /// Every sound this effect plays
    pub fn sounds(&self) -> Vec<Sound> {
        match self {
            Effect::PlaySound(sound) => vec![*sound],
            Effect::Batch(effects) => effects.iter().flat_map(Effect::sounds).collect(),
            _ => Vec::new(),
        }
    }

    /// Every delayed action this effect schedules
    pub fn scheduled(&self) -> Vec<(u32, &Action)> {
        match self {
            Effect::Schedule { delay_ms, action } => vec![(*delay_ms, action)],
            Effect::Batch(effects) => effects.iter().flat_map(Effect::scheduled).collect(),
            _ => Vec::new(),
        }
    }
}
