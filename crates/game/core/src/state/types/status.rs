//! Timed status effects applied by actions.
//!
//! Effects expire on wall-clock time like action cooldowns. Expired entries
//! are dropped lazily by [`StatusEffects::prune`], which the engine calls once
//! per tick.

use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// The actor has surveyed its surroundings and knows where nearby
    /// characters are.
    ClearTargets,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub expires_at: Instant,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    /// Applies an effect, extending the expiry if it is already active.
    pub fn apply(&mut self, kind: StatusEffectKind, expires_at: Instant) {
        match self.effects.iter_mut().find(|effect| effect.kind == kind) {
            Some(effect) => effect.expires_at = effect.expires_at.max(expires_at),
            None => self.effects.push(StatusEffect { kind, expires_at }),
        }
    }

    pub fn is_active(&self, kind: StatusEffectKind, now: Instant) -> bool {
        self.effects
            .iter()
            .any(|effect| effect.kind == kind && now < effect.expires_at)
    }

    /// Drops expired effects and returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.effects.len();
        self.effects.retain(|effect| now < effect.expires_at);
        before - self.effects.len()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }
}
