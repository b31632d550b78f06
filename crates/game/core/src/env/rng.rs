//! Deterministic randomness for attack rolls, damage and flee checks.
//!
//! Oracles map a seed to a value and hold no state. [`Dice`] derives a fresh
//! seed for every roll from the world seed, the action nonce, the rolling
//! actor and a per-roll counter, so replaying the same actions with the same
//! seed replays the same fights.

use crate::state::EntityId;

/// Seeded random source. The same seed must always produce the same value.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[min, max]` inclusive. Returns `min` when the range
    /// is empty.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % span) as u32
    }
}

/// PCG-XSH-RR: one LCG step followed by an xorshift and a random rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = seed
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rotation = (state >> 59) as u32;
        xorshifted.rotate_right(rotation)
    }
}

/// Mixes the seed components with SplitMix64-style multipliers and a final
/// avalanche.
pub fn compute_seed(game_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Roll sequence for one resolved action.
pub struct Dice<'a> {
    rng: &'a dyn RngOracle,
    game_seed: u64,
    nonce: u64,
    actor: EntityId,
    rolls: u32,
}

impl<'a> Dice<'a> {
    pub fn new(rng: &'a dyn RngOracle, game_seed: u64, nonce: u64, actor: EntityId) -> Self {
        Self {
            rng,
            game_seed,
            nonce,
            actor,
            rolls: 0,
        }
    }

    /// Uniform roll in `[min, max]` inclusive.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        let seed = compute_seed(self.game_seed, self.nonce, self.actor.0, self.rolls);
        self.rolls = self.rolls.wrapping_add(1);
        self.rng.range(seed, min, max)
    }

    pub fn rolls(&self) -> u32 {
        self.rolls
    }
}

/// Replays a fixed list of rolls, clamped into each requested range.
#[cfg(test)]
pub(crate) struct ScriptedRng {
    rolls: std::sync::Mutex<std::collections::VecDeque<u32>>,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: std::sync::Mutex::new(rolls.into_iter().collect()),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.rolls.lock().map(|rolls| rolls.len()).unwrap_or(0)
    }
}

#[cfg(test)]
impl RngOracle for ScriptedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }

    fn range(&self, _seed: u64, min: u32, max: u32) -> u32 {
        let next = self
            .rolls
            .lock()
            .expect("scripted rng poisoned")
            .pop_front()
            .expect("scripted rng ran out of rolls");
        next.clamp(min, max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn range_stays_inside_bounds() {
        let rng = PcgRng;
        for seed in 0..500 {
            let value = rng.range(seed, 1, 20);
            assert!((1..=20).contains(&value));
        }
        assert_eq!(rng.range(7, 5, 5), 5);
        assert_eq!(rng.range(7, 9, 3), 9);
    }

    #[test]
    fn dice_rolls_differ_within_an_action() {
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 1, 1, EntityId(1));
        let rolls: Vec<u32> = (0..8).map(|_| dice.range(0, u32::MAX - 1)).collect();
        assert_eq!(dice.rolls(), 8);
        assert!(rolls.windows(2).any(|pair| pair[0] != pair[1]));

        let mut replay = Dice::new(&rng, 1, 1, EntityId(1));
        let again: Vec<u32> = (0..8).map(|_| replay.range(0, u32::MAX - 1)).collect();
        assert_eq!(rolls, again);
    }

    #[test]
    fn seed_depends_on_every_component() {
        let base = compute_seed(1, 2, 3, 4);
        assert_ne!(base, compute_seed(9, 2, 3, 4));
        assert_ne!(base, compute_seed(1, 9, 3, 4));
        assert_ne!(base, compute_seed(1, 2, 9, 4));
        assert_ne!(base, compute_seed(1, 2, 3, 9));
    }
}
