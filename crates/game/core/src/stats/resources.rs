//! Resource meters.
//!
//! Maximum values are recomputed from Constitution on demand; only the
//! current values are stored on the actor.
//!
//! - max_health  = 40 + 10 × mod(CON)
//! - max_stamina = 50 + 15 × mod(CON)
//! - health regen  = (1 + 3 × log(CON)) × (1 + 2 × posture factor)
//! - stamina regen = (1 + 4 × log(CON)) × (1 + 3 × posture factor)
//!
//! `log(CON)` is floored before scaling.

use super::core::{ability_log, ability_modifier};
use crate::config::GameConfig;
use crate::state::Posture;

pub fn max_health(constitution: u32) -> u32 {
    GameConfig::BASE_HEALTH + GameConfig::HEALTH_PER_MODIFIER * ability_modifier(constitution)
}

pub fn max_stamina(constitution: u32) -> u32 {
    GameConfig::BASE_STAMINA + GameConfig::STAMINA_PER_MODIFIER * ability_modifier(constitution)
}

/// Health recovered by one regeneration step.
pub fn health_regen(constitution: u32, posture: Posture) -> u32 {
    (1 + 3 * ability_log(constitution, 0, 1)) * (1 + 2 * posture.health_regen_factor())
}

/// Stamina recovered by one regeneration step.
pub fn stamina_regen(constitution: u32, posture: Posture) -> u32 {
    (1 + 4 * ability_log(constitution, 0, 1)) * (1 + 3 * posture.stamina_regen_factor())
}
