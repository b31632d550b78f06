//! Damage calculation and application.

use crate::config::GameConfig;
use crate::state::ActorState;
use crate::stats::ability_modifier;

/// Bonus for swinging a two-handed weapon as the only weapon:
/// `STRmod + STRmod / 2`.
pub fn two_handed_bonus(strength: u32) -> u32 {
    let modifier = ability_modifier(strength);
    modifier + modifier / 2
}

/// Total damage of a hit.
///
/// # Formula
///
/// ```text
/// damage = (rolled + bonus) * (critical ? 2 : 1)
/// ```
pub fn calculate_damage(rolled: u32, bonus: u32, critical: bool) -> u32 {
    let total = rolled.saturating_add(bonus);
    if critical {
        total.saturating_mul(GameConfig::CRITICAL_MULTIPLIER)
    } else {
        total
    }
}

/// Removes health, saturating at zero. Returns true if the target died.
pub fn apply_damage(target: &mut ActorState, amount: u32) -> bool {
    target.rem_health(amount, true);
    target.health() == 0
}

/// Aggression a hit adds toward the attacker: damage as a percentage of
/// the target's maximum health.
pub fn aggro_from_damage(amount: u32, max_health: u32) -> u32 {
    if max_health == 0 {
        return 0;
    }
    amount.saturating_mul(100) / max_health
}
