//! Cooldown and stamina cost formulas.
//!
//! Both formulas share the same shape: a base value, minus sub-linear ability
//! bonuses, plus log10 terms for body weight, carried weight and (for
//! attacks) the weapon. Results are floored and never negative.
//!
//! ```text
//! cooldown = 5 - log(STR) - log(AGI) + lg(min(W,320)) + lg(min(C,300)) + max(lg(min(R,40)), lg(min(L,40)))
//! stamina  = 1 - log(STR) + lg(W) + lg(C) [+ lg(weapon)]
//! ```

use super::core::ability_log;
use super::derived::StatBlock;
use crate::config::GameConfig;
use crate::state::{Ability, ActorState};

/// Inputs shared by the cooldown and stamina formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadProfile {
    pub strength: u32,
    pub agility: u32,
    pub weight: u32,
    pub carried_weight: u32,
}

impl LoadProfile {
    pub fn of(actor: &ActorState, block: &StatBlock) -> Self {
        Self {
            strength: actor.ability(Ability::Strength),
            agility: actor.ability(Ability::Agility),
            weight: block.weight,
            carried_weight: block.carried_weight,
        }
    }
}

/// `log10(min(value, cap))`, or 0 for an empty value.
fn capped_log(value: u32, cap: u32) -> f64 {
    if value == 0 {
        0.0
    } else {
        f64::from(value.min(cap)).log10()
    }
}

fn uncapped_log(value: u32) -> f64 {
    capped_log(value, u32::MAX)
}

fn floor_non_negative(value: f64) -> u32 {
    value.floor().max(0.0) as u32
}

fn base_cooldown(profile: &LoadProfile) -> f64 {
    let strength = f64::from(ability_log(profile.strength, 0, 1));
    let agility = f64::from(ability_log(profile.agility, 0, 1));
    GameConfig::BASE_COMBAT_COOLDOWN - strength - agility
        + capped_log(profile.weight, GameConfig::BODY_WEIGHT_CAP)
        + capped_log(profile.carried_weight, GameConfig::CARRIED_WEIGHT_CAP)
}

/// Seconds until the next basic attack.
///
/// `right` and `left` are the weights of the weapons wielded in each hand.
pub fn combat_cooldown(profile: &LoadProfile, right: Option<u32>, left: Option<u32>) -> u32 {
    let hand = |weight: Option<u32>| {
        weight.map_or(0.0, |weight| capped_log(weight, GameConfig::WEAPON_WEIGHT_CAP))
    };
    floor_non_negative(base_cooldown(profile) + hand(right).max(hand(left)))
}

/// Seconds until a flee attempt resolves; the attack cooldown minus the
/// weapon term.
pub fn flee_cooldown(profile: &LoadProfile) -> u32 {
    floor_non_negative(base_cooldown(profile))
}

/// Stamina consumed by an action, optionally swinging a weapon.
pub fn stamina_cost(profile: &LoadProfile, weapon_weight: Option<u32>) -> u32 {
    let strength = f64::from(ability_log(profile.strength, 0, 1));
    let mut cost = GameConfig::BASE_STAMINA_COST - strength
        + uncapped_log(profile.weight)
        + uncapped_log(profile.carried_weight);
    if let Some(weight) = weapon_weight {
        cost += uncapped_log(weight);
    }
    floor_non_negative(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(strength: u32, agility: u32, weight: u32, carried_weight: u32) -> LoadProfile {
        LoadProfile {
            strength,
            agility,
            weight,
            carried_weight,
        }
    }

    #[test]
    fn weightless_actor_uses_base_values() {
        let body = profile(10, 10, 0, 0);
        assert_eq!(combat_cooldown(&body, None, None), 5);
        assert_eq!(flee_cooldown(&body), 5);
        assert_eq!(stamina_cost(&body, None), 1);
    }

    #[test]
    fn heavier_weapon_hand_dominates() {
        // 5 + lg(120) + lg(12) ~ 8.16; right lg(2) ~ 0.30, left lg(40) ~ 1.60
        let body = profile(10, 10, 120, 12);
        assert_eq!(combat_cooldown(&body, None, None), 8);
        assert_eq!(combat_cooldown(&body, Some(2), None), 8);
        assert_eq!(combat_cooldown(&body, Some(2), Some(40)), 9);
        // capped at 40
        assert_eq!(combat_cooldown(&body, Some(1000), None), 9);
    }

    #[test]
    fn body_weight_is_capped_for_cooldown_but_not_stamina() {
        let heavy = profile(10, 10, 2000, 0);
        // 5 + lg(320) ~ 7.5
        assert_eq!(combat_cooldown(&heavy, None, None), 7);
        // 1 + lg(2000) ~ 4.3
        assert_eq!(stamina_cost(&heavy, None), 4);
    }

    #[test]
    fn strong_agile_actors_are_faster() {
        // log(STR 30) = 1, log(AGI 30) = 1
        let body = profile(30, 30, 0, 0);
        assert_eq!(combat_cooldown(&body, None, None), 3);
        assert_eq!(stamina_cost(&body, None), 0);
    }

    #[test]
    fn stamina_cost_never_negative() {
        let body = profile(60, 60, 1, 1);
        assert_eq!(stamina_cost(&body, Some(1)), 0);
    }

    #[test]
    fn weapon_adds_to_stamina_cost() {
        let body = profile(10, 10, 70, 10);
        // 1 + 1.845 + 1 = 3.845
        assert_eq!(stamina_cost(&body, None), 3);
        // + lg(5) ~ 0.70
        assert_eq!(stamina_cost(&body, Some(5)), 4);
    }
}
