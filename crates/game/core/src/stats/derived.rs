//! Derived stats computed from abilities and equipment.
//!
//! - armor_class      = 10 + Σ armor absorption + best shield parry + mod(AGI)
//! - max_carry_weight = 50 + 10 × mod(STR)
//! - view_distance    = 3 + log(PER, 0, 1)

use super::core::{ability_log, ability_modifier};
use super::resources::{max_health, max_stamina};
use crate::config::GameConfig;
use crate::state::{Ability, ActorState, ItemKind, World};

pub fn armor_class(total_absorption: u32, best_parry: u32, agility: u32) -> u32 {
    GameConfig::BASE_ARMOR_CLASS
        .saturating_add(total_absorption)
        .saturating_add(best_parry)
        .saturating_add(ability_modifier(agility))
}

pub fn max_carry_weight(strength: u32) -> u32 {
    GameConfig::BASE_CARRY_WEIGHT + GameConfig::CARRY_PER_MODIFIER * ability_modifier(strength)
}

/// How many rooms away an actor can see.
pub fn view_distance(perception: u32) -> u32 {
    GameConfig::BASE_VIEW_DISTANCE + ability_log(perception, 0, 1)
}

/// Snapshot of an actor's derived numbers.
///
/// Computed on demand; combat takes a fresh one for every roll because
/// equipment and carried weight can change between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBlock {
    pub max_health: u32,
    pub max_stamina: u32,
    pub armor_class: u32,
    pub max_carry_weight: u32,
    pub weight: u32,
    pub carried_weight: u32,
}

impl StatBlock {
    pub fn of(world: &World, actor: &ActorState) -> Self {
        let mut absorption = 0u32;
        let mut parry = 0u32;
        for (slot, item) in actor.equipment.iter() {
            let Some(item) = world.item(item) else {
                continue;
            };
            match item.kind {
                ItemKind::Armor { damage_absorption } if !slot.is_hand() => {
                    absorption = absorption.saturating_add(damage_absorption);
                }
                ItemKind::Shield { parry_chance } if slot.is_hand() => {
                    parry = parry.max(parry_chance);
                }
                _ => {}
            }
        }

        let constitution = actor.ability(Ability::Constitution);
        Self {
            max_health: max_health(constitution),
            max_stamina: max_stamina(constitution),
            armor_class: armor_class(absorption, parry, actor.ability(Ability::Agility)),
            max_carry_weight: max_carry_weight(actor.ability(Ability::Strength)),
            weight: actor.weight,
            carried_weight: world.carried_weight(actor),
        }
    }

    /// Whether `weight` more can be picked up.
    pub fn can_carry(&self, weight: u32) -> bool {
        self.carried_weight.saturating_add(weight) < self.max_carry_weight
    }
}
