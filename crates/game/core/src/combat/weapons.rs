//! Weapons an actor attacks with.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{ActorState, EquipmentSlot, ItemId, ItemKind, World, WeaponProfile};
use crate::stats::ability_modifier;

use super::damage::two_handed_bonus;

/// A weapon resolved for one combat step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveWeapon {
    /// `None` for the natural weapon.
    pub item: Option<ItemId>,
    pub hand: EquipmentSlot,
    pub name: String,
    pub profile: WeaponProfile,
    pub weight: u32,
    pub two_handed: bool,
}

impl ActiveWeapon {
    pub fn fists() -> Self {
        Self {
            item: None,
            hand: EquipmentSlot::RightHand,
            name: "your fists".to_owned(),
            profile: WeaponProfile::melee(GameConfig::FISTS_MIN_DAMAGE, GameConfig::FISTS_MAX_DAMAGE),
            weight: 0,
            two_handed: false,
        }
    }

    pub fn is_natural(&self) -> bool {
        self.item.is_none()
    }

    pub fn is_ranged(&self) -> bool {
        self.profile.is_ranged()
    }
}

/// Weapons wielded in the hands, right hand first.
///
/// Falls back to fists when nothing is wielded and the world enables
/// unarmed combat.
pub fn active_weapons(
    world: &World,
    actor: &ActorState,
    config: &GameConfig,
) -> ArrayVec<ActiveWeapon, 2> {
    let mut weapons = ArrayVec::new();
    for hand in EquipmentSlot::HANDS {
        let Some(item) = actor.equipment.get(hand).and_then(|id| world.item(id)) else {
            continue;
        };
        let Some(profile) = item.weapon() else {
            continue;
        };
        weapons.push(ActiveWeapon {
            item: Some(item.id),
            hand,
            name: item.name.clone(),
            profile: *profile,
            weight: item.weight,
            two_handed: item.is_two_handed(),
        });
    }
    if weapons.is_empty() && config.unarmed_fallback {
        weapons.push(ActiveWeapon::fists());
    }
    weapons
}

/// Flat damage bonus for `weapon` given how many weapons are active.
pub fn damage_bonus(weapon: &ActiveWeapon, active: usize, strength: u32) -> u32 {
    if weapon.is_natural() {
        ability_modifier(strength)
    } else if active == 1 && weapon.two_handed {
        two_handed_bonus(strength)
    } else {
        0
    }
}

/// Weights of the right- and left-hand weapons for the cooldown formula.
pub fn hand_weights(weapons: &[ActiveWeapon]) -> (Option<u32>, Option<u32>) {
    let weight_in = |hand: EquipmentSlot| {
        weapons
            .iter()
            .find(|weapon| weapon.hand == hand)
            .map(|weapon| weapon.weight)
    };
    (
        weight_in(EquipmentSlot::RightHand),
        weight_in(EquipmentSlot::LeftHand),
    )
}

/// Rounds left in the magazine loaded into a ranged weapon.
pub fn loaded_rounds(world: &World, weapon: ItemId) -> u32 {
    world
        .item(weapon)
        .and_then(|item| item.contents.first())
        .and_then(|magazine| world.item(*magazine))
        .map_or(0, |magazine| match magazine.kind {
            ItemKind::Magazine { rounds, .. } => rounds,
            _ => 0,
        })
}

/// Takes one round out of the loaded magazine.
pub fn spend_round(world: &mut World, weapon: ItemId) {
    let Some(magazine) = world
        .item(weapon)
        .and_then(|item| item.contents.first().copied())
    else {
        return;
    };
    if let Some(ItemKind::Magazine { rounds, .. }) =
        world.item_mut(magazine).map(|item| &mut item.kind)
    {
        *rounds = rounds.saturating_sub(1);
    }
}
