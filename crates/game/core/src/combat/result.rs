//! Combat result types and attack resolution.

use crate::env::Dice;

use super::damage::calculate_damage;
use super::hit::{check_hit, effective_roll, is_natural};
use super::weapons::ActiveWeapon;
use crate::config::GameConfig;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Miss,
    Hit,
    /// A natural roll: always hits, damage doubled.
    Critical,
}

/// Result of resolving one weapon's attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    /// Raw die roll.
    pub roll: u32,
    /// Roll after the dual-wield penalty.
    pub effective: u32,
    pub armor_class: u32,
    /// Damage dealt (None if miss).
    pub damage: Option<u32>,
}

impl AttackResult {
    pub fn is_critical(&self) -> bool {
        self.outcome == AttackOutcome::Critical
    }
}

/// Rolls to hit and, on a hit, rolls damage.
///
/// The damage die is only rolled when the attack lands.
pub fn resolve_attack(
    dice: &mut Dice<'_>,
    weapon: &ActiveWeapon,
    dual_wielding: bool,
    bonus: u32,
    armor_class: u32,
) -> AttackResult {
    let roll = dice.range(1, GameConfig::ATTACK_DIE);
    let effective = effective_roll(roll, weapon.hand, dual_wielding);

    if !check_hit(roll, effective, armor_class) {
        return AttackResult {
            outcome: AttackOutcome::Miss,
            roll,
            effective,
            armor_class,
            damage: None,
        };
    }

    let critical = is_natural(roll);
    let rolled = dice.range(weapon.profile.min_damage, weapon.profile.max_damage);
    AttackResult {
        outcome: if critical {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        },
        roll,
        effective,
        armor_class,
        damage: Some(calculate_damage(rolled, bonus, critical)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::state::{EntityId, EquipmentSlot, ItemId, WeaponProfile};

    fn greatsword() -> ActiveWeapon {
        ActiveWeapon {
            item: Some(ItemId(1)),
            hand: EquipmentSlot::RightHand,
            name: "a greatsword".into(),
            profile: WeaponProfile::melee(5, 10),
            weight: 10,
            two_handed: true,
        }
    }

    #[test]
    fn natural_twenty_is_a_critical_two_handed_hit() {
        // STR 14: bonus 2 + 1; damage roll 7 -> (7 + 3) * 2
        let rng = ScriptedRng::new([20, 7]);
        let mut dice = Dice::new(&rng, 0, 0, EntityId(1));

        let result = resolve_attack(&mut dice, &greatsword(), false, 3, 12);

        assert_eq!(result.outcome, AttackOutcome::Critical);
        assert_eq!(result.damage, Some(20));
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn miss_does_not_roll_damage() {
        let rng = ScriptedRng::new([11, 7]);
        let mut dice = Dice::new(&rng, 0, 0, EntityId(1));

        let result = resolve_attack(&mut dice, &greatsword(), false, 0, 12);

        assert_eq!(result.outcome, AttackOutcome::Miss);
        assert_eq!(result.damage, None);
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn damage_roll_stays_in_weapon_range() {
        let rng = ScriptedRng::new([15, 99]);
        let mut dice = Dice::new(&rng, 0, 0, EntityId(1));

        let result = resolve_attack(&mut dice, &greatsword(), false, 0, 12);

        assert_eq!(result.outcome, AttackOutcome::Hit);
        assert_eq!(result.damage, Some(10));
    }
}
