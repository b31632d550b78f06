//! Attack roll and hit check.
//!
//! # Formula
//!
//! ```text
//! roll      = d20
//! effective = roll                        if single weapon or roll == 20
//!           = max(0, roll - penalty)      otherwise (right 6, left 10)
//! hit       = roll == 20 || effective >= armor_class
//! ```

use crate::config::GameConfig;
use crate::state::EquipmentSlot;

/// A roll of the top face of the attack die.
pub fn is_natural(roll: u32) -> bool {
    roll == GameConfig::ATTACK_DIE
}

/// Roll penalty for attacking with a weapon in `hand` while dual wielding.
pub fn hand_penalty(hand: EquipmentSlot) -> u32 {
    match hand {
        EquipmentSlot::LeftHand => GameConfig::LEFT_HAND_PENALTY,
        _ => GameConfig::RIGHT_HAND_PENALTY,
    }
}

/// Attack roll after the dual-wield penalty, floored at 0.
pub fn effective_roll(roll: u32, hand: EquipmentSlot, dual_wielding: bool) -> u32 {
    if !dual_wielding || is_natural(roll) {
        return roll;
    }
    roll.saturating_sub(hand_penalty(hand))
}

/// A natural roll always hits, regardless of armor class.
pub fn check_hit(roll: u32, effective: u32, armor_class: u32) -> bool {
    is_natural(roll) || effective >= armor_class
}
