//! Ability helpers - the bottom layer of the stat formulas.
//!
//! Linear ability scores become bonuses in two ways:
//! - `ability_modifier`: linear, `(score - 10) / 2`, never negative
//! - `ability_log`: sub-linear, `base + multiplier * log10(min(modifier, 25))`

use crate::config::GameConfig;

/// `max(0, (value - 10) / 2)` with integer division.
pub fn ability_modifier(value: u32) -> u32 {
    value.saturating_sub(10) / 2
}

/// Logarithmic bonus of an ability score, floored to a non-negative integer.
///
/// Returns `base` unchanged when the modifier is zero.
pub fn ability_log(value: u32, base: u32, multiplier: u32) -> u32 {
    let modifier = ability_modifier(value);
    if modifier == 0 {
        return base;
    }
    let capped = modifier.min(GameConfig::ABILITY_LOG_CAP);
    let result = f64::from(base) + f64::from(multiplier) * f64::from(capped).log10();
    result.floor().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_floors_at_zero() {
        assert_eq!(ability_modifier(1), 0);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(14), 2);
        assert_eq!(ability_modifier(60), 25);
    }

    #[test]
    fn log_returns_base_without_modifier() {
        assert_eq!(ability_log(10, 3, 5), 3);
        assert_eq!(ability_log(8, 0, 1), 0);
    }

    #[test]
    fn log_is_sub_linear_and_capped() {
        // modifier 5 -> log10(5) ~= 0.70
        assert_eq!(ability_log(20, 0, 1), 0);
        assert_eq!(ability_log(20, 0, 10), 6);
        // modifier 10 -> log10(10) = 1
        assert_eq!(ability_log(30, 0, 1), 1);
        // modifier 25 (cap) -> log10(25) ~= 1.40
        assert_eq!(ability_log(60, 0, 10), 13);
        assert_eq!(ability_log(60, 1, 3), 5);
    }
}
