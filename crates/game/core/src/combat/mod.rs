//! Combat resolution.
//!
//! The roll and damage rules are pure functions over plain numbers
//! ([`hit`], [`damage`], [`result`]). [`resolver`] applies them to the world
//! for one combat step, and [`death`] turns a slain actor into a corpse.
//!
//! ```text
//! basic_attack
//!   ├─ prune opponents
//!   └─ for each active weapon (right hand, then left)
//!        target at range? ─ stamina? ─ roll ─┬─ miss: cost / 2
//!                                            └─ hit:  cost, damage ─┬─ death
//!                                                                   └─ retaliation
//! ```

pub mod damage;
pub mod death;
pub mod hit;
pub mod opponents;
pub mod resolver;
pub mod result;
pub mod weapons;

pub use damage::{aggro_from_damage, apply_damage, calculate_damage, two_handed_bonus};
pub use death::kill;
pub use hit::{check_hit, effective_roll, hand_penalty, is_natural};
pub use opponents::{Opponent, OpponentList, default_aggro};
pub use resolver::{CombatOutcome, attack_cooldown, basic_attack, flee, retreat_cooldown};
pub use result::{AttackOutcome, AttackResult, resolve_attack};
pub use weapons::{ActiveWeapon, active_weapons, loaded_rounds, spend_round};
