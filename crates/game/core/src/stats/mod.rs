//! Derived stat formulas.
//!
//! Everything here is a pure function of actor data; nothing is stored.
//!
//! ```text
//! [ core: ability modifier / ability log ]
//!      ↓
//! [ resources: max health, max stamina, regeneration ]
//!      ↓
//! [ derived: armor class, carrying capacity, view distance, StatBlock ]
//!      ↓
//! [ cost: combat cooldowns, stamina costs ]
//! ```

pub mod conditions;
pub mod core;
pub mod cost;
pub mod derived;
pub mod resources;

pub use conditions::HealthCondition;
pub use core::{ability_log, ability_modifier};
pub use cost::{LoadProfile, combat_cooldown, flee_cooldown, stamina_cost};
pub use derived::{StatBlock, armor_class, max_carry_weight, view_distance};
pub use resources::{health_regen, max_health, max_stamina, stamina_regen};
