use crate::state::Posture;

/// Engine constants and tunable parameters.
///
/// The associated constants are fixed by the combat and stat formulas; the
/// fields are loaded from content and may differ between worlds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Use a natural "fists" weapon when nothing is wielded.
    pub unarmed_fallback: bool,
    /// Seconds a single step takes while standing.
    pub move_cooldown_stand: u32,
    /// Seconds a single step takes while crouching.
    pub move_cooldown_crouch: u32,
    /// Seconds a single step takes while prone.
    pub move_cooldown_prone: u32,
    /// Base seconds needed to swap a magazine, reduced by agility.
    pub reload_base_cooldown: u32,
    /// Name given to a corpse item; `{}` is replaced by the dead actor's name.
    pub corpse_name: String,
}

impl GameConfig {
    // ===== ability bounds =====
    pub const MIN_ABILITY: u32 = 1;
    pub const MAX_ABILITY: u32 = 60;
    /// Modifiers above this value stop improving logarithmic bonuses.
    pub const ABILITY_LOG_CAP: u32 = 25;

    // ===== combat =====
    pub const ATTACK_DIE: u32 = 20;
    pub const RIGHT_HAND_PENALTY: u32 = 6;
    pub const LEFT_HAND_PENALTY: u32 = 10;
    pub const CRITICAL_MULTIPLIER: u32 = 2;
    pub const BASE_ARMOR_CLASS: u32 = 10;

    // ===== cooldown / stamina formulas =====
    pub const BASE_COMBAT_COOLDOWN: f64 = 5.0;
    pub const BASE_STAMINA_COST: f64 = 1.0;
    pub const BODY_WEIGHT_CAP: u32 = 320;
    pub const CARRIED_WEIGHT_CAP: u32 = 300;
    pub const WEAPON_WEIGHT_CAP: u32 = 40;

    // ===== derived resources =====
    pub const BASE_HEALTH: u32 = 40;
    pub const HEALTH_PER_MODIFIER: u32 = 10;
    pub const BASE_STAMINA: u32 = 50;
    pub const STAMINA_PER_MODIFIER: u32 = 15;
    pub const BASE_CARRY_WEIGHT: u32 = 50;
    pub const CARRY_PER_MODIFIER: u32 = 10;
    pub const BASE_VIEW_DISTANCE: u32 = 3;

    // ===== unarmed fallback =====
    pub const FISTS_MIN_DAMAGE: u32 = 1;
    pub const FISTS_MAX_DAMAGE: u32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_COOLDOWN_STAND: u32 = 1;
    pub const DEFAULT_MOVE_COOLDOWN_CROUCH: u32 = 2;
    pub const DEFAULT_MOVE_COOLDOWN_PRONE: u32 = 4;
    pub const DEFAULT_RELOAD_BASE_COOLDOWN: u32 = 3;

    pub fn new() -> Self {
        Self {
            unarmed_fallback: false,
            move_cooldown_stand: Self::DEFAULT_MOVE_COOLDOWN_STAND,
            move_cooldown_crouch: Self::DEFAULT_MOVE_COOLDOWN_CROUCH,
            move_cooldown_prone: Self::DEFAULT_MOVE_COOLDOWN_PRONE,
            reload_base_cooldown: Self::DEFAULT_RELOAD_BASE_COOLDOWN,
            corpse_name: "the corpse of {}".to_owned(),
        }
    }

    pub fn with_unarmed_fallback(mut self, enabled: bool) -> Self {
        self.unarmed_fallback = enabled;
        self
    }

    /// Seconds a step takes in the given posture.
    ///
    /// Postures that cannot walk fall back to the standing speed; movement
    /// validation rejects them before the cooldown matters.
    pub fn move_cooldown(&self, posture: Posture) -> u32 {
        match posture {
            Posture::Crouch => self.move_cooldown_crouch,
            Posture::Prone => self.move_cooldown_prone,
            _ => self.move_cooldown_stand,
        }
    }

    pub fn corpse_name_for(&self, name: &str) -> String {
        self.corpse_name.replace("{}", name)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
