//! Item data as seen by the action engine.
//!
//! Item definitions belong to the item subsystem. The engine only needs the
//! handful of numbers combat and crafting read (weights, damage ranges,
//! armor values, resource and tool kinds) plus containment for corpses and
//! loaded magazines.

use bitflags::bitflags;

use super::ItemId;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ItemFlags: u8 {
        /// Wielded with both hands; occupies the right-hand slot and keeps
        /// the left hand empty.
        const TWO_HANDED = 1 << 0;
        /// Identical units merge into one item with a quantity.
        const STACKABLE  = 1 << 1;
        /// Can hold other items (corpses, quivers).
        const CONTAINER  = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AmmoKind {
    Arrow,
    Bolt,
    Bullet,
    Stone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolKind {
    Hammer,
    Saw,
    Knife,
    Needle,
    Pickaxe,
    Chisel,
    Tongs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Wood,
    Stone,
    Metal,
    Leather,
    Cloth,
    Bone,
    Coal,
    Fiber,
}

/// Combat numbers of a weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub min_damage: u32,
    pub max_damage: u32,
    /// Reach in rooms; melee weapons use 0.
    pub range: u32,
    /// Ammunition a ranged weapon fires. `None` for melee weapons.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ammo: Option<AmmoKind>,
}

impl WeaponProfile {
    pub const fn melee(min_damage: u32, max_damage: u32) -> Self {
        Self {
            min_damage,
            max_damage,
            range: 0,
            ammo: None,
        }
    }

    pub const fn ranged(min_damage: u32, max_damage: u32, range: u32, ammo: AmmoKind) -> Self {
        Self {
            min_damage,
            max_damage,
            range,
            ammo: Some(ammo),
        }
    }

    pub const fn is_ranged(&self) -> bool {
        self.ammo.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Weapon(WeaponProfile),
    Armor { damage_absorption: u32 },
    Shield { parry_chance: u32 },
    Magazine { ammo: AmmoKind, rounds: u32, capacity: u32 },
    Tool(ToolKind),
    Resource(ResourceKind),
    Building,
    Corpse,
    Misc,
}

/// Static description of an item, used to create instances.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub name: String,
    pub weight: u32,
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: ItemFlags,
    #[cfg_attr(feature = "serde", serde(default = "ItemTemplate::default_condition"))]
    pub condition: u32,
}

impl ItemTemplate {
    pub const DEFAULT_CONDITION: u32 = 100;

    pub fn new(name: impl Into<String>, weight: u32, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            weight,
            kind,
            flags: ItemFlags::empty(),
            condition: Self::DEFAULT_CONDITION,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: u32) -> Self {
        self.condition = condition;
        self
    }

    #[cfg(feature = "serde")]
    fn default_condition() -> u32 {
        Self::DEFAULT_CONDITION
    }
}

/// An item instance living in the world arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemState {
    pub id: ItemId,
    pub name: String,
    /// Weight of a single unit.
    pub weight: u32,
    pub quantity: u32,
    /// Remaining durability; tools break when it reaches 0.
    pub condition: u32,
    pub kind: ItemKind,
    pub flags: ItemFlags,
    /// Items held inside this one (corpse contents, a loaded magazine).
    pub contents: Vec<ItemId>,
}

impl ItemState {
    pub fn from_template(id: ItemId, template: &ItemTemplate, quantity: u32) -> Self {
        Self {
            id,
            name: template.name.clone(),
            weight: template.weight,
            quantity: quantity.max(1),
            condition: template.condition,
            kind: template.kind.clone(),
            flags: template.flags,
            contents: Vec::new(),
        }
    }

    /// Weight of the stack, excluding contents.
    pub fn own_weight(&self) -> u32 {
        self.weight.saturating_mul(self.quantity)
    }

    pub fn is_two_handed(&self) -> bool {
        self.flags.contains(ItemFlags::TWO_HANDED)
    }

    pub fn weapon(&self) -> Option<&WeaponProfile> {
        match &self.kind {
            ItemKind::Weapon(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn tool_kind(&self) -> Option<ToolKind> {
        match self.kind {
            ItemKind::Tool(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn resource_kind(&self) -> Option<ResourceKind> {
        match self.kind {
            ItemKind::Resource(kind) => Some(kind),
            _ => None,
        }
    }

    /// Lowers durability by one and reports whether the item broke.
    pub fn decay(&mut self) -> bool {
        self.condition = self.condition.saturating_sub(1);
        self.condition == 0
    }
}
