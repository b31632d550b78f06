//! Equipment slots of an actor.
//!
//! Slots hold item handles; the items themselves live in the world arena.
//! A two-handed weapon sits in [`EquipmentSlot::RightHand`] and the equip
//! rules in [`crate::state::World::equip`] keep the left hand empty.

use std::collections::BTreeMap;

use crate::state::ItemId;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentSlot {
    Head,
    Torso,
    Back,
    Legs,
    Feet,
    RightHand,
    LeftHand,
}

impl EquipmentSlot {
    /// Hands in the order weapons are resolved.
    pub const HANDS: [Self; 2] = [Self::RightHand, Self::LeftHand];

    pub const fn is_hand(self) -> bool {
        matches!(self, Self::RightHand | Self::LeftHand)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Equipment {
    slots: BTreeMap<EquipmentSlot, ItemId>,
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> Option<ItemId> {
        self.slots.get(&slot).copied()
    }

    /// Puts an item in a slot, returning whatever was there before.
    pub fn set(&mut self, slot: EquipmentSlot, item: ItemId) -> Option<ItemId> {
        self.slots.insert(slot, item)
    }

    pub fn remove(&mut self, slot: EquipmentSlot) -> Option<ItemId> {
        self.slots.remove(&slot)
    }

    pub fn slot_of(&self, item: ItemId) -> Option<EquipmentSlot> {
        self.slots
            .iter()
            .find_map(|(slot, held)| (*held == item).then_some(*slot))
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.slot_of(item).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, ItemId)> + '_ {
        self.slots.iter().map(|(slot, item)| (*slot, *item))
    }

    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.slots.values().copied()
    }

    /// Empties every slot, returning the items in slot order.
    pub fn clear(&mut self) -> Vec<ItemId> {
        std::mem::take(&mut self.slots).into_values().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
