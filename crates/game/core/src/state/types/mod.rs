pub mod abilities;
pub mod actor;
pub mod common;
pub mod item;
pub mod posture;
pub mod status;

pub use abilities::{Abilities, Ability, AbilityError};
pub use actor::{ActorKind, ActorSpec, ActorState, Equipment, EquipmentSlot};
pub use common::{Direction, EntityId, ItemId, RoomId};
pub use item::{
    AmmoKind, ItemFlags, ItemKind, ItemState, ItemTemplate, ResourceKind, ToolKind, WeaponProfile,
};
pub use posture::Posture;
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};
