//! World arena errors.
//!
//! Raised by setup and inventory primitives (spawning, giving, equipping).
//! Action code converts the ones it can hit at execution time into
//! user-facing [`crate::action::ActionError`]s.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, EquipmentSlot, ItemId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("actor {0} does not exist")]
    UnknownActor(EntityId),

    #[error("{0} does not exist")]
    UnknownItem(ItemId),

    #[error("{item} is not carried by {actor}")]
    NotCarried { actor: EntityId, item: ItemId },

    #[error("{item} cannot be worn in {slot}")]
    WrongSlot { item: ItemId, slot: EquipmentSlot },

    #[error("{slot} of {actor} is already occupied")]
    SlotOccupied { actor: EntityId, slot: EquipmentSlot },

    #[error("{actor} needs both hands free for {item}")]
    HandsOccupied { actor: EntityId, item: ItemId },

    #[error("{0} is not located anywhere")]
    Nowhere(EntityId),
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownActor(_) | Self::UnknownItem(_) => ErrorSeverity::Internal,
            Self::NotCarried { .. }
            | Self::WrongSlot { .. }
            | Self::SlotOccupied { .. }
            | Self::HandsOccupied { .. }
            | Self::Nowhere(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActor(_) => "WORLD_UNKNOWN_ACTOR",
            Self::UnknownItem(_) => "WORLD_UNKNOWN_ITEM",
            Self::NotCarried { .. } => "WORLD_NOT_CARRIED",
            Self::WrongSlot { .. } => "WORLD_WRONG_SLOT",
            Self::SlotOccupied { .. } => "WORLD_SLOT_OCCUPIED",
            Self::HandsOccupied { .. } => "WORLD_HANDS_OCCUPIED",
            Self::Nowhere(_) => "WORLD_NOWHERE",
        }
    }
}
