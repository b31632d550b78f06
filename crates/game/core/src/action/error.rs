//! Action errors.
//!
//! The `Display` text of an [`ActionError`] is exactly what the acting
//! player reads, so variants are phrased as user messages. Whether the error
//! was raised while issuing the order or when its cooldown elapsed is carried
//! separately by [`ActionFailure`].

use std::fmt;

use crate::env::OracleError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{EntityId, ItemId, ResourceKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("You are currently nowhere.")]
    Nowhere,

    #[error("You cannot go that way.")]
    NoExit,

    #[error("You first need to stand up.")]
    MustStandUp,

    #[error("You first need to wake up.")]
    MustWakeUp,

    #[error("You cannot move while fighting in close combat.")]
    InCloseCombat,

    /// Not enough stamina. Carries the activity, e.g. "to move".
    #[error("You are too tired {0}.")]
    TooTired(&'static str),

    #[error("You don't know how to make that.")]
    UnknownProduction,

    #[error("You don't know how to build that.")]
    UnknownBuilding,

    /// A referenced tool or ingredient is no longer held.
    #[error("You no longer have everything you need.")]
    MissingItem(ItemId),

    #[error("You don't have the necessary tools.")]
    MissingTools,

    #[error("You don't have enough {0}.")]
    NotEnough(ResourceKind),

    #[error("You don't have the building with you.")]
    NoBuildingItem,

    #[error("You do not have a valid weapon equipped.")]
    NoWeapon,

    #[error("You have no opponents.")]
    NoOpponents,

    #[error("There is no way of escape.")]
    NoEscape,

    #[error("You have found nothing...")]
    FoundNothing,

    #[error("You must wield a ranged weapon to reload.")]
    NotReloadable,

    #[error("You don't have that magazine.")]
    NoMagazine,

    #[error("{magazine} does not fit {weapon}.")]
    IncompatibleMagazine { magazine: String, weapon: String },

    #[error("You cannot attack that.")]
    InvalidTarget(EntityId),

    #[error("{0}")]
    Oracle(#[from] OracleError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TooTired(_) => ErrorSeverity::Recoverable,
            Self::Oracle(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Nowhere => "ACTION_NOWHERE",
            Self::NoExit => "ACTION_NO_EXIT",
            Self::MustStandUp => "ACTION_MUST_STAND_UP",
            Self::MustWakeUp => "ACTION_MUST_WAKE_UP",
            Self::InCloseCombat => "ACTION_IN_CLOSE_COMBAT",
            Self::TooTired(_) => "ACTION_TOO_TIRED",
            Self::UnknownProduction => "ACTION_UNKNOWN_PRODUCTION",
            Self::UnknownBuilding => "ACTION_UNKNOWN_BUILDING",
            Self::MissingItem(_) => "ACTION_MISSING_ITEM",
            Self::MissingTools => "ACTION_MISSING_TOOLS",
            Self::NotEnough(_) => "ACTION_NOT_ENOUGH_MATERIAL",
            Self::NoBuildingItem => "ACTION_NO_BUILDING_ITEM",
            Self::NoWeapon => "ACTION_NO_WEAPON",
            Self::NoOpponents => "ACTION_NO_OPPONENTS",
            Self::NoEscape => "ACTION_NO_ESCAPE",
            Self::FoundNothing => "ACTION_FOUND_NOTHING",
            Self::NotReloadable => "ACTION_NOT_RELOADABLE",
            Self::NoMagazine => "ACTION_NO_MAGAZINE",
            Self::IncompatibleMagazine { .. } => "ACTION_INCOMPATIBLE_MAGAZINE",
            Self::InvalidTarget(_) => "ACTION_INVALID_TARGET",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// When an action error was raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionPhase {
    /// While validating a new order; the action was never installed.
    Check,
    /// When the cooldown elapsed; the actor reverts to waiting.
    Perform,
}

impl ActionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionPhase::Check => "check",
            ActionPhase::Perform => "perform",
        }
    }
}

/// An [`ActionError`] tagged with its phase and the acting entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionFailure {
    pub phase: ActionPhase,
    pub error: ActionError,
    pub context: ErrorContext,
}

impl ActionFailure {
    pub fn new(phase: ActionPhase, error: ActionError, context: ErrorContext) -> Self {
        Self {
            phase,
            error,
            context,
        }
    }

    /// Text shown to the acting player.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for ActionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl std::error::Error for ActionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl GameError for ActionFailure {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }

    fn context(&self) -> Option<&ErrorContext> {
        Some(&self.context)
    }
}
