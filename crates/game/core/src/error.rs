//! Common error infrastructure for mud-core.
//!
//! Domain errors (`ActionError`, `WorldError`, `AbilityError`, ...) live next to
//! the code that raises them and implement [`GameError`] so callers can classify
//! failures without matching on every variant.
//!
//! Every failure in the engine is scoped to a single actor. Nothing here is
//! meant to abort the process; `Fatal` is reserved for wiring mistakes such as
//! a missing definition the content layer promised to provide.

use crate::state::{EntityId, RoomId};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; retrying later may succeed.
    ///
    /// Examples: too tired, locked in close combat
    Recoverable,

    /// Invalid request; the same command will keep failing.
    ///
    /// Examples: no exit in that direction, unknown production
    Validation,

    /// Unexpected state inconsistency that should be investigated.
    Internal,

    /// Unrecoverable wiring error.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Actor whose action failed.
    pub actor: Option<EntityId>,

    /// Room the actor was in when the error occurred.
    pub room: Option<RoomId>,

    /// World nonce at the time of error.
    pub nonce: u64,

    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(nonce: u64) -> Self {
        Self {
            actor: None,
            room: None,
            nonce,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub const fn with_room(mut self, room: RoomId) -> Self {
        self.room = Some(room);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all mud-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the `Display`/`Error` impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code` stable; logs and tests match on it
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
