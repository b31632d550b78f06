//! Error types surfaced by the engine facade.

use crate::action::ActionFailure;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown actor {0}")]
    UnknownActor(EntityId),

    /// The order failed validation and was never installed.
    #[error("order rejected: {0}")]
    Rejected(ActionFailure),

    /// An installed action failed once its cooldown elapsed.
    #[error("action failed: {0}")]
    Failed(ActionFailure),
}

impl EngineError {
    /// Text shown to the actor, if the error concerns one.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::UnknownActor(_) => None,
            Self::Rejected(failure) | Self::Failed(failure) => Some(failure.message()),
        }
    }
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownActor(_) => ErrorSeverity::Internal,
            Self::Rejected(failure) | Self::Failed(failure) => failure.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::UnknownActor(_) => None,
            Self::Rejected(failure) | Self::Failed(failure) => failure.context(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActor(_) => "ENGINE_UNKNOWN_ACTOR",
            Self::Rejected(failure) | Self::Failed(failure) => failure.error_code(),
        }
    }
}
