//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and from the engine so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use mud_core::{EngineError, WorldError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("runtime worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error("invalid actor profile: {0}")]
    InvalidProfile(String),

    #[error("actor '{actor}' refers to unknown item '{item}'")]
    UnknownItem { actor: String, item: String },
}

impl RuntimeError {
    /// Text for the player when the engine turned a command down.
    pub fn player_message(&self) -> Option<String> {
        match self {
            Self::Engine(error) => error.message(),
            _ => None,
        }
    }
}
