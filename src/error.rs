//! # Runtime Errors
//!
//! Every contract violation the runtime can detect is reported through
//! [`ActorError`]. Configuration problems surface at the call that caused
//! them (`create`, `create_group`, `Group::get`, `register`), never later on
//! an actor thread.

use crate::actor::ActorIdentity;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ActorError>;

/// Errors raised by the actor runtime itself.
///
/// Failures inside user hooks are not wrapped here unless the hook panicked,
/// in which case the panic is reported as [`ActorError::Panicked`] when the
/// actor is awaited.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    #[error("mailbox size was not configured for reactor {actor}")]
    MailboxSizeUnset { actor: ActorIdentity },

    #[error("mailbox size must be positive for reactor {actor}")]
    ZeroMailboxSize { actor: ActorIdentity },

    #[error("group size must be positive")]
    EmptyGroup,

    #[error("group index {index} out of bounds (size {size})")]
    GroupIndexOutOfBounds { index: usize, size: usize },

    #[error("actor system already started")]
    SystemStarted,

    #[error("actor {actor} already started")]
    AlreadyStarted { actor: ActorIdentity },

    #[error("actor {actor} was never started")]
    NotStarted { actor: ActorIdentity },

    #[error("failed to spawn thread for actor {actor}: {source}")]
    Spawn {
        actor: ActorIdentity,
        #[source]
        source: std::io::Error,
    },

    #[error("actor {actor} panicked: {message}")]
    Panicked { actor: ActorIdentity, message: String },
}

impl ActorError {
    /// Returns `true` for errors caused by builder or group misuse.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ActorError::MailboxSizeUnset { .. }
                | ActorError::ZeroMailboxSize { .. }
                | ActorError::EmptyGroup
                | ActorError::GroupIndexOutOfBounds { .. }
        )
    }
}
