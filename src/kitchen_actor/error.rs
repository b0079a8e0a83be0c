//! Error types for the Kitchen actor.

use thiserror::Error;

/// Errors that can occur during kitchen operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum KitchenError {
    /// No kitchen is registered under this id.
    #[error("Kitchen not found: {0}")]
    NotFound(String),

    /// The actor answered an action with a result for a different action.
    #[error("Unexpected kitchen result for {0}")]
    UnexpectedResult(&'static str),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for KitchenError {
    fn from(msg: String) -> Self {
        KitchenError::ActorCommunicationError(msg)
    }
}
