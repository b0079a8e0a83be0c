//! Error types for the Table actor.

use crate::model::TableNumber;
use thiserror::Error;

/// Errors that can occur during table operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    /// Tables are closed only once every order has been resolved.
    #[error("Table #{0} still has open orders")]
    HasOpenOrders(TableNumber),

    /// The actor answered an action with a result for a different action.
    #[error("Unexpected table result for {0}")]
    UnexpectedResult(&'static str),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TableError {
    fn from(msg: String) -> Self {
        TableError::ActorCommunicationError(msg)
    }
}
