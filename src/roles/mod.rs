//! Staff coordinators.
//!
//! Each role holds cloned clients for the kitchen and table actors plus its own event
//! subscription. Roles own no shared state; everything they change goes through an
//! actor request.

mod cook;
mod manager;
mod notifications;
mod server;

pub use cook::Cook;
pub use manager::Manager;
pub use notifications::{NotificationFeed, NOTIFICATION_CAPACITY};
pub use server::Server;

use crate::bootstrap::ConfigurationError;
use crate::clients::KitchenClient;
use crate::journal::Logbook;
use crate::kitchen_actor::KitchenError;
use crate::model::Ingredient;
use crate::table_actor::TableError;
use async_trait::async_trait;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Errors surfaced by coordinator operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RoleError {
    #[error(transparent)]
    Kitchen(#[from] KitchenError),
    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Server,
    Cook,
    Manager,
}

impl FromStr for Role {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Server" => Ok(Role::Server),
            "Cook" => Ok(Role::Cook),
            "Manager" => Ok(Role::Manager),
            other => Err(ConfigurationError::UnknownRole(other.to_string())),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Server => "Server",
            Role::Cook => "Cook",
            Role::Manager => "Manager",
        };
        f.write_str(name)
    }
}

/// Behaviour shared by every member of staff.
#[async_trait]
pub trait Employee: Send + Sync {
    fn name(&self) -> &str;

    fn role(&self) -> Role;

    fn kitchen(&self) -> &KitchenClient;

    fn logbook(&self) -> &Logbook;

    /// Logs the delivery, then adds it to the kitchen's stock.
    async fn receive_shipment(&self, shipment: Ingredient) -> Result<(), RoleError> {
        self.logbook()
            .record(self.name(), "received a shipment of", &shipment);
        self.kitchen().receive_shipment(shipment).await?;
        Ok(())
    }
}
