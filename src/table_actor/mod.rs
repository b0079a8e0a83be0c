//! Table resource logic: orders, ordered dishes and billing.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::events::EventBus;
use crate::framework::ResourceActor;
use crate::journal::Journal;
use crate::clients::TableClient;
use crate::model::{OrderSequence, Table};
use std::sync::Arc;

/// Dependencies injected into the table actor when it starts.
#[derive(Clone)]
pub struct TableContext {
    pub bus: EventBus,
    /// Shared by every table so order numbers stay unique across the restaurant.
    pub order_numbers: Arc<OrderSequence>,
    pub journal: Arc<dyn Journal>,
}

/// Creates a new Table actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Table>, TableClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, TableClient::new(generic_client))
}
