//! Kitchen resource logic: production queue, pipeline and inventory.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Kitchen;

/// Creates a new Kitchen actor and its generic client.
///
/// The kitchen itself is registered afterwards with
/// [`KitchenClient::open`](crate::clients::KitchenClient::open), once the actor runs.
pub fn new(buffer_size: usize) -> (ResourceActor<Kitchen>, ResourceClient<Kitchen>) {
    ResourceActor::new(buffer_size)
}
