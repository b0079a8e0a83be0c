//! # ActorEntity Trait
//!
//! The contract a resource (the [`Kitchen`](crate::model::Kitchen), each
//! [`Table`](crate::model::Table)) implements to be owned by a [`ResourceActor`](super::ResourceActor).
//!
//! Associated types pin down the payloads: a `Table` can only be created from a
//! [`TableCreate`](crate::model::TableCreate) and only accepts
//! [`TableAction`](crate::table_actor::TableAction)s, so a kitchen request can never
//! reach a table actor.
//!
//! # Provided Methods (Hooks)
//! [`ActorEntity::on_create`] and [`ActorEntity::on_delete`] default to `Ok(())`.
//! Override them to validate or to refuse a lifecycle step.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so that they may await other actors. Dependencies arrive through
/// `Context`, injected once when the actor loop starts (`run(context)`), not at
/// construction time.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Key of the entity inside its actor's store.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload applied by an update request.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `StartNext`, `Transition`).
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into every hook. Use `()` if none.
    type Context: Send + Sync;

    /// Per-actor error type, boxed into [`FrameworkError::EntityError`](super::FrameworkError::EntityError)
    /// on its way back to the caller.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Chooses the key for a new entity.
    ///
    /// `seq` is the actor's own creation counter (starting at 1). Entities with a
    /// natural key, like a table number, ignore it and read the key from `params`.
    fn assign_id(seq: u32, params: &Self::Create) -> Self::Id;

    /// Construct the entity from its key and creation payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is removed. Returning an error keeps it in the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
