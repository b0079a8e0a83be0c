//! Generic single-writer actor framework.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait a resource implements to be owned by an actor
//! - [`ResourceActor`] - Task that owns a store of entities and serializes access to it
//! - [`ResourceClient`] - Cloneable handle that sends requests to the actor
//! - [`ActorClient`] - Shared `get`/`delete` for domain-specific clients
//! - [`FrameworkError`] - Plumbing failures
//!
//! # Testing
//!
//! See [`mock`] for scripted stand-ins of a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
