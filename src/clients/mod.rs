//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod kitchen_client;
pub mod table_client;

pub use kitchen_client::*;
pub use table_client::*;
