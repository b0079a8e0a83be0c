//! Starting and stopping the restaurant.

mod restaurant;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use restaurant::{Restaurant, Staff};
