//! # Observability & Tracing
//!
//! Two separate streams come out of a running restaurant:
//!
//! - **Diagnostics**: `tracing` events and spans from the actors, clients and
//!   coordinators. Configured here.
//! - **Activity log**: the domain record ("Mo has seen #3, Soup, ..."). Written by
//!   [`Logbook`](crate::journal::Logbook) to the injected journal and also echoed as an
//!   `info` event with `actor`, `action` and `subject` fields.
//!
//! ## Configuration
//!
//! Levels come from `RUST_LOG`. The format is compact and hides module paths
//! (`with_target(false)`); actors identify themselves with an `entity_type` field instead.
//!
//! ```bash
//! # Activity and actor lifecycle
//! RUST_LOG=info cargo run
//!
//! # Every request sent to the kitchen and table actors
//! RUST_LOG=debug cargo run
//!
//! # Only the framework
//! RUST_LOG=kitchen_engine::framework=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start, stop and final store size
//! - **Requests**: create, get, update, delete and actions, with the entity id
//! - **Coordinators**: one span per server, cook or manager operation
//! - **Journal failures**: `error` events; the operation that produced the record stands
//!
//! With `RUST_LOG=info` a dish going through the kitchen reads like:
//!
//! ```text
//! INFO finalize_table{table=1 server="Ana"}: Activity actor="Ana" action="sent the orders for" subject="table #1 to the kitchen."
//! INFO mark_seen_and_parse{cook="Mo"}: Activity actor="Mo" action="has seen" subject="#0, Soup, with 1 Water"
//! INFO complete_dish{cook="Mo"}: Activity actor="Mo" action="has finished cooking" subject="#0, Soup, with 1 Water"
//! ```

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
