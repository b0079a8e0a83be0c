//! # Kitchen Engine
//!
//! > **Order lifecycle and kitchen coordination for a restaurant, built on resource actors.**
//!
//! Servers open tables and orders, the kitchen queues and cooks dishes against a finite
//! inventory, and every status change reaches exactly the staff member who needs it.
//!
//! ## 🏗️ Design
//!
//! ### Single writers
//! The kitchen (inventory, production queue, in-progress and deliverable sets) and the
//! tables (orders and their dishes) each live inside one [`ResourceActor`](framework::ResourceActor).
//! Requests are processed one at a time, so the FIFO order of the queue and the
//! check-and-reserve of ingredients need no locks.
//!
//! ### Tickets, not dishes
//! The kitchen holds [`DishTicket`](model::DishTicket)s: a `(table, order, dish)` key plus
//! the label and requirements. The authoritative dish status stays with its order, and
//! coordinators move it through [`TableClient::transition`](clients::TableClient::transition).
//!
//! ### Typed notifications
//! One [`EventBus`](events::EventBus) routes every event. Each subscriber
//! registers for an [`Audience`](events::Audience) and sees only its own kind: cooks get
//! the next queued dish, managers get restock requests, a server gets notices for the
//! tables it owns.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic actor: message loop, CRUD plus custom actions, typed clients and a mock.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`ResourceActor`](framework::ResourceActor), [`MockClient`](framework::mock::MockClient).
//!
//! ### 2. The Domain ([`model`])
//! Plain data and rules: ingredients, inventory, menu, the dish state machine, orders,
//! tables, bills and the kitchen pipeline. No async code.
//!
//! ### 3. The Actors ([`kitchen_actor`], [`table_actor`])
//! `ActorEntity` implementations for [`Kitchen`](model::Kitchen) and [`Table`](model::Table).
//!
//! ### 4. The Interface ([`clients`])
//! [`KitchenClient`](clients::KitchenClient) and [`TableClient`](clients::TableClient) hide
//! the message passing.
//!
//! ### 5. The Staff ([`roles`])
//! [`Server`](roles::Server), [`Cook`](roles::Cook) and [`Manager`](roles::Manager)
//! coordinators, each with cloned clients and its own subscription.
//!
//! ### 6. The Edges ([`bootstrap`], [`config`], [`journal`], [`events`])
//! Seed files in, activity log, restock requests and payment records out.
//!
//! ### 7. The Orchestrator ([`lifecycle`])
//! - **Key items**: [`Restaurant`](lifecycle::Restaurant), [`shutdown`](lifecycle::Restaurant::shutdown).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Demo run against the seed files in RESTAURANT_DATA_DIR (default: current dir)
//! RUST_LOG=info cargo run
//!
//! cargo test
//! ```

pub mod bootstrap;
pub mod clients;
pub mod config;
pub mod events;
pub mod framework;
pub mod journal;
pub mod kitchen_actor;
pub mod lifecycle;
pub mod model;
pub mod roles;
pub mod table_actor;
