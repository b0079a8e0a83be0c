//! Typed notifications between the kitchen, the tables and the staff.
//!
//! ```text
//!  Kitchen actor ──NextDishReady──▶ ┌──────────┐ ──▶ Cook
//!                ──RestockNeeded──▶ │ EventBus │ ──▶ Manager
//!  Table actor ─DishStatusChanged─▶ │ per-sub  │ ──▶ Server (own tables only)
//!  Logbook ──────────LogLine──────▶ └──────────┘ ──▶ log sinks
//! ```

mod bus;

pub use bus::{EventBus, Subscription};

use crate::journal::LogEntry;
use crate::model::{DishKey, DishSignal, Ingredient};

/// A dish on one of a server's orders became READY or CANCELLED.
#[derive(Debug, Clone, PartialEq)]
pub struct DishNotice {
    /// Server who owns the table.
    pub server: String,
    pub key: DishKey,
    /// Dish name, e.g. `Pasta`.
    pub name: String,
    /// Full dish label, e.g. `#4, Pasta, with 1 Noodles`.
    pub label: String,
    pub signal: DishSignal,
}

impl DishNotice {
    /// What the server is told.
    pub fn text(&self) -> String {
        let order = format!("Table #{}, Order #{}", self.key.table, self.key.order);
        match self.signal {
            DishSignal::Ready => format!("{} for {order} is ready to be served", self.label),
            DishSignal::Cancelled => format!(
                "Tell {order} that the {} is currently unavailable, and remove {} from their ordered dishes",
                self.name, self.label
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantEvent {
    /// The production-queue head changed. Empty label when the queue is empty.
    NextDishReady { label: String },
    /// A withdrawal left an ingredient at or below its threshold.
    RestockNeeded { ingredient: Ingredient, threshold: f64 },
    DishStatusChanged(DishNotice),
    LogLine(LogEntry),
}

/// Who a subscription is for. Each audience sees exactly one event kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    Cooks,
    Managers,
    /// A single server, by name.
    Server(String),
    LogSinks,
}

impl Audience {
    pub fn accepts(&self, event: &RestaurantEvent) -> bool {
        match (self, event) {
            (Audience::Cooks, RestaurantEvent::NextDishReady { .. }) => true,
            (Audience::Managers, RestaurantEvent::RestockNeeded { .. }) => true,
            (Audience::Server(name), RestaurantEvent::DishStatusChanged(notice)) => {
                notice.server == *name
            }
            (Audience::LogSinks, RestaurantEvent::LogLine(_)) => true,
            _ => false,
        }
    }
}
