//! Custom actions for the Kitchen actor.
//!
//! These are the kitchen operations beyond the resource lifecycle: queue management,
//! ingredient reservation and the production pipeline. Shipments arrive as the
//! kitchen's update payload ([`KitchenUpdate`](crate::model::KitchenUpdate)).

use crate::model::{CookAttempt, DishKey, DishTicket, Ingredient};

/// Custom actions for the Kitchen entity.
#[derive(Debug, Clone)]
pub enum KitchenAction {
    /// Appends tickets to the production queue.
    Enqueue(Vec<DishTicket>),
    /// Pops the queue head.
    DequeueNext,
    /// Read-only availability check.
    SufficientFor(Vec<Ingredient>),
    /// Withdraws unconditionally, clamping at zero.
    Reserve(Vec<Ingredient>),
    /// Withdraws only if everything is available.
    TryReserve(Vec<Ingredient>),
    /// Dequeue, reserve and start cooking in one step.
    StartNext,
    MoveToInProgress(DishTicket),
    MoveToDeliverable(DishKey),
    /// The dish was served; forget it.
    MarkDelivered(DishKey),
    /// Drops a ticket from whichever collection holds it.
    Discard(DishKey),
    InventorySnapshot,
    WorkInProgress,
    Stock(String),
}

/// Results from KitchenActions - variants match 1:1 with KitchenAction
#[derive(Debug, Clone)]
pub enum KitchenActionResult {
    Enqueue(()),
    DequeueNext(Option<DishTicket>),
    SufficientFor(bool),
    Reserve(()),
    TryReserve(bool),
    StartNext(Option<CookAttempt>),
    MoveToInProgress(()),
    MoveToDeliverable(bool),
    MarkDelivered(bool),
    Discard(bool),
    InventorySnapshot(String),
    WorkInProgress(String),
    Stock(Option<f64>),
}
