//! Custom actions for the Table actor.
//!
//! Every order and every ordered dish lives inside its table, so all dish status
//! changes go through here.

use crate::model::{Bill, DishId, DishKey, DishStatus, DishTicket, OrderNumber, OrderedDish};

/// Custom actions for Table entities.
#[derive(Debug, Clone)]
pub enum TableAction {
    /// Opens a new order with the next order number.
    OpenOrder,
    AddTentative { order: OrderNumber, dish: OrderedDish },
    RemoveTentative { order: OrderNumber, dish: DishId },
    /// Removes a finalized dish, only if it was cancelled.
    RemoveRejected { order: OrderNumber, dish: DishId },
    /// Finalizes the tentative dishes of every order, in order-list order.
    FinalizeAll,
    /// Moves a finalized dish one step (or cancels it), but only from `expect`.
    Transition {
        order: OrderNumber,
        dish: DishId,
        expect: DishStatus,
        proceed: bool,
    },
    /// Sends a served dish back for rework.
    ReturnDish { order: OrderNumber, dish: DishId },
    Bill { order: Option<OrderNumber> },
    Resolve { order: OrderNumber },
    /// Dishes at this table that are READY and not yet confirmed served.
    PendingDelivery,
}

/// An order removed from its table, with its bill.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub bill: Bill,
    /// Orders still open at the table afterwards.
    pub remaining: usize,
}

/// Results from TableActions - variants match 1:1 with TableAction
#[derive(Debug, Clone)]
pub enum TableActionResult {
    OpenOrder(OrderNumber),
    AddTentative(bool),
    RemoveTentative(bool),
    RemoveRejected(bool),
    FinalizeAll(Vec<DishTicket>),
    /// New status, or `None` if the dish was missing or not in the expected state.
    Transition(Option<DishStatus>),
    ReturnDish(Option<DishTicket>),
    Bill(Option<Bill>),
    Resolve(Option<Resolved>),
    PendingDelivery(Vec<DishKey>),
}
