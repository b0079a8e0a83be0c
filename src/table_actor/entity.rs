//! ActorEntity implementation for the [`Table`].
//!
//! Dish transitions that produce a READY or CANCELLED signal are published as a
//! [`DishNotice`] addressed to the table's server. A resolved order's bill is written
//! to the payment records before the order is removed.

use super::actions::{Resolved, TableAction, TableActionResult};
use super::error::TableError;
use super::TableContext;
use crate::events::{DishNotice, RestaurantEvent};
use crate::framework::ActorEntity;
use crate::model::{
    DishId, DishKey, DishSignal, DishStatus, DishTicket, OrderNumber, OrderedDish, Table,
    TableCreate, TableNumber,
};
use async_trait::async_trait;
use chrono::Local;
use tracing::{debug, info};

impl Table {
    fn key(&self, order: OrderNumber, dish: DishId) -> DishKey {
        DishKey {
            table: self.number,
            order,
            dish,
        }
    }

    fn notify(&self, key: DishKey, dish: &OrderedDish, signal: DishSignal, ctx: &TableContext) {
        ctx.bus.publish(RestaurantEvent::DishStatusChanged(DishNotice {
            server: self.server.clone(),
            key,
            name: dish.name.clone(),
            label: dish.to_string(),
            signal,
        }));
    }

    fn transition_dish(
        &mut self,
        order: OrderNumber,
        id: DishId,
        expect: DishStatus,
        proceed: bool,
        ctx: &TableContext,
    ) -> Option<DishStatus> {
        let key = self.key(order, id);
        let dish = self.order_mut(order)?.finalized_dish_mut(id)?;
        if dish.status() != expect {
            debug!(%key, status = %dish.status(), %expect, "Transition skipped");
            return None;
        }
        let signal = dish.transition(proceed);
        let status = dish.status();
        let dish = dish.clone();
        if let Some(signal) = signal {
            self.notify(key, &dish, signal, ctx);
        }
        Some(status)
    }
}

#[async_trait]
impl ActorEntity for Table {
    type Id = TableNumber;
    type Create = TableCreate;
    type Update = ();
    type Action = TableAction;
    type ActionResult = TableActionResult;
    type Context = TableContext;
    type Error = TableError;

    /// Tables are keyed by their physical number.
    fn assign_id(_seq: u32, params: &TableCreate) -> TableNumber {
        params.number
    }

    fn from_create_params(id: TableNumber, params: TableCreate) -> Result<Self, TableError> {
        Ok(Table::new(id, params.server))
    }

    async fn on_update(&mut self, _update: (), _ctx: &TableContext) -> Result<(), TableError> {
        Ok(())
    }

    /// Refuses to close a table that still has orders.
    async fn on_delete(&self, _ctx: &TableContext) -> Result<(), TableError> {
        if self.orders().is_empty() {
            Ok(())
        } else {
            Err(TableError::HasOpenOrders(self.number))
        }
    }

    async fn handle_action(
        &mut self,
        action: TableAction,
        ctx: &TableContext,
    ) -> Result<TableActionResult, TableError> {
        let result = match action {
            TableAction::OpenOrder => {
                let number = ctx.order_numbers.next();
                self.open_order(number);
                TableActionResult::OpenOrder(number)
            }
            TableAction::AddTentative { order, dish } => {
                let added = match self.order_mut(order) {
                    Some(o) => {
                        o.add_tentative(dish);
                        true
                    }
                    None => false,
                };
                TableActionResult::AddTentative(added)
            }
            TableAction::RemoveTentative { order, dish } => TableActionResult::RemoveTentative(
                self.order_mut(order)
                    .is_some_and(|o| o.remove_tentative(dish)),
            ),
            TableAction::RemoveRejected { order, dish } => {
                let removed = self.order_mut(order).is_some_and(|o| {
                    o.finalized_dish(dish).is_some_and(OrderedDish::is_cancelled)
                        && o.remove_finalized(dish).is_some()
                });
                TableActionResult::RemoveRejected(removed)
            }
            TableAction::FinalizeAll => {
                let table = self.number;
                let mut tickets = Vec::new();
                for number in self.orders().iter().map(|o| o.number).collect::<Vec<_>>() {
                    let Some(order) = self.order_mut(number) else {
                        continue;
                    };
                    tickets.extend(order.finalize_tentative().iter().map(|dish| {
                        let key = DishKey {
                            table,
                            order: number,
                            dish: dish.id,
                        };
                        DishTicket::for_dish(key, dish)
                    }));
                }
                debug!(table = %self.number, finalized = tickets.len(), "Finalized");
                TableActionResult::FinalizeAll(tickets)
            }
            TableAction::Transition {
                order,
                dish,
                expect,
                proceed,
            } => TableActionResult::Transition(self.transition_dish(order, dish, expect, proceed, ctx)),
            TableAction::ReturnDish { order, dish } => {
                let key = self.key(order, dish);
                let ticket = self
                    .order_mut(order)
                    .and_then(|o| o.return_for_rework(dish))
                    .map(|returned| DishTicket::for_dish(key, returned));
                TableActionResult::ReturnDish(ticket)
            }
            TableAction::Bill { order } => TableActionResult::Bill(self.bill(order)),
            TableAction::Resolve { order } => {
                let resolved = self.take_settled(order).map(|(_, bill)| {
                    ctx.journal.payment(&bill, Local::now().date_naive());
                    info!(table = %self.number, %order, total = %bill.total, "Order resolved");
                    Resolved {
                        bill,
                        remaining: self.orders().len(),
                    }
                });
                TableActionResult::Resolve(resolved)
            }
            TableAction::PendingDelivery => TableActionResult::PendingDelivery(
                self.orders()
                    .iter()
                    .flat_map(|o| {
                        o.pending_delivery()
                            .into_iter()
                            .map(move |d| DishKey {
                                table: o.table,
                                order: o.number,
                                dish: d.id,
                            })
                    })
                    .collect(),
            ),
        };
        Ok(result)
    }
}
