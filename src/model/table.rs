use super::{Bill, BillLine, Order, OrderNumber, TableNumber};
use serde::{Deserialize, Serialize};

/// A physical table and the orders currently open at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub number: TableNumber,
    /// Name of the server who opened the table.
    pub server: String,
    orders: Vec<Order>,
}

/// Payload for opening a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCreate {
    pub number: TableNumber,
    pub server: String,
}

impl Table {
    pub fn new(number: TableNumber, server: impl Into<String>) -> Self {
        Self {
            number,
            server: server.into(),
            orders: Vec::new(),
        }
    }

    pub fn open_order(&mut self, number: OrderNumber) -> &Order {
        self.orders.push(Order::new(number, self.number));
        &self.orders[self.orders.len() - 1]
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, number: OrderNumber) -> Option<&Order> {
        self.orders.iter().find(|o| o.number == number)
    }

    pub fn order_mut(&mut self, number: OrderNumber) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.number == number)
    }

    pub fn has_pending_delivery(&self) -> bool {
        self.orders.iter().any(|o| !o.pending_delivery().is_empty())
    }

    /// Bill over served dishes, for one order or the whole table.
    ///
    /// Returns `None` when a specific order was asked for and is not open here.
    pub fn bill(&self, order: Option<OrderNumber>) -> Option<Bill> {
        let billed: Vec<&Order> = match order {
            Some(number) => vec![self.order(number)?],
            None => self.orders.iter().collect(),
        };
        let lines = billed
            .into_iter()
            .flat_map(|o| o.delivered_items())
            .map(|dish| BillLine {
                name: dish.name.clone(),
                price: dish.price,
            })
            .collect();
        Some(Bill::compute(lines, self.orders.len()))
    }

    /// Removes the order if all of its finalized dishes are served.
    ///
    /// The bill is computed before removal, so gratuity reflects the orders open at
    /// resolution time.
    pub fn take_settled(&mut self, number: OrderNumber) -> Option<(Order, Bill)> {
        let index = self.orders.iter().position(|o| o.number == number)?;
        if !self.orders[index].is_settled() {
            return None;
        }
        let bill = self.bill(Some(number))?;
        Some((self.orders.remove(index), bill))
    }
}
