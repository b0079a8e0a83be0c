use super::{DishId, DishStatus, OrderNumber, OrderedDish, TableNumber};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One visit's worth of dishes at a table.
///
/// A dish is either tentative (still editable) or finalized (sent to the kitchen),
/// never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub number: OrderNumber,
    pub table: TableNumber,
    tentative: Vec<OrderedDish>,
    finalized: Vec<OrderedDish>,
}

impl Order {
    pub fn new(number: OrderNumber, table: TableNumber) -> Self {
        Self {
            number,
            table,
            tentative: Vec::new(),
            finalized: Vec::new(),
        }
    }

    pub fn add_tentative(&mut self, dish: OrderedDish) {
        self.tentative.push(dish);
    }

    /// Moves every tentative dish to the end of the finalized list, in order.
    /// Returns snapshots of the moved dishes.
    pub fn finalize_tentative(&mut self) -> Vec<OrderedDish> {
        let moved: Vec<OrderedDish> = self.tentative.drain(..).collect();
        self.finalized.extend(moved.iter().cloned());
        moved
    }

    pub fn remove_tentative(&mut self, id: DishId) -> bool {
        let before = self.tentative.len();
        self.tentative.retain(|d| d.id != id);
        before != self.tentative.len()
    }

    pub fn remove_finalized(&mut self, id: DishId) -> Option<OrderedDish> {
        let index = self.finalized.iter().position(|d| d.id == id)?;
        Some(self.finalized.remove(index))
    }

    /// Sends a served dish back to the kitchen: it leaves the finalized list, restarts
    /// at ORDERED with the same id and is finalized again at the end of the list.
    ///
    /// Other tentative dishes are left alone.
    pub fn return_for_rework(&mut self, id: DishId) -> Option<&OrderedDish> {
        if !self.finalized_dish(id)?.is_served() {
            return None;
        }
        let mut dish = self.remove_finalized(id)?;
        dish.reset_to_ordered();
        self.finalized.push(dish);
        self.finalized.last()
    }

    pub fn finalized_dish(&self, id: DishId) -> Option<&OrderedDish> {
        self.finalized.iter().find(|d| d.id == id)
    }

    pub fn finalized_dish_mut(&mut self, id: DishId) -> Option<&mut OrderedDish> {
        self.finalized.iter_mut().find(|d| d.id == id)
    }

    pub fn tentative(&self) -> &[OrderedDish] {
        &self.tentative
    }

    pub fn finalized(&self) -> &[OrderedDish] {
        &self.finalized
    }

    /// Finalized dishes waiting for the server to carry them out.
    pub fn pending_delivery(&self) -> Vec<&OrderedDish> {
        self.with_status(DishStatus::Ready)
    }

    pub fn delivered_items(&self) -> Vec<&OrderedDish> {
        self.with_status(DishStatus::Served)
    }

    /// True when every finalized dish has been served. Vacuously true for none.
    pub fn is_settled(&self) -> bool {
        self.finalized.iter().all(OrderedDish::is_served)
    }

    fn with_status(&self, status: DishStatus) -> Vec<&OrderedDish> {
        self.finalized
            .iter()
            .filter(|d| d.status() == status)
            .collect()
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Table #{}, Order #{}", self.table, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DishIdRing, DishTemplate};
    use rust_decimal::Decimal;

    fn order_with(names: &[&str]) -> (Order, Vec<DishId>) {
        let ids = DishIdRing::new();
        let mut order = Order::new(OrderNumber(0), TableNumber(4));
        let mut taken = Vec::new();
        for name in names {
            let template = DishTemplate {
                name: name.to_string(),
                price: Decimal::new(500, 2),
                requirements: vec![],
            };
            let dish = OrderedDish::from_template(&template, &ids);
            taken.push(dish.id);
            order.add_tentative(dish);
        }
        (order, taken)
    }

    #[test]
    fn test_finalize_moves_everything_in_order() {
        let (mut order, ids) = order_with(&["Soup", "Pasta", "Cake"]);
        let moved = order.finalize_tentative();

        assert!(order.tentative().is_empty());
        let moved_ids: Vec<DishId> = moved.iter().map(|d| d.id).collect();
        assert_eq!(moved_ids, ids);
        assert_eq!(order.finalized().len(), 3);
        assert!(order.finalize_tentative().is_empty());
    }

    #[test]
    fn test_remove_tentative_only_touches_tentative() {
        let (mut order, ids) = order_with(&["Soup", "Pasta"]);
        assert!(order.remove_tentative(ids[0]));
        assert!(!order.remove_tentative(ids[0]));
        order.finalize_tentative();
        assert!(!order.remove_tentative(ids[1]));
        assert!(order.remove_finalized(ids[1]).is_some());
    }

    #[test]
    fn test_settled_requires_every_dish_served() {
        let (mut order, ids) = order_with(&["Soup", "Pasta"]);
        assert!(order.is_settled());
        order.finalize_tentative();
        assert!(!order.is_settled());

        for id in &ids {
            let dish = order.finalized_dish_mut(*id).unwrap();
            dish.transition(true);
            dish.transition(true);
        }
        assert_eq!(order.pending_delivery().len(), 2);
        assert!(!order.is_settled());

        for id in &ids {
            order.finalized_dish_mut(*id).unwrap().transition(true);
        }
        assert_eq!(order.delivered_items().len(), 2);
        assert!(order.is_settled());
    }

    #[test]
    fn test_return_for_rework_requires_served() {
        let (mut order, ids) = order_with(&["Soup", "Pasta"]);
        order.finalize_tentative();
        assert!(order.return_for_rework(ids[0]).is_none());

        for _ in 0..3 {
            order.finalized_dish_mut(ids[0]).unwrap().transition(true);
        }
        let returned = order.return_for_rework(ids[0]).unwrap();
        assert_eq!(returned.id, ids[0]);
        assert_eq!(returned.status(), DishStatus::Ordered);

        let sequence: Vec<DishId> = order.finalized().iter().map(|d| d.id).collect();
        assert_eq!(sequence, vec![ids[1], ids[0]]);
        assert!(order.tentative().is_empty());
    }

    #[test]
    fn test_display() {
        let (order, _) = order_with(&[]);
        assert_eq!(order.to_string(), "Table #4, Order #0");
    }
}
