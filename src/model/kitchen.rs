use super::{DishKey, Ingredient, Inventory, KitchenId, OrderedDish};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::Display;

/// The kitchen's reference to a dish that lives in some table's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishTicket {
    pub key: DishKey,
    /// The dish as shown on the cook display, `#id, name, with ...`.
    pub label: String,
    pub requirements: Vec<Ingredient>,
}

impl DishTicket {
    pub fn for_dish(key: DishKey, dish: &OrderedDish) -> Self {
        Self {
            key,
            label: dish.to_string(),
            requirements: dish.requirements.clone(),
        }
    }
}

impl Display for DishTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// Outcome of a cook pulling the queue head.
#[derive(Debug, Clone, PartialEq)]
pub enum CookAttempt {
    /// Ingredients reserved, ticket now in progress.
    Started(DishTicket),
    /// Not enough ingredients. Nothing was withdrawn and the ticket was dropped.
    Rejected(DishTicket),
}

/// Payload for creating the kitchen.
#[derive(Debug, Clone)]
pub struct KitchenCreate {
    pub inventory: Inventory,
}

#[derive(Debug, Clone)]
pub enum KitchenUpdate {
    Shipment(Ingredient),
}

/// Inventory plus the production pipeline `to_make -> in_progress -> to_deliver`.
///
/// A ticket sits in at most one of the three collections.
#[derive(Debug, Clone)]
pub struct Kitchen {
    pub id: KitchenId,
    pub inventory: Inventory,
    to_make: VecDeque<DishTicket>,
    in_progress: Vec<DishTicket>,
    to_deliver: Vec<DishTicket>,
}

impl Kitchen {
    pub fn new(id: KitchenId, inventory: Inventory) -> Self {
        Self {
            id,
            inventory,
            to_make: VecDeque::new(),
            in_progress: Vec::new(),
            to_deliver: Vec::new(),
        }
    }

    /// Appends to the queue tail. Returns true if this call took the queue from empty
    /// to non-empty.
    pub fn enqueue(&mut self, tickets: Vec<DishTicket>) -> bool {
        let was_empty = self.to_make.is_empty();
        for ticket in tickets {
            self.detach(ticket.key);
            self.to_make.push_back(ticket);
        }
        was_empty && !self.to_make.is_empty()
    }

    pub fn dequeue_next(&mut self) -> Option<DishTicket> {
        self.to_make.pop_front()
    }

    /// Label of the queue head, empty when nothing is queued.
    pub fn head_label(&self) -> String {
        self.to_make
            .front()
            .map(|t| t.label.clone())
            .unwrap_or_default()
    }

    pub fn move_to_in_progress(&mut self, ticket: DishTicket) {
        self.detach(ticket.key);
        self.in_progress.push(ticket);
    }

    /// Returns false if the dish was not in the pipeline.
    pub fn move_to_deliverable(&mut self, key: DishKey) -> bool {
        match self.detach(key) {
            Some(ticket) => {
                self.to_deliver.push(ticket);
                true
            }
            None => false,
        }
    }

    /// Drops a served dish from the ready-for-delivery set.
    pub fn mark_delivered(&mut self, key: DishKey) -> bool {
        let before = self.to_deliver.len();
        self.to_deliver.retain(|t| t.key != key);
        before != self.to_deliver.len()
    }

    /// Removes the ticket from whichever collection holds it.
    pub fn discard(&mut self, key: DishKey) -> bool {
        self.detach(key).is_some()
    }

    pub fn to_make(&self) -> impl Iterator<Item = &DishTicket> {
        self.to_make.iter()
    }

    pub fn in_progress(&self) -> &[DishTicket] {
        &self.in_progress
    }

    pub fn to_deliver(&self) -> &[DishTicket] {
        &self.to_deliver
    }

    /// Every ticket in the pipeline: queued, then awaiting delivery, then cooking.
    pub fn work_in_progress(&self) -> String {
        self.to_make
            .iter()
            .chain(&self.to_deliver)
            .chain(&self.in_progress)
            .map(|t| format!("{} ({})\n", t.label, t.key))
            .collect()
    }

    fn detach(&mut self, key: DishKey) -> Option<DishTicket> {
        if let Some(index) = self.to_make.iter().position(|t| t.key == key) {
            return self.to_make.remove(index);
        }
        if let Some(index) = self.in_progress.iter().position(|t| t.key == key) {
            return Some(self.in_progress.remove(index));
        }
        let index = self.to_deliver.iter().position(|t| t.key == key)?;
        Some(self.to_deliver.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DishId, OrderNumber, TableNumber};

    fn ticket(dish: u32) -> DishTicket {
        DishTicket {
            key: DishKey {
                table: TableNumber(1),
                order: OrderNumber(0),
                dish: DishId(dish),
            },
            label: format!("#{dish}, Soup"),
            requirements: vec![],
        }
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut kitchen = Kitchen::new(KitchenId(1), Inventory::new());
        assert!(kitchen.enqueue(vec![ticket(0), ticket(1)]));
        assert!(!kitchen.enqueue(vec![ticket(2)]));

        let order: Vec<u32> = std::iter::from_fn(|| kitchen.dequeue_next())
            .map(|t| t.key.dish.0)
            .collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(kitchen.head_label(), "");
    }

    #[test]
    fn test_empty_batch_does_not_fill_queue() {
        let mut kitchen = Kitchen::new(KitchenId(1), Inventory::new());
        assert!(!kitchen.enqueue(vec![]));
        assert!(kitchen.enqueue(vec![ticket(3)]));
        assert!(!kitchen.enqueue(vec![]));
    }

    #[test]
    fn test_ticket_lives_in_one_collection() {
        let mut kitchen = Kitchen::new(KitchenId(1), Inventory::new());
        kitchen.enqueue(vec![ticket(7)]);
        let t = kitchen.dequeue_next().unwrap();
        let key = t.key;

        kitchen.move_to_in_progress(t.clone());
        kitchen.move_to_in_progress(t);
        assert_eq!(kitchen.in_progress().len(), 1);

        assert!(kitchen.move_to_deliverable(key));
        assert!(kitchen.in_progress().is_empty());
        assert_eq!(kitchen.to_deliver().len(), 1);

        assert!(kitchen.mark_delivered(key));
        assert!(!kitchen.move_to_deliverable(key));
        assert!(kitchen.work_in_progress().is_empty());
    }

    #[test]
    fn test_work_in_progress_lists_queue_then_ready_then_cooking() {
        let mut kitchen = Kitchen::new(KitchenId(1), Inventory::new());
        kitchen.enqueue(vec![ticket(1), ticket(2), ticket(3)]);
        let cooking = kitchen.dequeue_next().unwrap();
        kitchen.move_to_in_progress(cooking);
        let done = kitchen.dequeue_next().unwrap();
        let done_key = done.key;
        kitchen.move_to_in_progress(done);
        kitchen.move_to_deliverable(done_key);

        let listing = kitchen.work_in_progress();
        let labels: Vec<&str> = listing
            .lines()
            .map(|l| l.split(" (").next().unwrap_or_default())
            .collect();
        assert_eq!(labels, vec!["#3, Soup", "#2, Soup", "#1, Soup"]);
    }
}
