use super::Ingredient;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Threshold given to an ingredient first seen in a shipment.
pub const DEFAULT_RESTOCK_THRESHOLD: f64 = 20.0;

/// Stock of one ingredient plus the level at or below which it must be reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub ingredient: Ingredient,
    pub threshold: f64,
}

/// Emitted by a withdrawal that leaves an ingredient at or below its threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct RestockNotice {
    pub ingredient: Ingredient,
    pub threshold: f64,
}

/// Ingredient stock keyed by name, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a seeded entry. A repeated name adds to the stock and keeps the first threshold.
    pub fn seed(&mut self, name: &str, amount: f64, threshold: f64) {
        match self.entry_mut(name) {
            Some(entry) => entry.ingredient.increment(amount),
            None => self.entries.push(InventoryEntry {
                ingredient: Ingredient::new(name, amount),
                threshold,
            }),
        }
    }

    pub fn receive_shipment(&mut self, shipment: &Ingredient) {
        self.seed(&shipment.name, shipment.amount(), DEFAULT_RESTOCK_THRESHOLD);
    }

    /// True when every requirement is stocked with enough left over.
    pub fn sufficient_for(&self, requirements: &[Ingredient]) -> bool {
        requirements.iter().all(|needed| {
            self.stock(&needed.name)
                .is_some_and(|have| have - needed.amount() >= 0.0)
        })
    }

    /// Withdraws every requirement, clamping at zero, without checking sufficiency first.
    ///
    /// Returns a notice for each ingredient now at or below its threshold. Requirements
    /// for unknown ingredients are skipped.
    pub fn reserve(&mut self, requirements: &[Ingredient]) -> Vec<RestockNotice> {
        let mut notices = Vec::new();
        for needed in requirements {
            let Some(entry) = self.entry_mut(&needed.name) else {
                continue;
            };
            entry.ingredient.decrement(needed.amount());
            if entry.ingredient.amount() <= entry.threshold {
                notices.push(RestockNotice {
                    ingredient: entry.ingredient.clone(),
                    threshold: entry.threshold,
                });
            }
        }
        notices
    }

    /// Check-and-reserve in one step. `None` means nothing was withdrawn.
    pub fn try_reserve(&mut self, requirements: &[Ingredient]) -> Option<Vec<RestockNotice>> {
        if !self.sufficient_for(requirements) {
            return None;
        }
        Some(self.reserve(requirements))
    }

    pub fn stock(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.ingredient.name == name)
            .map(|e| e.ingredient.amount())
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut InventoryEntry> {
        self.entries.iter_mut().find(|e| e.ingredient.name == name)
    }
}

impl Display for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Current Inventory ===")?;
        for entry in &self.entries {
            writeln!(f, "{}", entry.ingredient)?;
        }
        Ok(())
    }
}
