//! A dish instance on an order, and the state machine it moves through.

use super::{DishId, DishIdRing, DishTemplate, Ingredient};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lifecycle of an ordered dish.
///
/// ```text
/// ORDERED -> SEEN -> READY -> SERVED
///    \________\______> CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DishStatus {
    Ordered,
    Seen,
    Ready,
    Served,
    Cancelled,
}

/// Input to [`DishStatus::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishEvent {
    Proceed,
    Cancel,
    Reset,
}

/// Transition outcomes the owning order relays to its server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DishSignal {
    Ready,
    Cancelled,
}

impl DishStatus {
    /// The transition table. Pairs not listed leave the state unchanged.
    pub fn next(self, event: DishEvent) -> DishStatus {
        use DishEvent::*;
        use DishStatus::*;
        match (self, event) {
            (Ordered, Proceed) => Seen,
            (Seen, Proceed) => Ready,
            (Ready, Proceed) => Served,
            (Ordered | Seen, Cancel) => Cancelled,
            (_, Reset) => Ordered,
            (state, _) => state,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DishStatus::Ordered => "ORDERED",
            DishStatus::Seen => "SEEN",
            DishStatus::Ready => "READY",
            DishStatus::Served => "SERVED",
            DishStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Display for DishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedDish {
    pub id: DishId,
    pub name: String,
    pub price: Decimal,
    pub requirements: Vec<Ingredient>,
    status: DishStatus,
}

impl OrderedDish {
    /// Copies the template and draws the next id from `ids`.
    pub fn from_template(template: &DishTemplate, ids: &DishIdRing) -> Self {
        Self {
            id: ids.next(),
            name: template.name.clone(),
            price: template.price,
            requirements: template.requirements.clone(),
            status: DishStatus::Ordered,
        }
    }

    pub fn status(&self) -> DishStatus {
        self.status
    }

    /// Proceeds one step, or cancels when `proceed` is false.
    ///
    /// Returns the signal to relay if the dish just became READY or CANCELLED.
    pub fn transition(&mut self, proceed: bool) -> Option<DishSignal> {
        let event = if proceed {
            DishEvent::Proceed
        } else {
            DishEvent::Cancel
        };
        let before = self.status;
        self.status = before.next(event);
        match (before == self.status, self.status) {
            (false, DishStatus::Ready) => Some(DishSignal::Ready),
            (false, DishStatus::Cancelled) => Some(DishSignal::Cancelled),
            _ => None,
        }
    }

    /// Sends a returned dish back to the start, keeping its id.
    pub fn reset_to_ordered(&mut self) {
        self.status = self.status.next(DishEvent::Reset);
    }

    pub fn can_be_cooked(&self) -> bool {
        self.status == DishStatus::Seen
    }

    pub fn can_be_delivered(&self) -> bool {
        self.status == DishStatus::Ready
    }

    pub fn is_served(&self) -> bool {
        self.status == DishStatus::Served
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == DishStatus::Cancelled
    }
}

impl Display for OrderedDish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}, {}", self.id, self.name)?;
        let mut requirements = self.requirements.iter();
        if let Some(first) = requirements.next() {
            write!(f, ", with {first}")?;
            for rest in requirements {
                write!(f, ", {rest}")?;
            }
        }
        Ok(())
    }
}
