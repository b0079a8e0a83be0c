//! Identifier newtypes and the counters that hand them out.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::atomic::{AtomicU32, Ordering};

/// Dish ids wrap back to zero after this many dishes.
pub const DISH_ID_RING: u32 = 1000;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Physical table number, chosen by the server.
    TableNumber
);
numeric_id!(
    /// Order number, unique for the lifetime of a restaurant instance.
    OrderNumber
);
numeric_id!(
    /// Ordered-dish id. Unique only within the current ring of 1000.
    DishId
);
numeric_id!(KitchenId);

/// Where a dish lives: the kitchen's handle on a dish it does not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DishKey {
    pub table: TableNumber,
    pub order: OrderNumber,
    pub dish: DishId,
}

impl Display for DishKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table {} order {} dish #{}", self.table, self.order, self.dish)
    }
}

/// Monotonic order-number source. Numbers are never reused.
#[derive(Debug, Default)]
pub struct OrderSequence {
    next: AtomicU32,
}

impl OrderSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> OrderNumber {
        OrderNumber(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// Dish-id source that counts in creation order modulo [`DISH_ID_RING`].
#[derive(Debug, Default)]
pub struct DishIdRing {
    next: AtomicU32,
}

impl DishIdRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> DishId {
        let taken = self
            .next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some((n + 1) % DISH_ID_RING)
            })
            .unwrap_or_default();
        DishId(taken)
    }
}
