use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A named quantity of one ingredient.
///
/// Used both as stock (inside the inventory) and as a requirement (inside a dish).
/// The amount never drops below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    amount: f64,
}

impl Ingredient {
    /// Negative amounts are clamped to zero.
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount: amount.max(0.0),
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn increment(&mut self, amount: f64) {
        self.amount += amount;
    }

    /// Removes up to `amount`, stopping at zero.
    pub fn decrement(&mut self, amount: f64) {
        self.amount = (self.amount - amount).max(0.0);
    }
}

impl Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_never_negative() {
        let mut salt = Ingredient::new("Salt", 1.0);
        for step in [0.4, 2.5, 0.1] {
            salt.decrement(step);
            assert!(salt.amount() >= 0.0);
        }
        assert_eq!(salt.amount(), 0.0);
        salt.increment(0.3);
        assert!((salt.amount() - 0.3).abs() < f64::EPSILON);
        assert_eq!(Ingredient::new("Salt", -4.0).amount(), 0.0);
    }
}
