//! Bill arithmetic and its printed form.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const DECIMAL_PLACES: u32 = 2;

/// 13% sales tax.
pub const TAX_RATE: Decimal = Decimal::from_parts(13, 0, 0, false, 2);
/// 15% gratuity, charged to large parties.
pub const GRATUITY_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);
/// Concurrent orders at a table from which gratuity applies.
pub const GRATUITY_MIN_ORDERS: usize = 8;

/// Printed width of every bill line.
pub const BILL_WIDTH: usize = 30;

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub lines: Vec<BillLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub gratuity: Option<Decimal>,
    pub total: Decimal,
}

impl Bill {
    /// Totals served lines. `concurrent_orders` is the number of orders open at the
    /// table, which decides gratuity even when billing a single order.
    pub fn compute(lines: Vec<BillLine>, concurrent_orders: usize) -> Self {
        let subtotal = lines.iter().map(|l| l.price).sum::<Decimal>();
        let tax = round(subtotal * TAX_RATE);
        let gratuity =
            (concurrent_orders >= GRATUITY_MIN_ORDERS).then(|| round(subtotal * GRATUITY_RATE));
        let total = round(subtotal + tax + gratuity.unwrap_or_default());
        Self {
            lines,
            subtotal: round(subtotal),
            tax,
            gratuity,
            total,
        }
    }
}

fn write_line(f: &mut std::fmt::Formatter<'_>, label: &str, value: Decimal) -> std::fmt::Result {
    let amount = format!("${value:.2}");
    let dots = BILL_WIDTH.saturating_sub(label.chars().count() + amount.len());
    writeln!(f, "{label}{}{amount}", ".".repeat(dots))
}

impl Display for Bill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = ".".repeat(BILL_WIDTH);
        writeln!(f, "{rule}")?;
        for line in &self.lines {
            write_line(f, &line.name, line.price)?;
        }
        write_line(f, "SUBTOTAL:", self.subtotal)?;
        write_line(f, "TAX:", self.tax)?;
        if let Some(gratuity) = self.gratuity {
            write_line(f, "GRATUITY:", gratuity)?;
        }
        write_line(f, "TOTAL:", self.total)?;
        write!(f, "{rule}")
    }
}
