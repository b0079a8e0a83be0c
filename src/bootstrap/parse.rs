//! Parsers for the pipe-delimited seed files.
//!
//! ```text
//! inventory:  Pasta | 19.5 | 10
//! menu:       Carbonara | 14.50 | Pasta, 1 | Egg, 2 | Bacon, 0.5
//! employees:  Cook | Mo
//! ```
//! Blank lines are ignored.

use super::{ConfigurationError, EmployeeSeed};
use crate::model::{DishTemplate, Ingredient, Inventory, Menu};
use crate::roles::Role;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::warn;

fn fields(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}

fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
}

fn number<T: FromStr>(
    file: &str,
    line: usize,
    what: &str,
    raw: &str,
) -> Result<T, ConfigurationError> {
    raw.parse()
        .map_err(|_| ConfigurationError::malformed(file, line, format!("{what} {raw:?} is not a number")))
}

fn amount(file: &str, line: usize, what: &str, raw: &str) -> Result<f64, ConfigurationError> {
    let value: f64 = number(file, line, what, raw)?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigurationError::malformed(
            file,
            line,
            format!("{what} must be a non-negative number, got {raw}"),
        ));
    }
    Ok(value)
}

pub fn parse_inventory(file: &str, text: &str) -> Result<Inventory, ConfigurationError> {
    let mut inventory = Inventory::new();
    for (n, line) in lines(text) {
        let &[name, quantity, threshold] = &fields(line)[..] else {
            return Err(ConfigurationError::malformed(
                file,
                n,
                "expected `name | quantity | threshold`",
            ));
        };
        if name.is_empty() {
            return Err(ConfigurationError::malformed(file, n, "empty ingredient name"));
        }
        let quantity = amount(file, n, "quantity", quantity)?;
        let threshold = amount(file, n, "threshold", threshold)?;
        inventory.seed(name, quantity, threshold);
    }
    Ok(inventory)
}

pub fn parse_menu(file: &str, text: &str) -> Result<Menu, ConfigurationError> {
    let mut dishes = Vec::new();
    for (n, line) in lines(text) {
        let parts = fields(line);
        let [name, price, requirements @ ..] = &parts[..] else {
            return Err(ConfigurationError::malformed(
                file,
                n,
                "expected `name | price | ingredient, amount | ...`",
            ));
        };
        if name.is_empty() {
            return Err(ConfigurationError::malformed(file, n, "empty dish name"));
        }
        let price: Decimal = number(file, n, "price", price)?;
        if price.is_sign_negative() {
            return Err(ConfigurationError::malformed(file, n, "negative price"));
        }

        let mut seen = HashSet::new();
        let mut needed = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let Some((ingredient, raw)) = requirement.split_once(',') else {
                return Err(ConfigurationError::malformed(
                    file,
                    n,
                    format!("expected `ingredient, amount`, got {requirement:?}"),
                ));
            };
            let ingredient = ingredient.trim();
            if !seen.insert(ingredient) {
                return Err(ConfigurationError::malformed(
                    file,
                    n,
                    format!("{ingredient} listed twice for {name}"),
                ));
            }
            needed.push(Ingredient::new(ingredient, amount(file, n, "amount", raw.trim())?));
        }
        dishes.push(DishTemplate {
            name: name.to_string(),
            price,
            requirements: needed,
        });
    }
    Ok(Menu::new(dishes))
}

/// Unknown roles are skipped with a warning.
pub fn parse_employees(file: &str, text: &str) -> Result<Vec<EmployeeSeed>, ConfigurationError> {
    let mut staff = Vec::new();
    for (n, line) in lines(text) {
        let &[role, name] = &fields(line)[..] else {
            return Err(ConfigurationError::malformed(file, n, "expected `role | name`"));
        };
        match role.parse::<Role>() {
            Ok(role) => staff.push(EmployeeSeed {
                role,
                name: name.to_string(),
            }),
            Err(e) => warn!(file, line = n, error = %e, "Skipping employee"),
        }
    }
    Ok(staff)
}
