//! Loading the restaurant's seed data: inventory, menu and staff.
//!
//! A missing seed file is a first run: an empty file is created in its place and the
//! restaurant starts with nothing of that kind. Malformed content is fatal.

mod parse;

pub use parse::{parse_employees, parse_inventory, parse_menu};

use crate::config::RestaurantConfig;
use crate::model::{Inventory, Menu};
use crate::roles::Role;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Fatal startup problems.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("{file}:{line}: {reason}")]
    Malformed {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    /// The kitchen actor refused or failed to register the seeded kitchen.
    #[error("Kitchen could not be opened: {0}")]
    Kitchen(String),
}

impl ConfigurationError {
    pub fn malformed(file: &str, line: usize, reason: impl Into<String>) -> Self {
        ConfigurationError::Malformed {
            file: file.to_string(),
            line,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSeed {
    pub role: Role,
    pub name: String,
}

/// Everything read from the seed files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantSeed {
    pub inventory: Inventory,
    pub menu: Menu,
    pub employees: Vec<EmployeeSeed>,
}

impl RestaurantSeed {
    /// Reads the three seed files named by `config`.
    pub fn load(config: &RestaurantConfig) -> Result<Self, ConfigurationError> {
        let inventory = parse_inventory(
            &config.inventory_file,
            &read_or_create(&config.inventory_path())?,
        )?;
        let menu = parse_menu(&config.menu_file, &read_or_create(&config.menu_path())?)?;
        let employees = parse_employees(
            &config.employees_file,
            &read_or_create(&config.employees_path())?,
        )?;
        info!(
            ingredients = inventory.entries().len(),
            dishes = menu.dishes().len(),
            staff = employees.len(),
            "Seed loaded"
        );
        Ok(Self {
            inventory,
            menu,
            employees,
        })
    }
}

/// File contents, or an empty string after creating the missing file.
fn read_or_create(path: &Path) -> Result<String, ConfigurationError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "Seed file missing; creating an empty one");
            if let Err(e) = fs::write(path, "") {
                warn!(path = %path.display(), error = %e, "Could not create seed file");
            }
            Ok(String::new())
        }
        Err(e) => Err(ConfigurationError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}
