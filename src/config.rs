//! Runtime settings.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | RESTAURANT_DATA_DIR | `.` | Directory holding every file below |
//! | RESTAURANT_INVENTORY_FILE | `inventory.txt` | Inventory seed |
//! | RESTAURANT_MENU_FILE | `menu.txt` | Menu seed |
//! | RESTAURANT_EMPLOYEES_FILE | `employees.txt` | Staff seed |
//! | RESTAURANT_LOG_FILE | `log.txt` | Activity log |
//! | RESTAURANT_REQUESTS_FILE | `requests.txt` | Restock requests |
//! | RESTAURANT_PAYMENTS_DIR | `PaymentRecords` | Payment records, one file per day |
//! | RESTAURANT_ACTOR_BUFFER | 32 | Request channel size of each actor |
//! | RESTAURANT_NOTIFICATION_CAPACITY | 20 | Messages a server keeps |

use crate::roles::NOTIFICATION_CAPACITY;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RestaurantConfig {
    pub data_dir: PathBuf,
    pub inventory_file: String,
    pub menu_file: String,
    pub employees_file: String,
    pub log_file: String,
    pub requests_file: String,
    pub payments_dir: String,
    pub actor_buffer: usize,
    pub notification_capacity: usize,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            inventory_file: "inventory.txt".into(),
            menu_file: "menu.txt".into(),
            employees_file: "employees.txt".into(),
            log_file: "log.txt".into(),
            requests_file: "requests.txt".into(),
            payments_dir: "PaymentRecords".into(),
            actor_buffer: 32,
            notification_capacity: NOTIFICATION_CAPACITY,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl RestaurantConfig {
    /// Loads `.env` if present, then reads `RESTAURANT_*` variables over the defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let d = Self::default();
        Self {
            data_dir: env_or("RESTAURANT_DATA_DIR", d.data_dir),
            inventory_file: env_or("RESTAURANT_INVENTORY_FILE", d.inventory_file),
            menu_file: env_or("RESTAURANT_MENU_FILE", d.menu_file),
            employees_file: env_or("RESTAURANT_EMPLOYEES_FILE", d.employees_file),
            log_file: env_or("RESTAURANT_LOG_FILE", d.log_file),
            requests_file: env_or("RESTAURANT_REQUESTS_FILE", d.requests_file),
            payments_dir: env_or("RESTAURANT_PAYMENTS_DIR", d.payments_dir),
            actor_buffer: env_or("RESTAURANT_ACTOR_BUFFER", d.actor_buffer),
            notification_capacity: env_or(
                "RESTAURANT_NOTIFICATION_CAPACITY",
                d.notification_capacity,
            ),
        }
    }

    /// Defaults rooted at `dir`. Used by tests.
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join(&self.inventory_file)
    }

    pub fn menu_path(&self) -> PathBuf {
        self.data_dir.join(&self.menu_file)
    }

    pub fn employees_path(&self) -> PathBuf {
        self.data_dir.join(&self.employees_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }

    pub fn requests_path(&self) -> PathBuf {
        self.data_dir.join(&self.requests_file)
    }

    pub fn payments_dir(&self) -> PathBuf {
        self.data_dir.join(&self.payments_dir)
    }
}
