//! Append-only records of what happened: the activity log, restock requests and
//! payment records.
//!
//! Sinks implement [`Journal`] and are injected as `Arc<dyn Journal>`. A failing sink
//! reports through `tracing` and never undoes the operation that produced the record.

mod file;
mod memory;

pub use file::FileJournal;
pub use memory::MemoryJournal;

use crate::events::{EventBus, RestaurantEvent};
use crate::model::Bill;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::fmt::Display;
use std::sync::Arc;

/// Fixed reorder quantity written on every restock request.
pub const REORDER_QUANTITY: u32 = 20;

/// One line of the activity log: who did what to what.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub actor: String,
    pub action: String,
    pub subject: String,
}

impl LogEntry {
    pub fn new(
        actor: impl Into<String>,
        action: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            at: Utc::now(),
            actor: actor.into(),
            action: action.into(),
            subject: subject.into(),
        }
    }

    /// The line without its timestamp.
    pub fn message(&self) -> String {
        format!("{} {} {}", self.actor, self.action, self.subject)
    }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.message()
        )
    }
}

/// Line written to the restock request stream.
pub fn restock_request_line(ingredient: &str) -> String {
    format!("I'd like to Order {REORDER_QUANTITY} more {ingredient}")
}

/// Destination for the restaurant's records.
pub trait Journal: Send + Sync {
    fn log(&self, entry: &LogEntry);

    fn restock_request(&self, ingredient: &str);

    /// Appends a resolved bill to the record for `date`.
    fn payment(&self, bill: &Bill, date: NaiveDate);
}

/// Writes activity to the journal and echoes it on the bus for live log panes.
#[derive(Clone)]
pub struct Logbook {
    journal: Arc<dyn Journal>,
    bus: EventBus,
}

impl Logbook {
    pub fn new(journal: Arc<dyn Journal>, bus: EventBus) -> Self {
        Self { journal, bus }
    }

    pub fn record(&self, actor: &str, action: &str, subject: impl Display) {
        let entry = LogEntry::new(actor, action, subject.to_string());
        tracing::info!(actor, action, subject = %entry.subject, "Activity");
        self.journal.log(&entry);
        self.bus.publish(RestaurantEvent::LogLine(entry));
    }

    pub fn journal(&self) -> &Arc<dyn Journal> {
        &self.journal
    }
}
