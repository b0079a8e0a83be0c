use super::{restock_request_line, Journal, LogEntry};
use crate::model::Bill;
use chrono::NaiveDate;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Records {
    log: Vec<LogEntry>,
    requests: Vec<String>,
    payments: Vec<(NaiveDate, Bill)>,
}

/// Journal that keeps everything in memory, for tests and the demo binary.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    records: Mutex<Records>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R>(&self, f: impl FnOnce(&Records) -> R) -> R
    where
        R: Default,
    {
        self.records.lock().map(|r| f(&r)).unwrap_or_default()
    }

    pub fn log_entries(&self) -> Vec<LogEntry> {
        self.read(|r| r.log.clone())
    }

    /// Log lines without timestamps.
    pub fn log_messages(&self) -> Vec<String> {
        self.read(|r| r.log.iter().map(LogEntry::message).collect())
    }

    pub fn restock_requests(&self) -> Vec<String> {
        self.read(|r| r.requests.clone())
    }

    pub fn payments(&self) -> Vec<(NaiveDate, Bill)> {
        self.read(|r| r.payments.clone())
    }
}

impl Journal for MemoryJournal {
    fn log(&self, entry: &LogEntry) {
        if let Ok(mut records) = self.records.lock() {
            records.log.push(entry.clone());
        }
    }

    fn restock_request(&self, ingredient: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.requests.push(restock_request_line(ingredient));
        }
    }

    fn payment(&self, bill: &Bill, date: NaiveDate) {
        if let Ok(mut records) = self.records.lock() {
            records.payments.push((date, bill.clone()));
        }
    }
}
