use super::{restock_request_line, Journal, LogEntry};
use crate::model::Bill;
use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::error;

/// Journal backed by append-only text files.
///
/// - activity log: one timestamped line per entry
/// - restock requests: one request line per entry
/// - payment records: `<payments_dir>/<YYYY-MM-DD>.txt`, one bill after another
#[derive(Debug)]
pub struct FileJournal {
    log_path: PathBuf,
    requests_path: PathBuf,
    payments_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileJournal {
    pub fn new(
        log_path: impl Into<PathBuf>,
        requests_path: impl Into<PathBuf>,
        payments_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            log_path: log_path.into(),
            requests_path: requests_path.into(),
            payments_dir: payments_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn payment_record_path(&self, date: NaiveDate) -> PathBuf {
        self.payments_dir.join(format!("{}.txt", date.format("%Y-%m-%d")))
    }

    fn append(&self, path: &Path, text: &str) {
        let Ok(_guard) = self.write_lock.lock() else {
            error!(path = %path.display(), "Journal lock poisoned");
            return;
        };
        let result = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| OpenOptions::new().create(true).append(true).open(path))
            .and_then(|mut file| writeln!(file, "{text}"));
        if let Err(e) = result {
            error!(path = %path.display(), error = %e, "Journal write failed");
        }
    }
}

impl Journal for FileJournal {
    fn log(&self, entry: &LogEntry) {
        self.append(&self.log_path, &entry.to_string());
    }

    fn restock_request(&self, ingredient: &str) {
        self.append(&self.requests_path, &restock_request_line(ingredient));
    }

    fn payment(&self, bill: &Bill, date: NaiveDate) {
        self.append(&self.payment_record_path(date), &bill.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_to_each_file() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FileJournal::new(
            dir.path().join("log.txt"),
            dir.path().join("requests.txt"),
            dir.path().join("PaymentRecords"),
        );

        journal.log(&LogEntry::new("Ana", "added table", "#1"));
        journal.log(&LogEntry::new("Ana", "added order", "#0"));
        journal.restock_request("Flour");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        journal.payment(&Bill::compute(vec![], 1), date);

        let log = fs::read_to_string(dir.path().join("log.txt")).unwrap();
        assert_eq!(log.lines().count(), 2);
        assert!(log.lines().nth(1).unwrap().ends_with("Ana added order #0"));

        let requests = fs::read_to_string(dir.path().join("requests.txt")).unwrap();
        assert_eq!(requests, "I'd like to Order 20 more Flour\n");

        let record = journal.payment_record_path(date);
        assert!(record.ends_with("PaymentRecords/2024-03-09.txt"));
        assert!(fs::read_to_string(record).unwrap().contains("TOTAL:"));
    }

    #[test]
    fn test_unwritable_path_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let journal = FileJournal::new(blocker.join("log.txt"), blocker.join("r.txt"), &blocker);
        journal.log(&LogEntry::new("Ana", "added table", "#1"));
        journal.restock_request("Salt");
    }
}
