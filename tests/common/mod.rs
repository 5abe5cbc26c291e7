use std::path::{Path, PathBuf};
use std::sync::Mutex;

use budget_saver::core::ledger_manager::LedgerManager;
use budget_saver::storage::json_backend::JsonStorage;
use budget_saver::time::FixedClock;
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique data directory for one test and returns its path.
pub fn fresh_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Builds a manager over `dir` with the clock pinned to `now`.
pub fn manager_at(dir: &Path, now: DateTime<Utc>) -> LedgerManager {
    let storage = JsonStorage::new(Some(dir.to_path_buf())).expect("create json storage backend");
    LedgerManager::new(Box::new(storage), Box::new(FixedClock(now)))
}

/// Midnight UTC on the given day.
pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}
