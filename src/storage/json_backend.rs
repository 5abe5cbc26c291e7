//! JSON file storage, one document per collection.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::ledger::{Account, Budget, RecurringTransaction, Transaction};
use crate::utils::{app_data_dir, ensure_dir};

use super::{CollectionKey, StorageBackend};

/// File-per-collection JSON store rooted at the application data directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-save leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Opens a store rooted at `root`, creating the directory when missing.
    /// `None` uses the application data directory.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// Opens a store at the default application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the JSON document backing `key`.
    pub fn collection_path(&self, key: CollectionKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }

    fn load_collection<T: DeserializeOwned>(&self, key: CollectionKey) -> Result<Option<Vec<T>>> {
        let path = self.collection_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let records = serde_json::from_str(&data)?;
        Ok(Some(records))
    }

    fn save_collection<T: Serialize>(&self, key: CollectionKey, records: &[T]) -> Result<()> {
        let path = self.collection_path(key);
        let json = serde_json::to_string_pretty(records)?;

        let tmp = tmp_path(&path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &path)?;

        debug!("saved {} record(s) to {}", records.len(), path.display());
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load_accounts(&self) -> Result<Option<Vec<Account>>> {
        self.load_collection(CollectionKey::Accounts)
    }

    fn save_accounts(&self, accounts: &[Account]) -> Result<()> {
        self.save_collection(CollectionKey::Accounts, accounts)
    }

    fn load_budgets(&self) -> Result<Option<Vec<Budget>>> {
        self.load_collection(CollectionKey::Budgets)
    }

    fn save_budgets(&self, budgets: &[Budget]) -> Result<()> {
        self.save_collection(CollectionKey::Budgets, budgets)
    }

    fn load_transactions(&self) -> Result<Option<Vec<Transaction>>> {
        self.load_collection(CollectionKey::Transactions)
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.save_collection(CollectionKey::Transactions, transactions)
    }

    fn load_schedules(&self) -> Result<Option<Vec<RecurringTransaction>>> {
        self.load_collection(CollectionKey::RecurringSchedules)
    }

    fn save_schedules(&self, schedules: &[RecurringTransaction]) -> Result<()> {
        self.save_collection(CollectionKey::RecurringSchedules, schedules)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
