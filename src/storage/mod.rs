//! Persistence seam for the four ledger collections.

pub mod json_backend;

pub use json_backend::JsonStorage;

use crate::errors::Result;
use crate::ledger::{Account, Budget, RecurringTransaction, Transaction};

/// Logical names of the persisted collections. Each maps to one stored
/// document; the JSON backend uses them as file stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKey {
    Accounts,
    Budgets,
    Transactions,
    RecurringSchedules,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 4] = [
        CollectionKey::Accounts,
        CollectionKey::Budgets,
        CollectionKey::Transactions,
        CollectionKey::RecurringSchedules,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Accounts => "accounts",
            CollectionKey::Budgets => "budgets",
            CollectionKey::Transactions => "transactions",
            CollectionKey::RecurringSchedules => "recurring-schedules",
        }
    }
}

/// Backend that loads and saves whole collections.
///
/// Loading a collection that was never saved yields `Ok(None)`; callers treat
/// that as empty. Errors are reserved for I/O failures and corrupt data.
pub trait StorageBackend: Send + Sync {
    fn load_accounts(&self) -> Result<Option<Vec<Account>>>;
    fn save_accounts(&self, accounts: &[Account]) -> Result<()>;

    fn load_budgets(&self) -> Result<Option<Vec<Budget>>>;
    fn save_budgets(&self, budgets: &[Budget]) -> Result<()>;

    fn load_transactions(&self) -> Result<Option<Vec<Transaction>>>;
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()>;

    fn load_schedules(&self) -> Result<Option<Vec<RecurringTransaction>>>;
    fn save_schedules(&self, schedules: &[RecurringTransaction]) -> Result<()>;
}
