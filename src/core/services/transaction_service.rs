use crate::errors::{BudgetError, Result};
use crate::ledger::{Ledger, Transaction};

use super::{ensure_account_exists, ensure_budget_exists, require_non_negative, require_text};

/// Validated transaction operations.
pub struct TransactionService;

impl TransactionService {
    /// Validates and stores a manually entered transaction, returning its id.
    /// Both referenced entities must exist at the time of entry.
    pub fn add(ledger: &mut Ledger, transaction: Transaction) -> Result<String> {
        require_text("description", &transaction.description)?;
        require_non_negative("amount", transaction.amount)?;
        ensure_budget_exists(ledger, &transaction.budget_id)?;
        ensure_account_exists(ledger, &transaction.account_id)?;
        Ok(ledger.add_transaction(transaction))
    }

    /// Removes a single transaction.
    pub fn remove(ledger: &mut Ledger, id: &str) -> Result<Transaction> {
        ledger
            .remove_transaction(id)
            .ok_or_else(|| BudgetError::TransactionNotFound(id.to_string()))
    }
}
