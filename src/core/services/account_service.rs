use crate::errors::{BudgetError, Result};
use crate::ledger::{Account, Ledger};

use super::require_text;

/// Validated account operations.
pub struct AccountService;

impl AccountService {
    /// Adds an account and returns its identifier.
    pub fn add(ledger: &mut Ledger, account: Account) -> Result<String> {
        require_text("account name", &account.name)?;
        Ok(ledger.add_account(account))
    }

    /// Removes the account, cascade-deleting its transactions.
    pub fn remove(ledger: &mut Ledger, id: &str) -> Result<Account> {
        ledger
            .remove_account(id)
            .ok_or_else(|| BudgetError::AccountNotFound(id.to_string()))
    }
}
