//! Validated operations over the ledger state container.
//!
//! Services are stateless: each takes the ledger explicitly, validates the
//! request against it, then applies the mutation. Persistence happens a level
//! up, in the session manager.

pub mod account_service;
pub mod budget_service;
pub mod recurring_service;
pub mod summary_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use budget_service::BudgetService;
pub use recurring_service::RecurringService;
pub use summary_service::{BudgetSpending, SpendingSummary, SummaryService};
pub use transaction_service::TransactionService;

use crate::errors::{BudgetError, Result};
use crate::ledger::Ledger;

pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BudgetError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(BudgetError::Validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_budget_exists(ledger: &Ledger, id: &str) -> Result<()> {
    if ledger.budget(id).is_none() {
        return Err(BudgetError::InvalidReference(format!(
            "budget {id} does not exist"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_account_exists(ledger: &Ledger, id: &str) -> Result<()> {
    if ledger.account(id).is_none() {
        return Err(BudgetError::InvalidReference(format!(
            "account {id} does not exist"
        )));
    }
    Ok(())
}
