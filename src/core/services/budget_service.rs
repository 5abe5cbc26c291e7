use crate::errors::{BudgetError, Result};
use crate::ledger::{Budget, Ledger};

use super::{require_non_negative, require_text};

/// Validated budget operations.
pub struct BudgetService;

impl BudgetService {
    /// Adds a budget and returns its identifier.
    pub fn add(ledger: &mut Ledger, budget: Budget) -> Result<String> {
        require_text("budget name", &budget.name)?;
        require_text("budget color", &budget.color)?;
        require_non_negative("budget limit", budget.limit)?;
        Ok(ledger.add_budget(budget))
    }

    /// Removes the budget, cascade-deleting its transactions.
    pub fn remove(ledger: &mut Ledger, id: &str) -> Result<Budget> {
        ledger
            .remove_budget(id)
            .ok_or_else(|| BudgetError::BudgetNotFound(id.to_string()))
    }
}
