use crate::errors::{BudgetError, Result};
use crate::ledger::{Ledger, RecurringTransaction};

use super::{ensure_account_exists, ensure_budget_exists, require_non_negative, require_text};

/// Validated recurring-schedule operations.
pub struct RecurringService;

impl RecurringService {
    /// Validates and stores a schedule, returning its id. New schedules start
    /// without a checkpoint; only the materialization engine advances it.
    pub fn add(ledger: &mut Ledger, schedule: RecurringTransaction) -> Result<String> {
        require_text("description", &schedule.description)?;
        require_non_negative("amount", schedule.amount)?;
        ensure_budget_exists(ledger, &schedule.budget_id)?;
        ensure_account_exists(ledger, &schedule.account_id)?;
        schedule
            .integrity_check()
            .map_err(|issue| BudgetError::Validation(issue.to_string()))?;
        Ok(ledger.add_schedule(schedule))
    }

    /// Removes a schedule. Transactions already materialized from it are kept.
    pub fn remove(ledger: &mut Ledger, id: &str) -> Result<RecurringTransaction> {
        ledger
            .remove_schedule(id)
            .ok_or_else(|| BudgetError::ScheduleNotFound(id.to_string()))
    }
}
