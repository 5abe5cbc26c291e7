use crate::ledger::{Ledger, Transaction};

/// Spending totals for one budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSpending {
    pub budget_id: String,
    pub name: String,
    pub color: String,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
}

/// Ledger-wide spending overview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpendingSummary {
    pub total_spent: f64,
    pub total_budget: f64,
    pub remaining: f64,
    pub by_budget: Vec<BudgetSpending>,
}

/// Read-only reporting over the ledger.
pub struct SummaryService;

impl SummaryService {
    /// Totals across every transaction plus per-budget breakdowns.
    ///
    /// Transactions whose budget no longer exists still count toward the
    /// ledger-wide total; they just have no per-budget row to land in.
    pub fn overview(ledger: &Ledger) -> SpendingSummary {
        let mut by_budget: Vec<BudgetSpending> = ledger
            .budgets
            .iter()
            .map(|budget| BudgetSpending {
                budget_id: budget.id.clone(),
                name: budget.name.clone(),
                color: budget.color.clone(),
                limit: budget.limit,
                spent: 0.0,
                remaining: budget.limit,
            })
            .collect();

        let mut total_spent = 0.0;
        for txn in &ledger.transactions {
            total_spent += txn.amount;
            if let Some(row) = by_budget.iter_mut().find(|row| row.budget_id == txn.budget_id) {
                row.spent += txn.amount;
                row.remaining = row.limit - row.spent;
            }
        }

        // Folded from +0.0 rather than `.sum()`: on newer toolchains the empty
        // float sum is -0.0, which would format as "-0.00" for a ledger with
        // no budgets.
        let total_budget: f64 = ledger
            .budgets
            .iter()
            .map(|budget| budget.limit)
            .fold(0.0, |acc, limit| acc + limit);
        SpendingSummary {
            total_spent,
            total_budget,
            remaining: total_budget - total_spent,
            by_budget,
        }
    }

    /// The `limit` most recent transactions, newest first. Ties keep their
    /// ledger order.
    pub fn recent_transactions(ledger: &Ledger, limit: usize) -> Vec<&Transaction> {
        let mut recent: Vec<&Transaction> = ledger.transactions.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit);
        recent
    }
}
