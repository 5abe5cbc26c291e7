use super::account::Account;
use super::budget::Budget;
use super::recurring::{MaterializationOutcome, RecurringTransaction};
use super::transaction::Transaction;

/// In-memory state container for every persisted collection.
///
/// All mutations are plain state transitions with no I/O; deciding what to
/// persist afterwards is the caller's concern. The session manager owns one
/// of these and writes collections back through its storage backend.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub accounts: Vec<Account>,
    pub budgets: Vec<Budget>,
    pub transactions: Vec<Transaction>,
    pub schedules: Vec<RecurringTransaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&mut self, account: Account) -> String {
        let id = account.id.clone();
        self.accounts.push(account);
        id
    }

    pub fn add_budget(&mut self, budget: Budget) -> String {
        let id = budget.id.clone();
        self.budgets.push(budget);
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> String {
        let id = transaction.id.clone();
        self.transactions.push(transaction);
        id
    }

    pub fn add_schedule(&mut self, schedule: RecurringTransaction) -> String {
        let id = schedule.id.clone();
        self.schedules.push(schedule);
        id
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn budget(&self, id: &str) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn schedule(&self, id: &str) -> Option<&RecurringTransaction> {
        self.schedules.iter().find(|schedule| schedule.id == id)
    }

    /// Removes an account and cascade-deletes the transactions drawn on it.
    /// Schedules referencing the account are left in place.
    pub fn remove_account(&mut self, id: &str) -> Option<Account> {
        let position = self.accounts.iter().position(|account| account.id == id)?;
        let removed = self.accounts.remove(position);
        self.transactions.retain(|txn| txn.account_id != id);
        Some(removed)
    }

    /// Removes a budget and cascade-deletes the transactions filed under it.
    /// Schedules referencing the budget are left in place.
    pub fn remove_budget(&mut self, id: &str) -> Option<Budget> {
        let position = self.budgets.iter().position(|budget| budget.id == id)?;
        let removed = self.budgets.remove(position);
        self.transactions.retain(|txn| txn.budget_id != id);
        Some(removed)
    }

    pub fn remove_transaction(&mut self, id: &str) -> Option<Transaction> {
        let position = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(position))
    }

    /// Removes a schedule. Transactions already materialized from it stay in
    /// the ledger and keep their provenance marker.
    pub fn remove_schedule(&mut self, id: &str) -> Option<RecurringTransaction> {
        let position = self.schedules.iter().position(|schedule| schedule.id == id)?;
        Some(self.schedules.remove(position))
    }

    /// Folds a materialization outcome into the container: appends the
    /// surviving new transactions and adopts the advanced checkpoints.
    pub fn apply_materialization(&mut self, outcome: MaterializationOutcome) {
        self.transactions.extend(outcome.new_transactions);
        self.schedules = outcome.updated_schedules;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Frequency;
    use chrono::{TimeZone, Utc};

    fn sample_ledger() -> Ledger {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let mut ledger = Ledger::new();

        let checking = ledger.add_account(Account::new("Checking"));
        let savings = ledger.add_account(Account::new("Savings"));
        let groceries = ledger.add_budget(Budget::new("Groceries", 400.0, "#10b981"));
        let rent = ledger.add_budget(Budget::new("Rent", 1500.0, "#6366f1"));

        ledger.add_transaction(Transaction::new("Milk", 3.5, date, &groceries, &checking));
        ledger.add_transaction(Transaction::new("Rent Jan", 1400.0, date, &rent, &checking));
        ledger.add_transaction(Transaction::new("Snacks", 12.0, date, &groceries, &savings));
        ledger.add_schedule(RecurringTransaction::new(
            "Rent",
            1400.0,
            &rent,
            &checking,
            Frequency::Monthly,
            date,
            None,
        ));
        ledger
    }

    #[test]
    fn lookups_find_entries_by_id() {
        let ledger = sample_ledger();
        let id = ledger.accounts[0].id.clone();
        assert_eq!(ledger.account(&id).map(|a| a.name.as_str()), Some("Checking"));
        assert!(ledger.account("missing").is_none());
    }

    #[test]
    fn removing_an_account_cascades_to_its_transactions_only() {
        let mut ledger = sample_ledger();
        let checking = ledger.accounts[0].id.clone();

        let removed = ledger.remove_account(&checking);
        assert_eq!(removed.map(|a| a.name), Some("Checking".to_string()));

        // Both transactions drawn on checking are gone, the savings one stays.
        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.transactions[0].description, "Snacks");
        // The schedule pointing at the deleted account is orphaned, not removed.
        assert_eq!(ledger.schedules.len(), 1);
    }

    #[test]
    fn removing_a_budget_cascades_to_its_transactions_only() {
        let mut ledger = sample_ledger();
        let groceries = ledger.budgets[0].id.clone();

        assert!(ledger.remove_budget(&groceries).is_some());
        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.transactions[0].description, "Rent Jan");
        assert_eq!(ledger.schedules.len(), 1);
    }

    #[test]
    fn removing_a_missing_entry_returns_none_and_changes_nothing() {
        let mut ledger = sample_ledger();
        assert!(ledger.remove_budget("missing").is_none());
        assert_eq!(ledger.transactions.len(), 3);
    }

    #[test]
    fn removing_a_schedule_keeps_materialized_transactions() {
        let mut ledger = sample_ledger();
        let schedule_id = ledger.schedules[0].id.clone();
        let date = Utc.with_ymd_and_hms(2024, 2, 14, 0, 0, 0).unwrap();

        let mut generated = Transaction::new(
            "Rent",
            1400.0,
            date,
            &ledger.budgets[1].id,
            &ledger.accounts[0].id,
        );
        generated.recurring_transaction_id = Some(schedule_id.clone());
        ledger.add_transaction(generated);

        assert!(ledger.remove_schedule(&schedule_id).is_some());
        assert!(ledger.schedules.is_empty());
        let survivor = ledger
            .transactions
            .iter()
            .find(|txn| txn.recurring_transaction_id.is_some())
            .unwrap();
        assert_eq!(survivor.recurring_transaction_id.as_deref(), Some(schedule_id.as_str()));
    }
}
