//! Thin session driver: loads the ledger, materializes due recurring
//! occurrences, and reports what the pass did.

use budget_saver::core::services::SummaryService;
use budget_saver::core::LedgerManager;
use budget_saver::errors::Result;
use budget_saver::storage::JsonStorage;
use budget_saver::time::SystemClock;

fn main() {
    budget_saver::init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let storage = JsonStorage::new_default()?;
    let mut manager = LedgerManager::new(Box::new(storage), Box::new(SystemClock));

    let report = manager.start_session()?;
    println!(
        "Session ready: {} transaction(s) materialized, {} schedule issue(s).",
        report.generated,
        report.issues.len(),
    );
    for issue in &report.issues {
        eprintln!("warning: {issue}");
    }

    let summary = SummaryService::overview(manager.ledger());
    println!(
        "Spent {:.2} of {:.2} budgeted ({:.2} remaining).",
        summary.total_spent, summary.total_budget, summary.remaining,
    );
    Ok(())
}
