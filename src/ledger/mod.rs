//! Ledger domain: entities, the schedule clock, and the materialization engine.

pub mod account;
pub mod budget;
pub mod frequency;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod recurring;
pub mod transaction;

pub use account::Account;
pub use budget::Budget;
pub use frequency::Frequency;
pub use ledger::Ledger;
pub use recurring::{
    materialize_due, occurrence_id, MaterializationOutcome, RecurringTransaction, ScheduleIssue,
};
pub use transaction::Transaction;
