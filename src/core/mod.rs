//! Session coordination: the manager facade and the service layer.

pub mod ledger_manager;
pub mod services;

pub use ledger_manager::{LedgerManager, SessionReport};
