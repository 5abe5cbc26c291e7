#![doc(test(attr(deny(warnings))))]

//! BudgetSaver core: ledger state, recurring-transaction materialization, and
//! JSON persistence.
//!
//! The crate is organized around an explicit state container ([`ledger::Ledger`])
//! holding the four persisted collections. Validated mutations live in
//! [`core::services`], the pure materialization engine in [`ledger::recurring`],
//! and the session facade tying state, clock, and storage together in
//! [`core::ledger_manager`].

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes global tracing for embedders and the CLI.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        utils::init_tracing();
        tracing::info!("BudgetSaver tracing initialized.");
    });
}
