//! Recurring schedules and the materialization engine.
//!
//! A [`RecurringTransaction`] is a template plus a cadence. At session start the
//! engine walks each schedule's occurrences forward from its checkpoint and
//! emits one [`Transaction`] per due occurrence, with ids derived so that
//! repeating a pass can never duplicate an entry.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::frequency::Frequency;
use super::transaction::Transaction;

/// Lookback applied when a schedule has no checkpoint yet.
///
/// The first candidate is one frequency step after the seed, so seeding one
/// day before `start_date` lets a daily schedule fire on its start date while
/// longer cadences fire one step later. Changing this rule silently shifts or
/// duplicates the first instance of every new schedule.
static FIRST_PASS_LOOKBACK: Lazy<Duration> = Lazy::new(|| Duration::days(1));

/// A template that materializes into concrete transactions on a cadence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub budget_id: String,
    pub account_id: String,
    pub frequency: Frequency,
    pub start_date: DateTime<Utc>,
    /// Last occurrence to emit, inclusive. Open-ended when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Checkpoint: the most recent occurrence already materialized. Absent
    /// until the first pass emits something; advanced only by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated_date: Option<DateTime<Utc>>,
}

impl RecurringTransaction {
    /// Creates a schedule with a fresh opaque identifier and no checkpoint.
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        budget_id: impl Into<String>,
        account_id: impl Into<String>,
        frequency: Frequency,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            amount,
            budget_id: budget_id.into(),
            account_id: account_id.into(),
            frequency,
            start_date,
            end_date,
            last_generated_date: None,
        }
    }

    /// Checks the fields the engine depends on. A failing schedule is left
    /// untouched by materialization and surfaces as a [`ScheduleIssue`].
    pub fn integrity_check(&self) -> Result<(), ScheduleIssue> {
        if let Frequency::Other(tag) = &self.frequency {
            return Err(ScheduleIssue::UnknownFrequency {
                id: self.id.clone(),
                tag: tag.clone(),
            });
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ScheduleIssue::EndBeforeStart {
                    id: self.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Where the occurrence walk resumes: the checkpoint when present,
    /// otherwise [`FIRST_PASS_LOOKBACK`] before the start date.
    fn cursor_seed(&self) -> DateTime<Utc> {
        self.last_generated_date
            .unwrap_or_else(|| self.start_date - *FIRST_PASS_LOOKBACK)
    }

    /// Builds the concrete transaction for the occurrence at `occurrence`.
    fn instance_at(&self, occurrence: DateTime<Utc>) -> Transaction {
        Transaction {
            id: occurrence_id(&self.id, occurrence),
            description: self.description.clone(),
            amount: self.amount,
            date: occurrence,
            budget_id: self.budget_id.clone(),
            account_id: self.account_id.clone(),
            recurring_transaction_id: Some(self.id.clone()),
        }
    }
}

/// One reportable data-integrity problem found while materializing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleIssue {
    #[error("schedule {id}: unknown frequency `{tag}`")]
    UnknownFrequency { id: String, tag: String },

    #[error("schedule {id}: end date precedes start date")]
    EndBeforeStart { id: String },
}

impl ScheduleIssue {
    /// Id of the schedule the issue belongs to.
    pub fn schedule_id(&self) -> &str {
        match self {
            ScheduleIssue::UnknownFrequency { id, .. } => id,
            ScheduleIssue::EndBeforeStart { id } => id,
        }
    }
}

/// Result of one materialization pass.
#[derive(Debug, Clone, Default)]
pub struct MaterializationOutcome {
    /// Due transactions that are not already present in the ledger.
    pub new_transactions: Vec<Transaction>,
    /// Every input schedule, same order and length, with checkpoints advanced
    /// where occurrences were emitted.
    pub updated_schedules: Vec<RecurringTransaction>,
    /// Schedules skipped because their data failed the integrity check.
    pub issues: Vec<ScheduleIssue>,
}

/// Deterministic id for the occurrence of `schedule_id` due at `occurrence`.
///
/// Derived from the schedule id and the occurrence's epoch milliseconds, so
/// re-running a pass always produces the same id. That determinism is what
/// makes the existing-id filter in [`materialize_due`] safe.
pub fn occurrence_id(schedule_id: &str, occurrence: DateTime<Utc>) -> String {
    format!("{}-{}", schedule_id, occurrence.timestamp_millis())
}

/// Materializes every occurrence due at or before `now`.
///
/// For each schedule the walk starts at its checkpoint (or one day before the
/// start date on the first pass) and repeatedly steps the frequency forward,
/// emitting a transaction per occurrence until the next candidate falls after
/// `now` or after the schedule's end date. Occurrences landing exactly on
/// `now` or on the end date are emitted.
///
/// Transactions whose ids already appear in `existing_ids` are filtered out
/// after the walk; checkpoints still advance past them, so a deleted instance
/// is not resurrected on the next pass.
///
/// Pure function: inputs are not mutated and nothing is persisted. Callers
/// apply the outcome to their state and decide what to save.
pub fn materialize_due(
    schedules: &[RecurringTransaction],
    now: DateTime<Utc>,
    existing_ids: &HashSet<String>,
) -> MaterializationOutcome {
    let mut outcome = MaterializationOutcome::default();

    for schedule in schedules {
        let mut schedule = schedule.clone();

        if let Err(issue) = schedule.integrity_check() {
            outcome.issues.push(issue);
            outcome.updated_schedules.push(schedule);
            continue;
        }

        let mut cursor = schedule.cursor_seed();
        while let Some(candidate) = schedule.frequency.next_occurrence(cursor) {
            if candidate > now {
                break;
            }
            if schedule.end_date.map_or(false, |end| candidate > end) {
                break;
            }
            outcome.new_transactions.push(schedule.instance_at(candidate));
            schedule.last_generated_date = Some(candidate);
            cursor = candidate;
        }

        outcome.updated_schedules.push(schedule);
    }

    outcome
        .new_transactions
        .retain(|txn| !existing_ids.contains(&txn.id));
    outcome
}
