use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single ledger entry. Immutable once created; removal is the only edit.
///
/// `recurring_transaction_id` marks provenance: `Some` when the entry was
/// materialized from a recurring schedule, `None` when entered manually. The
/// marker is kept even after the originating schedule is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub budget_id: String,
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_transaction_id: Option<String>,
}

impl Transaction {
    /// Creates a manually entered transaction with a fresh opaque identifier.
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
        budget_id: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            amount,
            date,
            budget_id: budget_id.into(),
            account_id: account_id.into(),
            recurring_transaction_id: None,
        }
    }
}
