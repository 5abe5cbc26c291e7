use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A spending envelope with a limit and a display color.
///
/// `limit` is informational only: transactions may exceed it freely, and the
/// overspend simply shows up as negative remaining room in summaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub limit: f64,
    pub color: String,
}

impl Budget {
    /// Creates a budget with a fresh opaque identifier.
    pub fn new(name: impl Into<String>, limit: f64, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            limit,
            color: color.into(),
        }
    }
}
