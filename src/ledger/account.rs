use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A source of funds that transactions draw from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub name: String,
}

impl Account {
    /// Creates an account with a fresh opaque identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accounts_get_distinct_ids() {
        let first = Account::new("Checking");
        let second = Account::new("Checking");
        assert_ne!(first.id, second.id);
        assert_eq!(first.name, second.name);
    }
}
