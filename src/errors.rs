use thiserror::Error;

/// Unified error type shared by the ledger, service, and storage layers.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Budget not found: {0}")]
    BudgetNotFound(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Recurring schedule not found: {0}")]
    ScheduleNotFound(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_via_question_mark() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/a/real/path.json")?)
        }

        let err = read_missing().unwrap_err();
        assert!(matches!(err, BudgetError::Io(_)));
    }

    #[test]
    fn serde_errors_convert_via_question_mark() {
        fn parse_broken() -> Result<Vec<String>> {
            Ok(serde_json::from_str("{ not json")?)
        }

        let err = parse_broken().unwrap_err();
        assert!(matches!(err, BudgetError::Serde(_)));
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
