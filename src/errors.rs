use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Failed to persist `{key}`: {reason}")]
    PersistenceWrite { key: String, reason: String },
    #[error("Failed to read `{key}`: {reason}")]
    PersistenceRead { key: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
