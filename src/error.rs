use thiserror::Error;

use crate::constants::{
    ERR_EXPENSE_NOT_FOUND, ERR_INVALID_CREDENTIALS, ERR_NOT_LOGGED_IN, ERR_USERNAME_TAKEN,
};

/// Ledger error type
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("{}", ERR_USERNAME_TAKEN)]
    UserAlreadyExists,

    #[error("{}", ERR_INVALID_CREDENTIALS)]
    InvalidCredentials,

    #[error("{}", ERR_NOT_LOGGED_IN)]
    NotAuthenticated,

    #[error("{}", ERR_EXPENSE_NOT_FOUND)]
    ExpenseNotFound,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Please send a passcode first or the passcode has expired")]
    PasscodeMissing,

    #[error("Passcode has expired. Please request a new one")]
    PasscodeExpired,

    #[error("Invalid passcode. Please check and try again")]
    PasscodeMismatch,

    #[error("Passcode delivery failed: {0}")]
    Delivery(String),
}

impl LedgerError {
    /// Whether this error is an internal failure rather than a rejected request
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            LedgerError::Serialization(_)
                | LedgerError::Io(_)
                | LedgerError::Csv(_)
                | LedgerError::Credential(_)
        )
    }

    /// Message safe to show to the user
    ///
    /// Internal failures are logged and replaced by `fallback`; everything
    /// else carries its own message.
    pub fn user_message(&self, fallback: &str) -> String {
        if self.is_internal() {
            tracing::error!("{}: {:?}", fallback, self);
            return fallback.to_string();
        }
        self.to_string()
    }
}

/// Result type alias for ledger results
pub type Result<T> = std::result::Result<T, LedgerError>;
