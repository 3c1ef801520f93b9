//! Ledger error types for validation and state errors.

use minibank_shared::types::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::AccountStatus;

/// Errors that can occur during ledger operations.
///
/// Every validation error is raised before any mutation is attempted, so a
/// failed operation never leaves partial state behind.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account is not in a state that allows the operation.
    #[error("Account {account_number} is not active (status: {status:?})")]
    AccountNotActive {
        /// The account's display number.
        account_number: String,
        /// The status that blocked the operation.
        status: AccountStatus,
    },

    /// Closure attempted on an account that is already closed.
    #[error("Account is already closed")]
    AccountAlreadyClosed(AccountId),

    /// Amount is zero or negative.
    #[error("Transaction amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Amount is below the configured channel minimum.
    #[error("Transaction amount {amount} is below the minimum of {minimum}")]
    BelowMinimumAmount {
        /// The rejected amount.
        amount: Decimal,
        /// The configured minimum.
        minimum: Decimal,
    },

    /// Withdrawal or transfer would breach the balance floor.
    #[error("Insufficient balance. Available: {available}")]
    InsufficientBalance {
        /// Balance available above the product floor.
        available: Decimal,
    },

    /// Deposit or transfer-in would exceed the product balance cap.
    #[error("Deposit would exceed the maximum balance of {maximum}")]
    AboveMaximumBalance {
        /// The product's maximum balance.
        maximum: Decimal,
    },

    /// Closure attempted with money still on the account.
    #[error("Account balance must be zero before closure, got {balance}")]
    NonZeroBalance {
        /// The remaining balance.
        balance: Decimal,
    },

    /// Optimistic-lock version mismatch detected during commit.
    #[error("Concurrent modification detected for account {0}, please retry")]
    ConcurrencyConflict(AccountId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountNotActive { .. } => "ACCOUNT_NOT_ACTIVE",
            Self::AccountAlreadyClosed(_) => "ACCOUNT_ALREADY_CLOSED",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::BelowMinimumAmount { .. } => "BELOW_MINIMUM_AMOUNT",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::AboveMaximumBalance { .. } => "ABOVE_MAXIMUM_BALANCE",
            Self::NonZeroBalance { .. } => "NON_ZERO_BALANCE",
            Self::ConcurrencyConflict(_) => "CONCURRENCY_CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::AccountNotFound(_) => 404,
            Self::AccountNotActive { .. }
            | Self::AccountAlreadyClosed(_)
            | Self::NonZeroBalance { .. } => 422,
            Self::InvalidAmount(_)
            | Self::BelowMinimumAmount { .. }
            | Self::InsufficientBalance { .. }
            | Self::AboveMaximumBalance { .. } => 400,
            Self::ConcurrencyConflict(_) => 409,
            Self::Database(_) => 500,
        }
    }

    /// Returns true if this error is transient and safe to retry once.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict(_))
    }
}
