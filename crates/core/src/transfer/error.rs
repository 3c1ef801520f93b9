//! Transfer errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur while validating or executing a transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Source account not found.
    #[error("Source account not found: {0}")]
    SourceNotFound(String),

    /// Destination account number does not resolve.
    #[error("Destination account not found: {0}")]
    DestinationNotFound(String),

    /// Destination equals source.
    #[error("Cannot transfer to the same account")]
    SelfTransferNotAllowed,

    /// Amount is zero or negative.
    #[error("Transfer amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Source cannot cover the amount above its balance floor.
    #[error("Insufficient balance. Available: {available}")]
    InsufficientBalance {
        /// Balance available above the product floor.
        available: Decimal,
    },

    /// One of the two accounts is not active.
    #[error("Account {0} is not active")]
    AccountNotActive(String),

    /// State changed between preview and execute and the transfer no longer
    /// validates.
    #[error("Transfer could not be executed because account state changed: {0}")]
    RaceDetected(String),

    /// A ledger-level failure while committing a leg.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl TransferError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::SourceNotFound(_) => "SOURCE_ACCOUNT_NOT_FOUND",
            Self::DestinationNotFound(_) => "DESTINATION_ACCOUNT_NOT_FOUND",
            Self::SelfTransferNotAllowed => "SELF_TRANSFER_NOT_ALLOWED",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::AccountNotActive(_) => "ACCOUNT_NOT_ACTIVE",
            Self::RaceDetected(_) => "TRANSFER_RACE_DETECTED",
            Self::Ledger(e) => e.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::SourceNotFound(_) | Self::DestinationNotFound(_) => 404,
            Self::SelfTransferNotAllowed | Self::InvalidAmount(_) | Self::InsufficientBalance { .. } => {
                400
            }
            Self::AccountNotActive(_) => 422,
            Self::RaceDetected(_) => 409,
            Self::Ledger(e) => e.http_status_code(),
        }
    }

    /// Returns true if this error is transient and safe to retry once.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Ledger(e) => e.is_retryable(),
            _ => false,
        }
    }
}
