//! Account opening errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::customer::CustomerType;
use crate::ledger::LedgerError;
use crate::product::ProductError;

/// Errors that can occur while opening an account.
#[derive(Debug, Error)]
pub enum OpeningError {
    /// Customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Customer exists but cannot open accounts.
    #[error("Customer {0} is not active")]
    CustomerNotActive(String),

    /// The product does not admit this customer type.
    #[error("Product '{product_code}' is not available to {customer_type} customers")]
    CustomerNotEligible {
        /// The rejected customer type.
        customer_type: CustomerType,
        /// The product that rejected it.
        product_code: String,
    },

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Branch not found.
    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    /// Product exists but is not open for new accounts.
    #[error("Product is not active")]
    ProductInactive,

    /// Initial deposit below the product minimum.
    #[error("Initial deposit must be at least {minimum}")]
    BelowMinimumOpeningBalance {
        /// The product's minimum opening balance.
        minimum: Decimal,
    },

    /// The product definition violates an invariant (e.g. nisbah).
    #[error(transparent)]
    Product(#[from] ProductError),

    /// The initial deposit failed ledger validation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl OpeningError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::CustomerNotActive(_) => "CUSTOMER_NOT_ACTIVE",
            Self::CustomerNotEligible { .. } => "CUSTOMER_NOT_ELIGIBLE",
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::BranchNotFound(_) => "BRANCH_NOT_FOUND",
            Self::ProductInactive => "PRODUCT_INACTIVE",
            Self::BelowMinimumOpeningBalance { .. } => "BELOW_MINIMUM_OPENING_BALANCE",
            Self::Product(e) => e.error_code(),
            Self::Ledger(e) => e.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::CustomerNotFound(_) | Self::ProductNotFound(_) | Self::BranchNotFound(_) => 404,
            Self::CustomerNotActive(_)
            | Self::CustomerNotEligible { .. }
            | Self::ProductInactive => 422,
            Self::BelowMinimumOpeningBalance { .. } => 400,
            Self::Product(e) => e.http_status_code(),
            Self::Ledger(e) => e.http_status_code(),
        }
    }
}
