//! Product validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when validating a product definition.
#[derive(Debug, Error)]
pub enum ProductError {
    /// Profit-sharing ratios do not sum to exactly 1.0000.
    #[error("Nisbah ratios must sum to 1.0000, got customer {customer} + bank {bank}")]
    NisbahInvariantViolation {
        /// Customer share of profit.
        customer: Decimal,
        /// Bank share of profit.
        bank: Decimal,
    },

    /// A profit-sharing product is missing its nisbah ratios.
    #[error("Product '{0}' is profit-sharing but has no nisbah ratios")]
    NisbahMissing(String),

    /// A safekeeping product must not carry profit-sharing ratios.
    #[error("Product '{0}' is not profit-sharing and must not carry nisbah ratios")]
    NisbahNotApplicable(String),

    /// A balance limit is negative or inconsistent.
    #[error("Invalid balance limits: {0}")]
    InvalidBalanceLimits(String),

    /// The product allows no customer types at all.
    #[error("Product '{0}' allows no customer types")]
    NoEligibleCustomerTypes(String),
}

impl ProductError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NisbahInvariantViolation { .. } => "NISBAH_INVARIANT_VIOLATION",
            Self::NisbahMissing(_) => "NISBAH_MISSING",
            Self::NisbahNotApplicable(_) => "NISBAH_NOT_APPLICABLE",
            Self::InvalidBalanceLimits(_) => "INVALID_BALANCE_LIMITS",
            Self::NoEligibleCustomerTypes(_) => "NO_ELIGIBLE_CUSTOMER_TYPES",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        // All product definition errors are caller mistakes.
        400
    }
}
