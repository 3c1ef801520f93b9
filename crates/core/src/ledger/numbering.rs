//! Display-number formats for accounts, customers, and transactions.
//!
//! Numbers are allocated from named database sequences; this module only
//! owns the formatting conventions.

use crate::customer::CustomerType;

/// Sequence name for transaction numbers.
pub const TRANSACTION_NUMBER_SEQUENCE: &str = "TRANSACTION_NUMBER";
/// Sequence name for account numbers.
pub const ACCOUNT_NUMBER_SEQUENCE: &str = "ACCOUNT_NUMBER";
/// Sequence name for customer numbers.
pub const CUSTOMER_NUMBER_SEQUENCE: &str = "CUSTOMER_NUMBER";

/// Formats a transaction number, e.g. `TXN0000000042`.
#[must_use]
pub fn transaction_number(sequence: i64) -> String {
    format!("TXN{sequence:010}")
}

/// Formats an account number.
///
/// Corporate-opened accounts carry a distinguishing `CORP` prefix; personal
/// accounts use the standard `ACC` prefix.
#[must_use]
pub fn account_number(customer_type: CustomerType, sequence: i64) -> String {
    match customer_type {
        CustomerType::Personal => format!("ACC{sequence:08}"),
        CustomerType::Corporate => format!("CORP{sequence:08}"),
    }
}

/// Formats a customer number.
#[must_use]
pub fn customer_number(customer_type: CustomerType, sequence: i64) -> String {
    match customer_type {
        CustomerType::Personal => format!("C{sequence:08}"),
        CustomerType::Corporate => format!("CORP{sequence:08}"),
    }
}
