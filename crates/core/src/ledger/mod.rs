//! Account ledger core.
//!
//! This module implements the transaction-processing engine:
//! - The `Account` aggregate and its status state machine
//! - Posting validation for deposits, withdrawals, and transfer legs
//! - Immutable transaction records paired with every balance change
//! - Display-number formats for accounts and transactions
//! - Error types for ledger operations

pub mod account;
pub mod error;
pub mod numbering;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use account::Account;
pub use error::LedgerError;
pub use service::{LedgerService, Posting};
pub use types::{
    AccountStatus, PostingInput, TransactionChannel, TransactionRecord, TransactionType,
};
