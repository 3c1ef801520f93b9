//! Transfer domain types.

use minibank_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A teller's transfer request, as collected by the input form.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// The account money leaves from.
    pub source_account_id: AccountId,
    /// The destination, entered as an account number.
    pub destination_account_number: String,
    /// Amount to move.
    pub amount: Decimal,
    /// Free-text description; a transfer default applies when absent.
    pub description: Option<String>,
    /// Optional external reference, shared by both legs.
    pub reference_number: Option<String>,
    /// Identity of the teller performing the transfer.
    pub created_by: String,
}

/// A validated transfer, shown on the confirmation screen.
///
/// The preview captures the account versions it was computed against;
/// execution re-validates whenever those have moved on, closing the
/// time-of-check/time-of-use gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferPreview {
    /// Source account.
    pub source_account_id: AccountId,
    /// Source display number.
    pub source_account_number: String,
    /// Source version at validation time.
    pub source_version: i64,
    /// Source balance at validation time.
    pub source_balance_before: Decimal,
    /// Source balance after the transfer commits.
    pub source_balance_after: Decimal,
    /// Destination account.
    pub destination_account_id: AccountId,
    /// Destination display number.
    pub destination_account_number: String,
    /// Destination account name, for the confirmation screen.
    pub destination_account_name: String,
    /// Destination version at validation time.
    pub destination_version: i64,
    /// Destination balance at validation time.
    pub destination_balance_before: Decimal,
    /// Destination balance after the transfer commits.
    pub destination_balance_after: Decimal,
    /// Amount to move.
    pub amount: Decimal,
    /// Description recorded on both legs.
    pub description: String,
    /// External reference shared by both legs.
    pub reference_number: Option<String>,
    /// Identity of the teller performing the transfer.
    pub created_by: String,
}

impl TransferPreview {
    /// Returns true if the transfer preserves the combined balance of the
    /// two accounts.
    #[must_use]
    pub fn is_zero_sum(&self) -> bool {
        self.source_balance_before + self.destination_balance_before
            == self.source_balance_after + self.destination_balance_after
    }
}
