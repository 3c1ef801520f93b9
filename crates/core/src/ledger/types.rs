//! Ledger domain types.

use chrono::{DateTime, Utc};
use minibank_shared::types::{AccountId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account lifecycle status.
///
/// `Active -> Closed` is the only terminal transition. `Inactive` and
/// `Frozen` block monetary operations but can be lifted again by back-office
/// maintenance (out of this core's scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Account accepts deposits, withdrawals, and transfers.
    Active,
    /// Account is dormant.
    Inactive,
    /// Account is blocked pending review.
    Frozen,
    /// Account has been closed. Terminal.
    Closed,
}

impl AccountStatus {
    /// Returns true if monetary operations are allowed.
    #[must_use]
    pub const fn allows_posting(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true if the account has reached its terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Transaction type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Cash or incoming deposit.
    Deposit,
    /// Cash withdrawal.
    Withdrawal,
    /// Credit leg of a transfer.
    TransferIn,
    /// Debit leg of a transfer.
    TransferOut,
}

impl TransactionType {
    /// Returns true for types that increase the account balance.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn)
    }

    /// Returns true for types that decrease the account balance.
    #[must_use]
    pub const fn is_debit(self) -> bool {
        !self.is_credit()
    }
}

/// Transaction origination channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionChannel {
    /// In-branch cash handling by a teller.
    Teller,
    /// Account-to-account transfer.
    Transfer,
    /// Automated teller machine.
    Atm,
    /// Online banking.
    Online,
}

/// Caller-supplied fields for a single posting.
#[derive(Debug, Clone)]
pub struct PostingInput {
    /// Amount to post (must be positive).
    pub amount: Decimal,
    /// Free-text description; channel defaults apply when absent.
    pub description: Option<String>,
    /// Optional external reference number.
    pub reference_number: Option<String>,
    /// Identity of the teller or system performing the operation.
    pub created_by: String,
}

/// An immutable ledger record justifying one balance change.
///
/// Records are created atomically with the balance mutation they represent
/// and are never updated or deleted; corrections are new reversing records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier.
    pub id: TransactionId,
    /// Human-displayable number (e.g. `TXN0000000042`).
    pub transaction_number: String,
    /// The account whose balance changed.
    pub account_id: AccountId,
    /// Transaction type.
    pub transaction_type: TransactionType,
    /// Origination channel.
    pub channel: TransactionChannel,
    /// Posted amount (always positive; the type carries the sign).
    pub amount: Decimal,
    /// Account balance before this record.
    pub balance_before: Decimal,
    /// Account balance after this record.
    pub balance_after: Decimal,
    /// Free-text description.
    pub description: String,
    /// Optional external reference number.
    pub reference_number: Option<String>,
    /// Identity of the teller or system that created the record.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// The other account of a transfer, if this is a transfer leg.
    pub counterpart_account_id: Option<AccountId>,
    /// The other leg of a transfer, if this is a transfer leg.
    pub counterpart_transaction_id: Option<TransactionId>,
}

impl TransactionRecord {
    /// Returns the signed amount (positive for credits, negative for debits).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        if self.transaction_type.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Checks the balance equation `balance_after = balance_before + signed(amount)`.
    #[must_use]
    pub fn balances_consistent(&self) -> bool {
        self.balance_after == self.balance_before + self.signed_amount()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_allows_posting() {
        assert!(AccountStatus::Active.allows_posting());
        assert!(!AccountStatus::Inactive.allows_posting());
        assert!(!AccountStatus::Frozen.allows_posting());
        assert!(!AccountStatus::Closed.allows_posting());
    }

    #[test]
    fn test_status_terminal() {
        assert!(AccountStatus::Closed.is_terminal());
        assert!(!AccountStatus::Active.is_terminal());
        assert!(!AccountStatus::Frozen.is_terminal());
    }

    #[test]
    fn test_transaction_type_direction() {
        assert!(TransactionType::Deposit.is_credit());
        assert!(TransactionType::TransferIn.is_credit());
        assert!(TransactionType::Withdrawal.is_debit());
        assert!(TransactionType::TransferOut.is_debit());
    }

    fn record(transaction_type: TransactionType) -> TransactionRecord {
        TransactionRecord {
            id: TransactionId::new(),
            transaction_number: "TXN0000000001".to_string(),
            account_id: AccountId::new(),
            transaction_type,
            channel: TransactionChannel::Teller,
            amount: dec!(100_000),
            balance_before: dec!(500_000),
            balance_after: dec!(600_000),
            description: "Setoran Tunai".to_string(),
            reference_number: None,
            created_by: "teller1".to_string(),
            created_at: Utc::now(),
            counterpart_account_id: None,
            counterpart_transaction_id: None,
        }
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(record(TransactionType::Deposit).signed_amount(), dec!(100_000));
        assert_eq!(
            record(TransactionType::Withdrawal).signed_amount(),
            dec!(-100_000)
        );
    }

    #[test]
    fn test_balance_equation() {
        let deposit = record(TransactionType::Deposit);
        assert!(deposit.balances_consistent());

        let mut withdrawal = record(TransactionType::Withdrawal);
        assert!(!withdrawal.balances_consistent());
        withdrawal.balance_after = dec!(400_000);
        assert!(withdrawal.balances_consistent());
    }
}
