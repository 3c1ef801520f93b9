//! Posting validation for ledger operations.
//!
//! `LedgerService` contains pure validation logic with no database
//! dependencies: given the current account state and its product, it either
//! produces a [`Posting`] describing the balance change, or a
//! [`LedgerError`]. The storage layer commits the posting and the matching
//! transaction record in one atomic unit.

use rust_decimal::Decimal;

use crate::product::Product;

use super::account::Account;
use super::error::LedgerError;
use super::types::TransactionType;

/// A validated balance change, ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// The transaction type this posting will be recorded as.
    pub transaction_type: TransactionType,
    /// The posted amount (positive).
    pub amount: Decimal,
    /// Account balance before the posting.
    pub balance_before: Decimal,
    /// Account balance after the posting.
    pub balance_after: Decimal,
}

/// Ledger posting validation.
pub struct LedgerService;

impl LedgerService {
    /// Default description for teller cash deposits.
    pub const DEFAULT_DEPOSIT_DESCRIPTION: &'static str = "Setoran Tunai";
    /// Default description for teller cash withdrawals.
    pub const DEFAULT_WITHDRAWAL_DESCRIPTION: &'static str = "Penarikan Tunai";

    /// Validates a teller deposit.
    ///
    /// `minimum` is the channel-configured minimum transaction amount, if
    /// any; the product's maximum balance cap is enforced as well.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the account is not active, the amount is not
    /// positive, below the channel minimum, or would exceed the product's
    /// maximum balance.
    pub fn validate_deposit(
        account: &Account,
        product: &Product,
        amount: Decimal,
        minimum: Option<Decimal>,
    ) -> Result<Posting, LedgerError> {
        Self::validate_credit(account, product, amount, TransactionType::Deposit, minimum)
    }

    /// Validates a teller withdrawal.
    ///
    /// The withdrawal may not take the balance below the product's floor:
    /// the minimum maintaining balance, or the negated overdraft limit for
    /// overdraft-enabled products.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the account is not active, the amount is not
    /// positive, below the channel minimum, or exceeds the available balance.
    pub fn validate_withdrawal(
        account: &Account,
        product: &Product,
        amount: Decimal,
        minimum: Option<Decimal>,
    ) -> Result<Posting, LedgerError> {
        Self::validate_debit(
            account,
            product,
            amount,
            TransactionType::Withdrawal,
            minimum,
        )
    }

    /// Validates the credit leg of an operation.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` when a precondition fails; no state is touched.
    pub fn validate_credit(
        account: &Account,
        product: &Product,
        amount: Decimal,
        transaction_type: TransactionType,
        minimum: Option<Decimal>,
    ) -> Result<Posting, LedgerError> {
        debug_assert!(transaction_type.is_credit());
        Self::ensure_active(account)?;
        Self::ensure_amount(amount, minimum)?;

        let balance_before = account.balance();
        let balance_after = balance_before + amount;

        if let Some(maximum) = product.maximum_balance {
            if balance_after > maximum {
                return Err(LedgerError::AboveMaximumBalance { maximum });
            }
        }

        Ok(Posting {
            transaction_type,
            amount,
            balance_before,
            balance_after,
        })
    }

    /// Validates the debit leg of an operation.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` when a precondition fails; no state is touched.
    pub fn validate_debit(
        account: &Account,
        product: &Product,
        amount: Decimal,
        transaction_type: TransactionType,
        minimum: Option<Decimal>,
    ) -> Result<Posting, LedgerError> {
        debug_assert!(transaction_type.is_debit());
        Self::ensure_active(account)?;
        Self::ensure_amount(amount, minimum)?;

        let balance_before = account.balance();
        let available = balance_before - product.withdrawal_floor();
        if amount > available {
            return Err(LedgerError::InsufficientBalance { available });
        }

        Ok(Posting {
            transaction_type,
            amount,
            balance_before,
            balance_after: balance_before - amount,
        })
    }

    fn ensure_active(account: &Account) -> Result<(), LedgerError> {
        if account.is_active() {
            Ok(())
        } else {
            Err(LedgerError::AccountNotActive {
                account_number: account.account_number.clone(),
                status: account.status,
            })
        }
    }

    fn ensure_amount(amount: Decimal, minimum: Option<Decimal>) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if let Some(minimum) = minimum {
            if amount < minimum {
                return Err(LedgerError::BelowMinimumAmount { amount, minimum });
            }
        }
        Ok(())
    }
}
