//! The account aggregate.

use chrono::NaiveDate;
use minibank_shared::types::{AccountId, BranchId, CustomerId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::service::Posting;
use super::types::AccountStatus;

/// A customer account with a balance and an append-only transaction history.
///
/// The balance and version are private: every mutation goes through
/// [`Account::apply_posting`] or [`Account::close`], never a field setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Human-displayable account number (e.g. `ACC00000042`).
    pub account_number: String,
    /// Account display name, defaults to the customer display name.
    pub account_name: String,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Product the account was opened against.
    pub product_id: ProductId,
    /// Branch the account belongs to.
    pub branch_id: BranchId,
    /// Lifecycle status.
    pub status: AccountStatus,
    /// Date the account was opened.
    pub opened_date: NaiveDate,
    /// Date the account was closed, set iff status is `Closed`.
    pub closed_date: Option<NaiveDate>,
    balance: Decimal,
    version: i64,
}

impl Account {
    /// Creates a newly opened account with a zero balance.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        id: AccountId,
        account_number: String,
        account_name: String,
        customer_id: CustomerId,
        product_id: ProductId,
        branch_id: BranchId,
        opened_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            account_number,
            account_name,
            customer_id,
            product_id,
            branch_id,
            status: AccountStatus::Active,
            opened_date,
            closed_date: None,
            balance: Decimal::ZERO,
            version: 0,
        }
    }

    /// Rehydrates an account from persisted state.
    ///
    /// Only the storage layer should call this; application code obtains
    /// accounts by loading them, never by constructing them ad hoc.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: AccountId,
        account_number: String,
        account_name: String,
        customer_id: CustomerId,
        product_id: ProductId,
        branch_id: BranchId,
        status: AccountStatus,
        opened_date: NaiveDate,
        closed_date: Option<NaiveDate>,
        balance: Decimal,
        version: i64,
    ) -> Self {
        Self {
            id,
            account_number,
            account_name,
            customer_id,
            product_id,
            branch_id,
            status,
            opened_date,
            closed_date,
            balance,
            version,
        }
    }

    /// Returns the current balance.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    /// Returns the optimistic-concurrency version.
    ///
    /// Incremented on every mutation; the storage layer re-checks it at
    /// write time to detect lost updates.
    #[must_use]
    pub const fn version(&self) -> i64 {
        self.version
    }

    /// Returns true if monetary operations are allowed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.allows_posting()
    }

    /// Returns true if the account has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == AccountStatus::Closed
    }

    /// Applies a validated posting, moving the balance to the posting's
    /// `balance_after` and bumping the version.
    ///
    /// The posting must have been produced by `LedgerService` against this
    /// account's current balance.
    pub fn apply_posting(&mut self, posting: &Posting) {
        debug_assert_eq!(posting.balance_before, self.balance);
        self.balance = posting.balance_after;
        self.version += 1;
    }

    /// Closes the account.
    ///
    /// The account must be active with a balance of exactly zero. Closure is
    /// a state transition, not a monetary movement: no transaction record is
    /// created for it.
    ///
    /// # Errors
    ///
    /// Returns `AccountAlreadyClosed` for a repeated close,
    /// `AccountNotActive` for frozen or dormant accounts, and
    /// `NonZeroBalance` when money remains.
    pub fn close(&mut self, closed_on: NaiveDate) -> Result<(), LedgerError> {
        if self.is_closed() {
            return Err(LedgerError::AccountAlreadyClosed(self.id));
        }
        if !self.is_active() {
            return Err(LedgerError::AccountNotActive {
                account_number: self.account_number.clone(),
                status: self.status,
            });
        }
        if !self.balance.is_zero() {
            return Err(LedgerError::NonZeroBalance {
                balance: self.balance,
            });
        }

        self.status = AccountStatus::Closed;
        self.closed_date = Some(closed_on);
        self.version += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_account() -> Account {
        Account::open(
            AccountId::new(),
            "ACC00000001".to_string(),
            "Siti Rahayu".to_string(),
            CustomerId::new(),
            ProductId::new(),
            BranchId::new(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_open_starts_active_with_zero_balance() {
        let account = test_account();
        assert_eq!(account.status, AccountStatus::Active);
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.version(), 0);
        assert!(account.closed_date.is_none());
    }

    #[test]
    fn test_apply_posting_moves_balance_and_version() {
        let mut account = test_account();
        let posting = Posting {
            transaction_type: super::super::types::TransactionType::Deposit,
            amount: dec!(100_000),
            balance_before: Decimal::ZERO,
            balance_after: dec!(100_000),
        };

        account.apply_posting(&posting);
        assert_eq!(account.balance(), dec!(100_000));
        assert_eq!(account.version(), 1);
    }

    #[test]
    fn test_close_zero_balance_succeeds() {
        let mut account = test_account();
        let closed_on = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        account.close(closed_on).unwrap();
        assert_eq!(account.status, AccountStatus::Closed);
        assert_eq!(account.closed_date, Some(closed_on));
        assert_eq!(account.version(), 1);
    }

    #[test]
    fn test_close_nonzero_balance_fails() {
        let mut account = test_account();
        let posting = Posting {
            transaction_type: super::super::types::TransactionType::Deposit,
            amount: dec!(5_000),
            balance_before: Decimal::ZERO,
            balance_after: dec!(5_000),
        };
        account.apply_posting(&posting);

        let err = account
            .close(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, LedgerError::NonZeroBalance { balance } if balance == dec!(5_000)));
        assert_eq!(account.status, AccountStatus::Active);
        assert!(account.closed_date.is_none());
    }

    #[test]
    fn test_double_close_fails_without_altering_state() {
        let mut account = test_account();
        let closed_on = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        account.close(closed_on).unwrap();
        let version_after_close = account.version();

        let err = account
            .close(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, LedgerError::AccountAlreadyClosed(_)));
        assert_eq!(account.closed_date, Some(closed_on));
        assert_eq!(account.version(), version_after_close);
    }

    #[test]
    fn test_close_frozen_account_fails() {
        let mut account = test_account();
        account.status = AccountStatus::Frozen;

        let err = account
            .close(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotActive { .. }));
    }
}
