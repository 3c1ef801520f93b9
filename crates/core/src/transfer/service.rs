//! Transfer validation.

use rust_decimal::Decimal;

use crate::ledger::Account;
use crate::product::Product;

use super::error::TransferError;
use super::types::{TransferPreview, TransferRequest};

/// Default description recorded on transfer legs.
pub const DEFAULT_TRANSFER_DESCRIPTION: &str = "Transfer Antar Rekening";

/// Transfer validation.
///
/// Pure logic over already-loaded account state; the destination account is
/// resolved through an injected lookup so the same checks run identically
/// against the database and against in-memory fixtures.
pub struct TransferService;

impl TransferService {
    /// Validates a transfer request and computes the preview.
    ///
    /// Checks run in a fixed order, each short-circuiting with its own
    /// error: the destination account number resolves, the destination is
    /// not the source, the amount is positive, the source balance covers
    /// the amount above the product floor, and both accounts are active.
    ///
    /// This is a pure read-side computation; nothing is mutated.
    ///
    /// # Errors
    ///
    /// Returns `TransferError` describing the first failed check.
    pub fn validate<F>(
        request: &TransferRequest,
        source: &Account,
        source_product: &Product,
        lookup_destination: F,
    ) -> Result<TransferPreview, TransferError>
    where
        F: FnOnce(&str) -> Option<Account>,
    {
        let destination = lookup_destination(&request.destination_account_number).ok_or_else(
            || TransferError::DestinationNotFound(request.destination_account_number.clone()),
        )?;

        if destination.id == source.id {
            return Err(TransferError::SelfTransferNotAllowed);
        }

        if request.amount <= Decimal::ZERO {
            return Err(TransferError::InvalidAmount(request.amount));
        }

        let available = source.balance() - source_product.withdrawal_floor();
        if request.amount > available {
            return Err(TransferError::InsufficientBalance { available });
        }

        if !source.is_active() {
            return Err(TransferError::AccountNotActive(
                source.account_number.clone(),
            ));
        }
        if !destination.is_active() {
            return Err(TransferError::AccountNotActive(
                destination.account_number.clone(),
            ));
        }

        Ok(TransferPreview {
            source_account_id: source.id,
            source_account_number: source.account_number.clone(),
            source_version: source.version(),
            source_balance_before: source.balance(),
            source_balance_after: source.balance() - request.amount,
            destination_account_id: destination.id,
            destination_account_number: destination.account_number.clone(),
            destination_account_name: destination.account_name.clone(),
            destination_version: destination.version(),
            destination_balance_before: destination.balance(),
            destination_balance_after: destination.balance() + request.amount,
            amount: request.amount,
            description: request
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_TRANSFER_DESCRIPTION.to_string()),
            reference_number: request.reference_number.clone(),
            created_by: request.created_by.clone(),
        })
    }

    /// Checks whether a preview is still current against freshly loaded
    /// account state.
    ///
    /// Execution re-validates when this returns false; a re-validation
    /// failure then surfaces as a race rather than a caller mistake.
    #[must_use]
    pub fn preview_is_current(
        preview: &TransferPreview,
        source: &Account,
        destination: &Account,
    ) -> bool {
        preview.source_version == source.version()
            && preview.destination_version == destination.version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CustomerType;
    use crate::ledger::{AccountStatus, LedgerService};
    use crate::product::ProductType;
    use chrono::NaiveDate;
    use minibank_shared::types::{AccountId, BranchId, CustomerId, ProductId};
    use rust_decimal_macros::dec;

    fn product() -> Product {
        Product {
            id: ProductId::new(),
            code: "TWD01".to_string(),
            name: "Tabungan Wadiah".to_string(),
            product_type: ProductType::TabunganWadiah,
            is_active: true,
            minimum_opening_balance: dec!(50_000),
            minimum_balance: dec!(0),
            maximum_balance: None,
            allow_overdraft: false,
            overdraft_limit: dec!(0),
            nisbah_customer: None,
            nisbah_bank: None,
            allowed_customer_types: vec![CustomerType::Personal, CustomerType::Corporate],
        }
    }

    fn account(number: &str, balance: Decimal) -> Account {
        let mut account = Account::open(
            AccountId::new(),
            number.to_string(),
            format!("Holder of {number}"),
            CustomerId::new(),
            ProductId::new(),
            BranchId::new(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        );
        if balance > Decimal::ZERO {
            let posting =
                LedgerService::validate_deposit(&account, &product(), balance, None).unwrap();
            account.apply_posting(&posting);
        }
        account
    }

    fn request(source: &Account, destination_number: &str, amount: Decimal) -> TransferRequest {
        TransferRequest {
            source_account_id: source.id,
            destination_account_number: destination_number.to_string(),
            amount,
            description: None,
            reference_number: Some("REF001".to_string()),
            created_by: "teller1".to_string(),
        }
    }

    #[test]
    fn test_valid_transfer_produces_preview() {
        let source = account("ACC00000001", dec!(500_000));
        let destination = account("ACC00000002", dec!(100_000));
        let request = request(&source, "ACC00000002", dec!(150_000));

        let preview = TransferService::validate(&request, &source, &product(), |_| {
            Some(destination.clone())
        })
        .unwrap();

        assert_eq!(preview.source_balance_after, dec!(350_000));
        assert_eq!(preview.destination_balance_after, dec!(250_000));
        assert_eq!(preview.amount, dec!(150_000));
        assert!(preview.is_zero_sum());
        assert_eq!(preview.description, DEFAULT_TRANSFER_DESCRIPTION);
    }

    #[test]
    fn test_unknown_destination_fails_first() {
        let source = account("ACC00000001", dec!(500_000));
        // Amount is invalid too; the destination check must win.
        let request = request(&source, "MISSING", dec!(-5));

        let err =
            TransferService::validate(&request, &source, &product(), |_| None).unwrap_err();
        assert!(matches!(err, TransferError::DestinationNotFound(n) if n == "MISSING"));
    }

    #[test]
    fn test_self_transfer_rejected_before_any_mutation() {
        let source = account("ACC00000001", dec!(500_000));
        let request = request(&source, "ACC00000001", dec!(150_000));

        let err = TransferService::validate(&request, &source, &product(), |_| {
            Some(source.clone())
        })
        .unwrap_err();
        assert!(matches!(err, TransferError::SelfTransferNotAllowed));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let source = account("ACC00000001", dec!(500_000));
        let destination = account("ACC00000002", dec!(100_000));

        for amount in [dec!(0), dec!(-100)] {
            let request = request(&source, "ACC00000002", amount);
            let err = TransferService::validate(&request, &source, &product(), |_| {
                Some(destination.clone())
            })
            .unwrap_err();
            assert!(matches!(err, TransferError::InvalidAmount(_)));
        }
    }

    #[test]
    fn test_insufficient_balance_reports_available() {
        let source = account("ACC00000001", dec!(100_000));
        let destination = account("ACC00000002", dec!(0));
        let request = request(&source, "ACC00000002", dec!(200_000));

        let err = TransferService::validate(&request, &source, &product(), |_| {
            Some(destination.clone())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            TransferError::InsufficientBalance { available } if available == dec!(100_000)
        ));
    }

    #[test]
    fn test_inactive_accounts_rejected() {
        let mut source = account("ACC00000001", dec!(500_000));
        let destination = account("ACC00000002", dec!(100_000));
        source.status = AccountStatus::Frozen;

        let request = request(&source, "ACC00000002", dec!(10_000));
        let err = TransferService::validate(&request, &source, &product(), |_| {
            Some(destination.clone())
        })
        .unwrap_err();
        assert!(matches!(err, TransferError::AccountNotActive(n) if n == "ACC00000001"));

        let source = account("ACC00000001", dec!(500_000));
        let mut destination = account("ACC00000002", dec!(100_000));
        destination.status = AccountStatus::Closed;

        let request = request(&source, "ACC00000002", dec!(10_000));
        let err = TransferService::validate(&request, &source, &product(), |_| {
            Some(destination.clone())
        })
        .unwrap_err();
        assert!(matches!(err, TransferError::AccountNotActive(n) if n == "ACC00000002"));
    }

    #[test]
    fn test_preview_currency_tracks_versions() {
        let mut source = account("ACC00000001", dec!(500_000));
        let destination = account("ACC00000002", dec!(100_000));
        let request = request(&source, "ACC00000002", dec!(150_000));

        let preview = TransferService::validate(&request, &source, &product(), |_| {
            Some(destination.clone())
        })
        .unwrap();

        assert!(TransferService::preview_is_current(
            &preview,
            &source,
            &destination
        ));

        // A concurrent withdrawal moves the source on.
        let posting =
            LedgerService::validate_withdrawal(&source, &product(), dec!(400_000), None).unwrap();
        source.apply_posting(&posting);

        assert!(!TransferService::preview_is_current(
            &preview,
            &source,
            &destination
        ));
    }
}
