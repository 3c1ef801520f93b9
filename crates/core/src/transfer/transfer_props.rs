//! Property tests for transfer validation.

use chrono::NaiveDate;
use minibank_shared::types::{AccountId, BranchId, CustomerId, ProductId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::customer::CustomerType;
use crate::ledger::{Account, LedgerService};
use crate::product::{Product, ProductType};

use super::error::TransferError;
use super::service::TransferService;
use super::types::TransferRequest;

fn product() -> Product {
    Product {
        id: ProductId::new(),
        code: "TWD01".to_string(),
        name: "Tabungan Wadiah".to_string(),
        product_type: ProductType::TabunganWadiah,
        is_active: true,
        minimum_opening_balance: dec!(0),
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
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    );
    if balance > Decimal::ZERO {
        let posting = LedgerService::validate_deposit(&account, &product(), balance, None).unwrap();
        account.apply_posting(&posting);
    }
    account
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A validated transfer is always zero-sum and debits exactly the
    /// requested amount.
    #[test]
    fn prop_transfer_preview_zero_sum(
        source_balance in 0i64..100_000_000,
        destination_balance in 0i64..100_000_000,
        amount in 1i64..100_000_000,
    ) {
        let source = account("ACC00000001", Decimal::new(source_balance, 0));
        let destination = account("ACC00000002", Decimal::new(destination_balance, 0));
        let amount = Decimal::new(amount, 0);

        let request = TransferRequest {
            source_account_id: source.id,
            destination_account_number: destination.account_number.clone(),
            amount,
            description: None,
            reference_number: None,
            created_by: "teller1".to_string(),
        };

        let result = TransferService::validate(&request, &source, &product(), |_| {
            Some(destination.clone())
        });

        if amount > source.balance() {
            prop_assert!(matches!(result, Err(TransferError::InsufficientBalance { .. })));
        } else {
            let preview = result.unwrap();
            prop_assert!(preview.is_zero_sum());
            prop_assert_eq!(
                preview.source_balance_before - preview.source_balance_after,
                amount
            );
            prop_assert_eq!(
                preview.destination_balance_after - preview.destination_balance_before,
                amount
            );
        }
    }

    /// Validation never reports an available balance other than what the
    /// source actually holds above the floor.
    #[test]
    fn prop_available_matches_balance(
        source_balance in 0i64..10_000_000,
        floor in 0i64..10_000_000,
        amount in 1i64..50_000_000,
    ) {
        let mut floored = product();
        floored.minimum_balance = Decimal::new(floor, 0);

        let source = account("ACC00000001", Decimal::new(source_balance, 0));
        let destination = account("ACC00000002", Decimal::ZERO);

        let request = TransferRequest {
            source_account_id: source.id,
            destination_account_number: destination.account_number.clone(),
            amount: Decimal::new(amount, 0),
            description: None,
            reference_number: None,
            created_by: "teller1".to_string(),
        };

        if let Err(TransferError::InsufficientBalance { available }) =
            TransferService::validate(&request, &source, &floored, |_| Some(destination.clone()))
        {
            prop_assert_eq!(available, source.balance() - floored.minimum_balance);
        }
    }
}
