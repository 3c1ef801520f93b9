//! Property tests for posting validation.

use chrono::NaiveDate;
use minibank_shared::types::{AccountId, BranchId, CustomerId, ProductId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::customer::CustomerType;
use crate::product::{Product, ProductType};

use super::account::Account;
use super::service::LedgerService;

fn basic_product() -> Product {
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

fn empty_account() -> Account {
    Account::open(
        AccountId::new(),
        "ACC00000001".to_string(),
        "Prop Test".to_string(),
        CustomerId::new(),
        ProductId::new(),
        BranchId::new(),
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    )
}

/// A deposit (positive) or withdrawal (negative) attempt in whole rupiah.
fn operation_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![1i64..5_000_000, -5_000_000i64..-1]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// For any sequence of deposits and withdrawals, the final balance equals
    /// the initial balance plus accepted deposits minus accepted withdrawals.
    #[test]
    fn prop_balance_conservation(operations in prop::collection::vec(operation_strategy(), 1..40)) {
        let product = basic_product();
        let mut account = empty_account();
        let mut accepted_deposits = Decimal::ZERO;
        let mut accepted_withdrawals = Decimal::ZERO;

        for op in operations {
            let amount = Decimal::new(op.abs(), 0);
            if op > 0 {
                if let Ok(posting) =
                    LedgerService::validate_deposit(&account, &product, amount, None)
                {
                    account.apply_posting(&posting);
                    accepted_deposits += amount;
                }
            } else if let Ok(posting) =
                LedgerService::validate_withdrawal(&account, &product, amount, None)
            {
                account.apply_posting(&posting);
                accepted_withdrawals += amount;
            }
        }

        prop_assert_eq!(account.balance(), accepted_deposits - accepted_withdrawals);
    }

    /// Without overdraft, no sequence of operations drives the balance
    /// negative; rejected operations leave the balance untouched.
    #[test]
    fn prop_no_negative_balance(operations in prop::collection::vec(operation_strategy(), 1..40)) {
        let product = basic_product();
        let mut account = empty_account();

        for op in operations {
            let amount = Decimal::new(op.abs(), 0);
            let before = account.balance();
            let result = if op > 0 {
                LedgerService::validate_deposit(&account, &product, amount, None)
            } else {
                LedgerService::validate_withdrawal(&account, &product, amount, None)
            };

            match result {
                Ok(posting) => account.apply_posting(&posting),
                Err(_) => prop_assert_eq!(account.balance(), before),
            }

            prop_assert!(account.balance() >= Decimal::ZERO);
        }
    }

    /// Every accepted posting satisfies the balance equation.
    #[test]
    fn prop_posting_balance_equation(
        initial in 0i64..10_000_000,
        amount in 1i64..10_000_000,
        withdraw in proptest::bool::ANY,
    ) {
        let product = basic_product();
        let mut account = empty_account();
        let initial = Decimal::new(initial, 0);
        if initial > Decimal::ZERO {
            let seed = LedgerService::validate_deposit(&account, &product, initial, None).unwrap();
            account.apply_posting(&seed);
        }

        let amount = Decimal::new(amount, 0);
        let result = if withdraw {
            LedgerService::validate_withdrawal(&account, &product, amount, None)
        } else {
            LedgerService::validate_deposit(&account, &product, amount, None)
        };

        if let Ok(posting) = result {
            let signed = if posting.transaction_type.is_credit() {
                posting.amount
            } else {
                -posting.amount
            };
            prop_assert_eq!(posting.balance_after, posting.balance_before + signed);
        }
    }

    /// The maintaining-minimum floor is never breached.
    #[test]
    fn prop_floor_respected(
        floor in 0i64..1_000_000,
        initial in 0i64..10_000_000,
        amount in 1i64..10_000_000,
    ) {
        let mut product = basic_product();
        product.minimum_balance = Decimal::new(floor, 0);

        let mut account = empty_account();
        let initial = Decimal::new(initial, 0);
        if initial > Decimal::ZERO {
            let seed = LedgerService::validate_deposit(&account, &product, initial, None).unwrap();
            account.apply_posting(&seed);
        }

        if let Ok(posting) =
            LedgerService::validate_withdrawal(&account, &product, Decimal::new(amount, 0), None)
        {
            prop_assert!(posting.balance_after >= product.minimum_balance);
        }
    }
}
