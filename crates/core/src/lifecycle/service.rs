//! Account opening validation and construction.

use chrono::NaiveDate;
use minibank_shared::types::{AccountId, BranchId};
use rust_decimal::Decimal;

use crate::customer::Customer;
use crate::ledger::Account;
use crate::product::Product;

use super::error::OpeningError;

/// Account opening rules.
///
/// Pure validation and construction; the storage layer allocates the account
/// number, persists the account, and posts the initial deposit in the same
/// atomic unit.
pub struct LifecycleService;

impl LifecycleService {
    /// Description recorded on the initial-deposit transaction.
    pub const INITIAL_DEPOSIT_DESCRIPTION: &'static str = "Initial deposit for account opening";

    /// Validates an account opening request.
    ///
    /// Checks, in order: the customer is active, the product is active, the
    /// product admits the customer's type, the product definition still
    /// satisfies its own invariants (nisbah re-assertion), and the initial
    /// deposit meets the minimum opening balance.
    ///
    /// # Errors
    ///
    /// Returns `OpeningError` describing the first failed check.
    pub fn validate_opening(
        customer: &Customer,
        product: &Product,
        initial_deposit: Decimal,
    ) -> Result<(), OpeningError> {
        if !customer.is_active() {
            return Err(OpeningError::CustomerNotActive(
                customer.customer_number.clone(),
            ));
        }
        if !product.is_active {
            return Err(OpeningError::ProductInactive);
        }
        if !product.allows_customer(customer.customer_type()) {
            return Err(OpeningError::CustomerNotEligible {
                customer_type: customer.customer_type(),
                product_code: product.code.clone(),
            });
        }

        // Products are validated at definition time; re-assert here so an
        // account can never be opened against a corrupted catalog row.
        product.validate_nisbah()?;

        if initial_deposit < product.minimum_opening_balance {
            return Err(OpeningError::BelowMinimumOpeningBalance {
                minimum: product.minimum_opening_balance,
            });
        }

        Ok(())
    }

    /// Builds the new account in `Active` status with a zero balance.
    ///
    /// The account name defaults to the customer display name; the initial
    /// deposit is posted separately through the ledger so it produces exactly
    /// one transaction record.
    #[must_use]
    pub fn new_account(
        customer: &Customer,
        product: &Product,
        branch_id: BranchId,
        account_name: Option<String>,
        account_number: String,
        opened_date: NaiveDate,
    ) -> Account {
        Account::open(
            AccountId::new(),
            account_number,
            account_name.unwrap_or_else(|| customer.display_name()),
            customer.id,
            product.id,
            branch_id,
            opened_date,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::{
        CorporateDetails, CustomerDetails, CustomerStatus, CustomerType, IdentityType,
        PersonalDetails,
    };
    use crate::ledger::{LedgerService, TransactionType};
    use crate::product::ProductType;
    use minibank_shared::types::{CustomerId, ProductId};
    use rust_decimal_macros::dec;

    fn personal_customer() -> Customer {
        Customer {
            id: CustomerId::new(),
            customer_number: "C00000001".to_string(),
            email: "siti@example.com".to_string(),
            phone_number: "+62811111111".to_string(),
            status: CustomerStatus::Active,
            details: CustomerDetails::Personal(PersonalDetails {
                first_name: "Siti".to_string(),
                last_name: "Rahayu".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
                identity_type: IdentityType::Ktp,
                identity_number: "3201010101900001".to_string(),
            }),
        }
    }

    fn corporate_customer() -> Customer {
        Customer {
            id: CustomerId::new(),
            customer_number: "CORP00000001".to_string(),
            email: "finance@amanah.co.id".to_string(),
            phone_number: "+62215551234".to_string(),
            status: CustomerStatus::Active,
            details: CustomerDetails::Corporate(CorporateDetails {
                company_name: "PT Amanah Sejahtera".to_string(),
                company_registration_number: "REG00000099".to_string(),
                tax_identification_number: "01.234.567.8-901.000".to_string(),
                contact_person_name: "Budi Santoso".to_string(),
                contact_person_title: "Director".to_string(),
            }),
        }
    }

    fn wadiah_product() -> Product {
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

    fn mudharabah_product() -> Product {
        Product {
            nisbah_customer: Some(dec!(0.6)),
            nisbah_bank: Some(dec!(0.4)),
            product_type: ProductType::TabunganMudharabah,
            code: "TMD01".to_string(),
            name: "Tabungan Mudharabah".to_string(),
            minimum_opening_balance: dec!(100_000),
            ..wadiah_product()
        }
    }

    #[test]
    fn test_opening_above_minimum_passes() {
        LifecycleService::validate_opening(&personal_customer(), &wadiah_product(), dec!(100_000))
            .unwrap();
    }

    #[test]
    fn test_opening_below_minimum_fails_with_message() {
        let err = LifecycleService::validate_opening(
            &personal_customer(),
            &wadiah_product(),
            dec!(49_999),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            OpeningError::BelowMinimumOpeningBalance { minimum } if minimum == dec!(50_000)
        ));
        assert_eq!(err.to_string(), "Initial deposit must be at least 50000");
    }

    #[test]
    fn test_opening_inactive_product_fails() {
        let mut product = wadiah_product();
        product.is_active = false;

        let err =
            LifecycleService::validate_opening(&personal_customer(), &product, dec!(100_000))
                .unwrap_err();
        assert!(matches!(err, OpeningError::ProductInactive));
    }

    #[test]
    fn test_opening_inactive_customer_fails() {
        let mut customer = personal_customer();
        customer.status = CustomerStatus::Frozen;

        let err =
            LifecycleService::validate_opening(&customer, &wadiah_product(), dec!(100_000))
                .unwrap_err();
        assert!(matches!(err, OpeningError::CustomerNotActive(_)));
    }

    #[test]
    fn test_opening_ineligible_customer_type_fails() {
        let mut product = wadiah_product();
        product.allowed_customer_types = vec![CustomerType::Personal];

        let err =
            LifecycleService::validate_opening(&corporate_customer(), &product, dec!(100_000))
                .unwrap_err();
        assert!(matches!(
            err,
            OpeningError::CustomerNotEligible {
                customer_type: CustomerType::Corporate,
                ..
            }
        ));
    }

    #[test]
    fn test_opening_reasserts_nisbah_invariant() {
        let mut product = mudharabah_product();
        product.nisbah_bank = Some(dec!(0.5));

        let err =
            LifecycleService::validate_opening(&personal_customer(), &product, dec!(200_000))
                .unwrap_err();
        assert_eq!(err.error_code(), "NISBAH_INVARIANT_VIOLATION");
    }

    #[test]
    fn test_new_account_defaults_name_to_customer() {
        let customer = personal_customer();
        let product = wadiah_product();
        let account = LifecycleService::new_account(
            &customer,
            &product,
            BranchId::new(),
            None,
            "ACC00000009".to_string(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        );

        assert_eq!(account.account_name, "Siti Rahayu");
        assert_eq!(account.account_number, "ACC00000009");
        assert_eq!(account.customer_id, customer.id);
        assert_eq!(account.product_id, product.id);
        assert_eq!(account.balance(), dec!(0));
    }

    // Scenario: open with product minimum 50,000 and initial deposit 100,000.
    #[test]
    fn test_opening_with_initial_deposit_produces_one_transaction_shape() {
        let customer = personal_customer();
        let product = wadiah_product();
        let initial_deposit = dec!(100_000);

        LifecycleService::validate_opening(&customer, &product, initial_deposit).unwrap();
        let mut account = LifecycleService::new_account(
            &customer,
            &product,
            BranchId::new(),
            None,
            "ACC00000010".to_string(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        );

        let posting =
            LedgerService::validate_deposit(&account, &product, initial_deposit, None).unwrap();
        account.apply_posting(&posting);

        assert_eq!(posting.transaction_type, TransactionType::Deposit);
        assert_eq!(posting.balance_before, dec!(0));
        assert_eq!(posting.balance_after, dec!(100_000));
        assert_eq!(account.balance(), dec!(100_000));
    }
}
