//! Product domain types and invariants.

use minibank_shared::types::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::customer::CustomerType;

use super::error::ProductError;

/// Islamic banking product types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    /// Safekeeping savings account (no profit sharing).
    TabunganWadiah,
    /// Profit-sharing savings account.
    TabunganMudharabah,
    /// Profit-sharing time deposit.
    DepositoMudharabah,
}

impl ProductType {
    /// Returns true for products that split profit between customer and bank.
    #[must_use]
    pub const fn is_profit_sharing(self) -> bool {
        matches!(self, Self::TabunganMudharabah | Self::DepositoMudharabah)
    }
}

/// A banking product definition.
///
/// Read-only from the ledger's perspective; accounts reference the product
/// version they were opened against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,
    /// Short product code (e.g. `TWD01`).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Product type.
    pub product_type: ProductType,
    /// Whether accounts can currently be opened against this product.
    pub is_active: bool,
    /// Minimum balance required to open an account.
    pub minimum_opening_balance: Decimal,
    /// Minimum balance that must remain after any withdrawal.
    pub minimum_balance: Decimal,
    /// Optional cap on the account balance.
    pub maximum_balance: Option<Decimal>,
    /// Whether the balance may go below the minimum, down to the overdraft limit.
    pub allow_overdraft: bool,
    /// How far below zero the balance may go when overdraft is allowed.
    pub overdraft_limit: Decimal,
    /// Customer profit share for profit-sharing products.
    pub nisbah_customer: Option<Decimal>,
    /// Bank profit share for profit-sharing products.
    pub nisbah_bank: Option<Decimal>,
    /// Customer types allowed to open accounts against this product.
    pub allowed_customer_types: Vec<CustomerType>,
}

impl Product {
    /// Validates the product definition.
    ///
    /// Checked at definition time and re-asserted by account opening:
    /// profit-sharing products must carry nisbah ratios summing to exactly
    /// 1.0000, safekeeping products must not carry any, and balance limits
    /// must be non-negative and consistent.
    ///
    /// # Errors
    ///
    /// Returns `ProductError` describing the first violated rule.
    pub fn validate(&self) -> Result<(), ProductError> {
        self.validate_nisbah()?;

        if self.minimum_opening_balance.is_sign_negative() {
            return Err(ProductError::InvalidBalanceLimits(
                "minimum opening balance cannot be negative".to_string(),
            ));
        }
        if self.minimum_balance.is_sign_negative() {
            return Err(ProductError::InvalidBalanceLimits(
                "minimum maintaining balance cannot be negative".to_string(),
            ));
        }
        if self.overdraft_limit.is_sign_negative() {
            return Err(ProductError::InvalidBalanceLimits(
                "overdraft limit cannot be negative".to_string(),
            ));
        }
        if let Some(maximum) = self.maximum_balance {
            if maximum < self.minimum_opening_balance || maximum < self.minimum_balance {
                return Err(ProductError::InvalidBalanceLimits(format!(
                    "maximum balance {maximum} is below the product minimums"
                )));
            }
        }

        if self.allowed_customer_types.is_empty() {
            return Err(ProductError::NoEligibleCustomerTypes(self.code.clone()));
        }

        Ok(())
    }

    /// Validates the profit-sharing ratio invariant.
    ///
    /// For any profit-sharing product, `nisbah_customer + nisbah_bank` must
    /// equal 1.0000 exactly (4 decimal places).
    ///
    /// # Errors
    ///
    /// Returns `ProductError` if ratios are missing, present where not
    /// applicable, or do not sum to one.
    pub fn validate_nisbah(&self) -> Result<(), ProductError> {
        if self.product_type.is_profit_sharing() {
            let (Some(customer), Some(bank)) = (self.nisbah_customer, self.nisbah_bank) else {
                return Err(ProductError::NisbahMissing(self.code.clone()));
            };
            let sum = (customer + bank).round_dp(4);
            if sum != Decimal::ONE {
                return Err(ProductError::NisbahInvariantViolation { customer, bank });
            }
        } else if self.nisbah_customer.is_some() || self.nisbah_bank.is_some() {
            return Err(ProductError::NisbahNotApplicable(self.code.clone()));
        }
        Ok(())
    }

    /// Returns true if the given customer type may open accounts against
    /// this product.
    #[must_use]
    pub fn allows_customer(&self, customer_type: CustomerType) -> bool {
        self.allowed_customer_types.contains(&customer_type)
    }

    /// Returns the lowest balance a withdrawal may leave behind.
    ///
    /// The maintaining minimum by default; with overdraft opted in, the
    /// balance may go down to the negated overdraft limit instead.
    #[must_use]
    pub fn withdrawal_floor(&self) -> Decimal {
        if self.allow_overdraft {
            -self.overdraft_limit
        } else {
            self.minimum_balance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn wadiah() -> Product {
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

    fn mudharabah() -> Product {
        Product {
            id: ProductId::new(),
            code: "TMD01".to_string(),
            name: "Tabungan Mudharabah".to_string(),
            product_type: ProductType::TabunganMudharabah,
            is_active: true,
            minimum_opening_balance: dec!(100_000),
            minimum_balance: dec!(50_000),
            maximum_balance: Some(dec!(500_000_000)),
            allow_overdraft: false,
            overdraft_limit: dec!(0),
            nisbah_customer: Some(dec!(0.6)),
            nisbah_bank: Some(dec!(0.4)),
            allowed_customer_types: vec![CustomerType::Personal, CustomerType::Corporate],
        }
    }

    #[test]
    fn test_valid_products_pass() {
        wadiah().validate().unwrap();
        mudharabah().validate().unwrap();
    }

    #[rstest]
    #[case(dec!(0.6), dec!(0.3))]
    #[case(dec!(0.6), dec!(0.5))]
    #[case(dec!(0.9999), dec!(0.0002))]
    fn test_nisbah_must_sum_to_one(#[case] customer: Decimal, #[case] bank: Decimal) {
        let mut product = mudharabah();
        product.nisbah_customer = Some(customer);
        product.nisbah_bank = Some(bank);

        assert!(matches!(
            product.validate_nisbah(),
            Err(ProductError::NisbahInvariantViolation { .. })
        ));
    }

    #[rstest]
    #[case(dec!(0.60), dec!(0.40))]
    #[case(dec!(0.5000), dec!(0.5000))]
    #[case(dec!(0.9999), dec!(0.0001))]
    fn test_nisbah_exact_sums_pass(#[case] customer: Decimal, #[case] bank: Decimal) {
        let mut product = mudharabah();
        product.nisbah_customer = Some(customer);
        product.nisbah_bank = Some(bank);

        product.validate_nisbah().unwrap();
    }

    #[test]
    fn test_profit_sharing_requires_nisbah() {
        let mut product = mudharabah();
        product.nisbah_customer = None;

        assert!(matches!(
            product.validate_nisbah(),
            Err(ProductError::NisbahMissing(_))
        ));
    }

    #[test]
    fn test_wadiah_must_not_carry_nisbah() {
        let mut product = wadiah();
        product.nisbah_customer = Some(dec!(0.5));
        product.nisbah_bank = Some(dec!(0.5));

        assert!(matches!(
            product.validate_nisbah(),
            Err(ProductError::NisbahNotApplicable(_))
        ));
    }

    #[test]
    fn test_negative_minimum_rejected() {
        let mut product = wadiah();
        product.minimum_opening_balance = dec!(-1);

        assert!(matches!(
            product.validate(),
            Err(ProductError::InvalidBalanceLimits(_))
        ));
    }

    #[test]
    fn test_maximum_below_minimum_rejected() {
        let mut product = mudharabah();
        product.maximum_balance = Some(dec!(10_000));

        assert!(matches!(
            product.validate(),
            Err(ProductError::InvalidBalanceLimits(_))
        ));
    }

    #[test]
    fn test_empty_customer_types_rejected() {
        let mut product = wadiah();
        product.allowed_customer_types.clear();

        assert!(matches!(
            product.validate(),
            Err(ProductError::NoEligibleCustomerTypes(_))
        ));
    }

    #[test]
    fn test_allows_customer() {
        let mut product = wadiah();
        assert!(product.allows_customer(CustomerType::Personal));

        product.allowed_customer_types = vec![CustomerType::Corporate];
        assert!(!product.allows_customer(CustomerType::Personal));
        assert!(product.allows_customer(CustomerType::Corporate));
    }

    #[test]
    fn test_withdrawal_floor() {
        let mut product = mudharabah();
        assert_eq!(product.withdrawal_floor(), dec!(50_000));

        product.allow_overdraft = true;
        product.overdraft_limit = dec!(200_000);
        assert_eq!(product.withdrawal_floor(), dec!(-200_000));
    }
}
