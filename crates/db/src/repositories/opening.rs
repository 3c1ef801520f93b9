//! Account opening repository.
//!
//! Opening creates the account row and posts the initial deposit inside one
//! database transaction; a failure of either rolls back both.

use chrono::Utc;
use minibank_core::ledger::{numbering, LedgerError, LedgerService, TransactionChannel};
use minibank_core::lifecycle::{LifecycleService, OpeningError};
use minibank_shared::types::{BranchId, CustomerId, ProductId};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, TransactionTrait};
use tracing::{info, instrument};

use crate::entities::{accounts, branches, customers, products, transactions};

use super::convert;
use super::ledger::{new_account_row, reload_account};
use super::posting::{apply_posting, PostingArgs};
use super::sequence;

/// Input for opening an account.
#[derive(Debug, Clone)]
pub struct OpenAccountInput {
    /// The owning customer.
    pub customer_id: CustomerId,
    /// The product to open against.
    pub product_id: ProductId,
    /// The branch the account belongs to.
    pub branch_id: BranchId,
    /// Optional account name; defaults to the customer display name.
    pub account_name: Option<String>,
    /// Initial deposit, at least the product's minimum opening balance.
    pub initial_deposit: Decimal,
    /// Actor identity.
    pub created_by: String,
}

/// Repository for account opening.
#[derive(Debug, Clone)]
pub struct OpeningRepository {
    db: DatabaseConnection,
}

impl OpeningRepository {
    /// Creates a new opening repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens an account and posts its initial deposit atomically.
    ///
    /// Allocates the account number (corporate customers get the `CORP`
    /// prefix), creates the account in `ACTIVE` status with a zero balance,
    /// then posts the initial deposit, producing exactly one transaction
    /// record when the deposit is positive.
    ///
    /// # Errors
    ///
    /// Returns `OpeningError` when eligibility, product, or minimum-balance
    /// checks fail; nothing is persisted in that case.
    #[instrument(skip(self, input), fields(customer_id = %input.customer_id, product_id = %input.product_id))]
    pub async fn open_account(
        &self,
        input: OpenAccountInput,
    ) -> Result<(accounts::Model, Option<transactions::Model>), OpeningError> {
        let txn = self.db.begin().await.map_err(opening_db_err)?;

        let customer_model = customers::Entity::find_by_id(input.customer_id.into_inner())
            .one(&txn)
            .await
            .map_err(opening_db_err)?
            .ok_or_else(|| OpeningError::CustomerNotFound(input.customer_id.to_string()))?;
        let customer = convert::customer_to_domain(&customer_model)
            .map_err(|e| OpeningError::Ledger(LedgerError::Database(e)))?;

        let product_model = products::Entity::find_by_id(input.product_id.into_inner())
            .one(&txn)
            .await
            .map_err(opening_db_err)?
            .ok_or_else(|| OpeningError::ProductNotFound(input.product_id.to_string()))?;
        let product = convert::product_to_domain(&product_model)
            .map_err(|e| OpeningError::Ledger(LedgerError::Database(e)))?;

        branches::Entity::find_by_id(input.branch_id.into_inner())
            .one(&txn)
            .await
            .map_err(opening_db_err)?
            .ok_or_else(|| OpeningError::BranchNotFound(input.branch_id.to_string()))?;

        LifecycleService::validate_opening(&customer, &product, input.initial_deposit)?;

        let seq = sequence::next_number(&txn, numbering::ACCOUNT_NUMBER_SEQUENCE)
            .await
            .map_err(opening_db_err)?;
        let account_number = numbering::account_number(customer.customer_type(), seq);

        let account = LifecycleService::new_account(
            &customer,
            &product,
            input.branch_id,
            input.account_name,
            account_number,
            Utc::now().date_naive(),
        );

        let account_model = new_account_row(&account, &input.created_by)
            .insert(&txn)
            .await
            .map_err(opening_db_err)?;

        let record = if input.initial_deposit > Decimal::ZERO {
            let posting =
                LedgerService::validate_deposit(&account, &product, input.initial_deposit, None)
                    .map_err(OpeningError::Ledger)?;

            let seq = sequence::next_number(&txn, numbering::TRANSACTION_NUMBER_SEQUENCE)
                .await
                .map_err(opening_db_err)?;

            let record = apply_posting(
                &txn,
                PostingArgs {
                    account: &account_model,
                    posting: &posting,
                    transaction_id: uuid::Uuid::now_v7(),
                    transaction_number: numbering::transaction_number(seq),
                    channel: TransactionChannel::Teller,
                    description: LifecycleService::INITIAL_DEPOSIT_DESCRIPTION.to_string(),
                    reference_number: None,
                    created_by: &input.created_by,
                    counterpart_account_id: None,
                    counterpart_transaction_id: None,
                },
            )
            .await
            .map_err(OpeningError::Ledger)?;
            Some(record)
        } else {
            None
        };

        let opened = reload_account(&txn, account_model.id)
            .await
            .map_err(OpeningError::Ledger)?;
        txn.commit().await.map_err(opening_db_err)?;

        info!(
            account_number = %opened.account_number,
            balance = %opened.balance,
            "Account opened"
        );
        Ok((opened, record))
    }
}

fn opening_db_err(err: DbErr) -> OpeningError {
    OpeningError::Ledger(LedgerError::Database(err.to_string()))
}
