//! Ledger repository for deposits, withdrawals, and account closure.
//!
//! Each operation is one serializable unit of work: the account row is
//! loaded `FOR UPDATE`, validated through the core ledger rules, and written
//! back together with its transaction record. An optimistic-version conflict
//! is retried once before surfacing.

use chrono::Utc;
use minibank_core::ledger::{
    numbering, Account, LedgerError, LedgerService, Posting, PostingInput, TransactionChannel,
};
use minibank_core::product::Product;
use minibank_shared::config::LedgerConfig;
use minibank_shared::types::AccountId;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QuerySelect, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::{accounts, products, transactions};

use super::convert::{self, db_err};
use super::posting::{apply_posting, PostingArgs};
use super::sequence;

/// Channel-configured transaction minimums for the teller channel.
#[derive(Debug, Clone, Default)]
pub struct TellerLimits {
    /// Minimum accepted deposit amount, if configured.
    pub minimum_deposit: Option<Decimal>,
    /// Minimum accepted withdrawal amount, if configured.
    pub minimum_withdrawal: Option<Decimal>,
}

impl From<&LedgerConfig> for TellerLimits {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            minimum_deposit: Some(config.teller_minimum_deposit),
            minimum_withdrawal: config.teller_minimum_withdrawal,
        }
    }
}

/// Repository for teller-channel ledger operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
    limits: TellerLimits,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, limits: TellerLimits) -> Self {
        Self { db, limits }
    }

    /// Deposits cash into an account.
    ///
    /// Returns the updated account row and the created transaction record.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the account does not exist, is not active,
    /// or the amount fails validation; `ConcurrencyConflict` if a concurrent
    /// writer won twice in a row.
    #[instrument(skip(self, input), fields(account_id = %account_id))]
    pub async fn deposit(
        &self,
        account_id: AccountId,
        input: PostingInput,
    ) -> Result<(accounts::Model, transactions::Model), LedgerError> {
        match self.deposit_once(account_id, input.clone()).await {
            Err(e) if e.is_retryable() => self.deposit_once(account_id, input).await,
            other => other,
        }
    }

    async fn deposit_once(
        &self,
        account_id: AccountId,
        input: PostingInput,
    ) -> Result<(accounts::Model, transactions::Model), LedgerError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let (account, product) = load_account_for_update(&txn, account_id).await?;
        let domain = convert::account_to_domain(&account);
        let posting = LedgerService::validate_deposit(
            &domain,
            &product,
            input.amount,
            self.limits.minimum_deposit,
        )?;

        let record = commit_posting(
            &txn,
            &account,
            &posting,
            TransactionChannel::Teller,
            input
                .description
                .unwrap_or_else(|| LedgerService::DEFAULT_DEPOSIT_DESCRIPTION.to_string()),
            input.reference_number,
            &input.created_by,
        )
        .await?;

        let updated = reload_account(&txn, account.id).await?;
        txn.commit().await.map_err(db_err)?;

        info!(
            transaction_number = %record.transaction_number,
            balance = %updated.balance,
            "Deposit processed"
        );
        Ok((updated, record))
    }

    /// Withdraws cash from an account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError`, including `InsufficientBalance` when the
    /// withdrawal would take the balance below the product floor.
    #[instrument(skip(self, input), fields(account_id = %account_id))]
    pub async fn withdraw(
        &self,
        account_id: AccountId,
        input: PostingInput,
    ) -> Result<(accounts::Model, transactions::Model), LedgerError> {
        match self.withdraw_once(account_id, input.clone()).await {
            Err(e) if e.is_retryable() => self.withdraw_once(account_id, input).await,
            other => other,
        }
    }

    async fn withdraw_once(
        &self,
        account_id: AccountId,
        input: PostingInput,
    ) -> Result<(accounts::Model, transactions::Model), LedgerError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let (account, product) = load_account_for_update(&txn, account_id).await?;
        let domain = convert::account_to_domain(&account);
        let posting = LedgerService::validate_withdrawal(
            &domain,
            &product,
            input.amount,
            self.limits.minimum_withdrawal,
        )?;

        let record = commit_posting(
            &txn,
            &account,
            &posting,
            TransactionChannel::Teller,
            input
                .description
                .unwrap_or_else(|| LedgerService::DEFAULT_WITHDRAWAL_DESCRIPTION.to_string()),
            input.reference_number,
            &input.created_by,
        )
        .await?;

        let updated = reload_account(&txn, account.id).await?;
        txn.commit().await.map_err(db_err)?;

        info!(
            transaction_number = %record.transaction_number,
            balance = %updated.balance,
            "Withdrawal processed"
        );
        Ok((updated, record))
    }

    /// Closes an account.
    ///
    /// Closure requires a zero balance and an active account; it is a state
    /// transition only and creates no transaction record.
    ///
    /// # Errors
    ///
    /// Returns `AccountAlreadyClosed` for a repeated close (including a
    /// concurrent one), `NonZeroBalance` when money remains.
    #[instrument(skip(self), fields(account_id = %account_id, actor))]
    pub async fn close_account(
        &self,
        account_id: AccountId,
        actor: &str,
    ) -> Result<accounts::Model, LedgerError> {
        match self.close_once(account_id).await {
            Err(e) if e.is_retryable() => self.close_once(account_id).await,
            other => other,
        }
    }

    async fn close_once(&self, account_id: AccountId) -> Result<accounts::Model, LedgerError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let account = lock_account(&txn, account_id).await?;
        let mut domain = convert::account_to_domain(&account);
        domain.close(Utc::now().date_naive())?;

        let updated = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Status,
                Expr::value(convert::account_status_to_db(domain.status)),
            )
            .col_expr(accounts::Column::ClosedDate, Expr::value(domain.closed_date))
            .col_expr(accounts::Column::Version, Expr::value(domain.version()))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(account.id))
            .filter(accounts::Column::Version.eq(account.version))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if updated.rows_affected == 0 {
            return Err(LedgerError::ConcurrencyConflict(account_id));
        }

        let closed = reload_account(&txn, account.id).await?;
        txn.commit().await.map_err(db_err)?;

        info!(account_number = %closed.account_number, "Account closed");
        Ok(closed)
    }

    /// Loads an account row by id.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the row does not exist.
    pub async fn find_account(&self, account_id: AccountId) -> Result<accounts::Model, LedgerError> {
        accounts::Entity::find_by_id(account_id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))
    }

    /// Looks up an account row by its display number.
    pub async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<accounts::Model>, LedgerError> {
        accounts::Entity::find()
            .filter(accounts::Column::AccountNumber.eq(account_number))
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

/// Loads an account row with an exclusive lock.
pub(crate) async fn lock_account(
    txn: &DatabaseTransaction,
    account_id: AccountId,
) -> Result<accounts::Model, LedgerError> {
    accounts::Entity::find_by_id(account_id.into_inner())
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))
}

/// Loads an account row with an exclusive lock, plus its product read model.
pub(crate) async fn load_account_for_update(
    txn: &DatabaseTransaction,
    account_id: AccountId,
) -> Result<(accounts::Model, Product), LedgerError> {
    let account = lock_account(txn, account_id).await?;
    let product = load_product(txn, &account).await?;
    Ok((account, product))
}

/// Loads the product an account row was opened against.
pub(crate) async fn load_product<C: ConnectionTrait>(
    conn: &C,
    account: &accounts::Model,
) -> Result<Product, LedgerError> {
    let product = products::Entity::find_by_id(account.product_id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| {
            LedgerError::Database(format!(
                "product {} missing for account {}",
                account.product_id, account.account_number
            ))
        })?;
    convert::product_to_domain(&product).map_err(LedgerError::Database)
}

/// Re-reads an account row after a write, still inside the transaction.
pub(crate) async fn reload_account<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<accounts::Model, LedgerError> {
    accounts::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))
}

/// Allocates a transaction number and commits one posting.
pub(crate) async fn commit_posting(
    txn: &DatabaseTransaction,
    account: &accounts::Model,
    posting: &Posting,
    channel: TransactionChannel,
    description: String,
    reference_number: Option<String>,
    created_by: &str,
) -> Result<transactions::Model, LedgerError> {
    let seq = sequence::next_number(txn, numbering::TRANSACTION_NUMBER_SEQUENCE)
        .await
        .map_err(db_err)?;

    apply_posting(
        txn,
        PostingArgs {
            account,
            posting,
            transaction_id: Uuid::now_v7(),
            transaction_number: numbering::transaction_number(seq),
            channel,
            description,
            reference_number,
            created_by,
            counterpart_account_id: None,
            counterpart_transaction_id: None,
        },
    )
    .await
}

/// Builds an insertable account row from a freshly opened aggregate.
pub(crate) fn new_account_row(account: &Account, created_by: &str) -> accounts::ActiveModel {
    use sea_orm::ActiveValue::Set;

    let now = Utc::now().into();
    accounts::ActiveModel {
        id: Set(account.id.into_inner()),
        customer_id: Set(account.customer_id.into_inner()),
        product_id: Set(account.product_id.into_inner()),
        branch_id: Set(account.branch_id.into_inner()),
        account_number: Set(account.account_number.clone()),
        account_name: Set(account.account_name.clone()),
        balance: Set(account.balance()),
        status: Set(convert::account_status_to_db(account.status)),
        opened_date: Set(account.opened_date),
        closed_date: Set(account.closed_date),
        version: Set(account.version()),
        created_by: Set(created_by.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

