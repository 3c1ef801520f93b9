//! Transfer repository: preview and atomic two-leg execution.
//!
//! Validation is a pure read. Execution locks both account rows in
//! ascending id order (so two transfers crossing the same pair of accounts
//! in opposite directions cannot deadlock), re-validates against current
//! state, and commits both legs or neither.

use minibank_core::ledger::{numbering, LedgerService, TransactionChannel, TransactionType};
use minibank_core::transfer::{TransferError, TransferPreview, TransferRequest, TransferService};
use minibank_shared::types::AccountId;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::{accounts, transactions};

use super::convert;
use super::ledger::{load_product, lock_account, reload_account};
use super::posting::{apply_posting, PostingArgs};
use super::sequence;

/// The committed outcome of a transfer: both updated accounts and both legs.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// Source account after the debit.
    pub source_account: accounts::Model,
    /// Destination account after the credit.
    pub destination_account: accounts::Model,
    /// The debit leg.
    pub transfer_out: transactions::Model,
    /// The credit leg.
    pub transfer_in: transactions::Model,
}

/// Repository for account-to-account transfers.
#[derive(Debug, Clone)]
pub struct TransferRepository {
    db: DatabaseConnection,
}

impl TransferRepository {
    /// Creates a new transfer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates a transfer request and computes the confirmation preview.
    ///
    /// Pure read-side computation; nothing is locked or mutated.
    ///
    /// # Errors
    ///
    /// Returns `TransferError` describing the first failed check, in the
    /// fixed order: destination resolves, not a self-transfer, positive
    /// amount, sufficient balance, both accounts active.
    #[instrument(skip(self, request), fields(source = %request.source_account_id))]
    pub async fn validate(
        &self,
        request: &TransferRequest,
    ) -> Result<TransferPreview, TransferError> {
        let source_model = accounts::Entity::find_by_id(request.source_account_id.into_inner())
            .one(&self.db)
            .await
            .map_err(transfer_db_err)?
            .ok_or_else(|| {
                TransferError::SourceNotFound(request.source_account_id.to_string())
            })?;
        let source = convert::account_to_domain(&source_model);
        let source_product = load_product(&self.db, &source_model).await?;

        let destination = self
            .find_destination(&request.destination_account_number)
            .await?;

        TransferService::validate(request, &source, &source_product, |_| destination)
    }

    /// Executes a previously validated transfer.
    ///
    /// Re-validates the preview against current state; when account state
    /// moved on since validation and the checks no longer pass, the failure
    /// surfaces as `RaceDetected` rather than committing stale numbers.
    ///
    /// # Errors
    ///
    /// Returns `TransferError`; on any error neither leg is persisted.
    #[instrument(skip(self, preview), fields(source = %preview.source_account_number, destination = %preview.destination_account_number))]
    pub async fn execute(
        &self,
        preview: &TransferPreview,
        actor: &str,
    ) -> Result<TransferReceipt, TransferError> {
        match self.execute_once(preview, actor).await {
            Err(e) if e.is_retryable() => self.execute_once(preview, actor).await,
            other => other,
        }
    }

    async fn execute_once(
        &self,
        preview: &TransferPreview,
        actor: &str,
    ) -> Result<TransferReceipt, TransferError> {
        let txn = self.db.begin().await.map_err(transfer_db_err)?;

        // Lock both rows in ascending id order to prevent deadlock between
        // crossing transfers.
        let (source_model, destination_model) = lock_pair(
            &txn,
            preview.source_account_id,
            preview.destination_account_id,
        )
        .await?;

        let source = convert::account_to_domain(&source_model);
        let destination = convert::account_to_domain(&destination_model);
        let source_product = load_product(&txn, &source_model).await?;
        let destination_product = load_product(&txn, &destination_model).await?;

        let request = TransferRequest {
            source_account_id: preview.source_account_id,
            destination_account_number: preview.destination_account_number.clone(),
            amount: preview.amount,
            description: Some(preview.description.clone()),
            reference_number: preview.reference_number.clone(),
            created_by: actor.to_string(),
        };

        if let Err(e) =
            TransferService::validate(&request, &source, &source_product, |_| {
                Some(destination.clone())
            })
        {
            // A check that passed at preview time can only fail here if the
            // accounts moved on in between.
            return Err(
                if TransferService::preview_is_current(preview, &source, &destination) {
                    e
                } else {
                    TransferError::RaceDetected(e.to_string())
                },
            );
        }

        let debit = LedgerService::validate_debit(
            &source,
            &source_product,
            preview.amount,
            TransactionType::TransferOut,
            None,
        )?;
        let credit = LedgerService::validate_credit(
            &destination,
            &destination_product,
            preview.amount,
            TransactionType::TransferIn,
            None,
        )?;

        let debit_id = Uuid::now_v7();
        let credit_id = Uuid::now_v7();

        let out_seq = sequence::next_number(&txn, numbering::TRANSACTION_NUMBER_SEQUENCE)
            .await
            .map_err(transfer_db_err)?;
        let transfer_out = apply_posting(
            &txn,
            PostingArgs {
                account: &source_model,
                posting: &debit,
                transaction_id: debit_id,
                transaction_number: numbering::transaction_number(out_seq),
                channel: TransactionChannel::Transfer,
                description: preview.description.clone(),
                reference_number: preview.reference_number.clone(),
                created_by: actor,
                counterpart_account_id: Some(destination_model.id),
                counterpart_transaction_id: Some(credit_id),
            },
        )
        .await?;

        let in_seq = sequence::next_number(&txn, numbering::TRANSACTION_NUMBER_SEQUENCE)
            .await
            .map_err(transfer_db_err)?;
        let transfer_in = apply_posting(
            &txn,
            PostingArgs {
                account: &destination_model,
                posting: &credit,
                transaction_id: credit_id,
                transaction_number: numbering::transaction_number(in_seq),
                channel: TransactionChannel::Transfer,
                description: preview.description.clone(),
                reference_number: preview.reference_number.clone(),
                created_by: actor,
                counterpart_account_id: Some(source_model.id),
                counterpart_transaction_id: Some(debit_id),
            },
        )
        .await?;

        let source_account = reload_account(&txn, source_model.id).await?;
        let destination_account = reload_account(&txn, destination_model.id).await?;
        txn.commit().await.map_err(transfer_db_err)?;

        info!(
            amount = %preview.amount,
            out_leg = %transfer_out.transaction_number,
            in_leg = %transfer_in.transaction_number,
            "Transfer executed"
        );
        Ok(TransferReceipt {
            source_account,
            destination_account,
            transfer_out,
            transfer_in,
        })
    }

    async fn find_destination(
        &self,
        account_number: &str,
    ) -> Result<Option<minibank_core::ledger::Account>, TransferError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::AccountNumber.eq(account_number))
            .one(&self.db)
            .await
            .map_err(transfer_db_err)?;
        Ok(model.as_ref().map(convert::account_to_domain))
    }
}

/// Locks two account rows in ascending id order and hands them back as
/// (source, destination).
async fn lock_pair(
    txn: &DatabaseTransaction,
    source_id: AccountId,
    destination_id: AccountId,
) -> Result<(accounts::Model, accounts::Model), TransferError> {
    let (first_id, second_id) = if source_id <= destination_id {
        (source_id, destination_id)
    } else {
        (destination_id, source_id)
    };

    let first = lock_account(txn, first_id).await.map_err(|e| {
        not_found_as_transfer_error(e, first_id, source_id)
    })?;
    let second = lock_account(txn, second_id).await.map_err(|e| {
        not_found_as_transfer_error(e, second_id, source_id)
    })?;

    if first.id == source_id.into_inner() {
        Ok((first, second))
    } else {
        Ok((second, first))
    }
}

fn not_found_as_transfer_error(
    err: minibank_core::ledger::LedgerError,
    looked_up: AccountId,
    source_id: AccountId,
) -> TransferError {
    match err {
        minibank_core::ledger::LedgerError::AccountNotFound(_) if looked_up == source_id => {
            TransferError::SourceNotFound(source_id.to_string())
        }
        minibank_core::ledger::LedgerError::AccountNotFound(n) => {
            TransferError::DestinationNotFound(n)
        }
        other => TransferError::Ledger(other),
    }
}

fn transfer_db_err(err: DbErr) -> TransferError {
    TransferError::Ledger(minibank_core::ledger::LedgerError::Database(err.to_string()))
}
