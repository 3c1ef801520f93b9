//! Shared commit path for ledger postings.
//!
//! Applies a validated posting to an account row with an optimistic version
//! check, and inserts the matching immutable transaction record. Callers own
//! the enclosing database transaction, so the balance write and the record
//! insert commit or roll back together.

use chrono::Utc;
use minibank_core::ledger::{LedgerError, Posting, TransactionChannel};
use minibank_shared::types::AccountId;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::entities::{accounts, transactions};

use super::convert;

/// Everything needed to commit one posting.
pub(crate) struct PostingArgs<'a> {
    /// The account row as loaded under lock; its version gates the write.
    pub account: &'a accounts::Model,
    /// The validated balance change.
    pub posting: &'a Posting,
    /// Pre-generated transaction id, so transfer legs can link to each other.
    pub transaction_id: Uuid,
    /// Allocated display number.
    pub transaction_number: String,
    /// Origination channel.
    pub channel: TransactionChannel,
    /// Description recorded on the transaction.
    pub description: String,
    /// Optional external reference.
    pub reference_number: Option<String>,
    /// Actor identity.
    pub created_by: &'a str,
    /// Counterpart account for transfer legs.
    pub counterpart_account_id: Option<Uuid>,
    /// Counterpart transaction for transfer legs.
    pub counterpart_transaction_id: Option<Uuid>,
}

/// Writes the balance change and its transaction record.
///
/// The account update is filtered on the version observed at load time; zero
/// affected rows means another writer got there first and surfaces as
/// `ConcurrencyConflict`.
pub(crate) async fn apply_posting(
    txn: &DatabaseTransaction,
    args: PostingArgs<'_>,
) -> Result<transactions::Model, LedgerError> {
    let now = Utc::now();

    let updated = accounts::Entity::update_many()
        .col_expr(
            accounts::Column::Balance,
            Expr::value(args.posting.balance_after),
        )
        .col_expr(
            accounts::Column::Version,
            Expr::value(args.account.version + 1),
        )
        .col_expr(accounts::Column::UpdatedAt, Expr::value(now))
        .filter(accounts::Column::Id.eq(args.account.id))
        .filter(accounts::Column::Version.eq(args.account.version))
        .exec(txn)
        .await
        .map_err(convert::db_err)?;

    if updated.rows_affected == 0 {
        return Err(LedgerError::ConcurrencyConflict(AccountId::from_uuid(
            args.account.id,
        )));
    }

    let record = transactions::ActiveModel {
        id: Set(args.transaction_id),
        transaction_number: Set(args.transaction_number),
        account_id: Set(args.account.id),
        transaction_type: Set(convert::transaction_type_to_db(
            args.posting.transaction_type,
        )),
        channel: Set(convert::channel_to_db(args.channel)),
        amount: Set(args.posting.amount),
        balance_before: Set(args.posting.balance_before),
        balance_after: Set(args.posting.balance_after),
        description: Set(args.description),
        reference_number: Set(args.reference_number),
        counterpart_account_id: Set(args.counterpart_account_id),
        counterpart_transaction_id: Set(args.counterpart_transaction_id),
        created_by: Set(args.created_by.to_string()),
        created_at: Set(now.into()),
    };

    record.insert(txn).await.map_err(convert::db_err)
}
