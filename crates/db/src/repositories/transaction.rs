//! Transaction query repository.
//!
//! Read side of the ledger: listing and lookup for passbooks, statements,
//! and the teller's transaction screens. All mutation happens through the
//! ledger, opening, and transfer repositories.

use minibank_core::ledger::{
    LedgerError, TransactionChannel, TransactionRecord, TransactionType,
};
use minibank_shared::types::{AccountId, TransactionId};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use minibank_shared::types::pagination::{PageRequest, PageResponse};

use crate::entities::transactions;

use super::convert::{self, db_err};

/// Maps a stored transaction row to the domain record.
///
/// The presentation layer renders from the domain type; the row and the
/// record carry the same fields.
#[must_use]
pub fn to_domain_record(model: &transactions::Model) -> TransactionRecord {
    let transaction_type = match model.transaction_type {
        crate::entities::sea_orm_active_enums::TransactionType::Deposit => {
            TransactionType::Deposit
        }
        crate::entities::sea_orm_active_enums::TransactionType::Withdrawal => {
            TransactionType::Withdrawal
        }
        crate::entities::sea_orm_active_enums::TransactionType::TransferIn => {
            TransactionType::TransferIn
        }
        crate::entities::sea_orm_active_enums::TransactionType::TransferOut => {
            TransactionType::TransferOut
        }
    };
    let channel = match model.channel {
        crate::entities::sea_orm_active_enums::TransactionChannel::Teller => {
            TransactionChannel::Teller
        }
        crate::entities::sea_orm_active_enums::TransactionChannel::Transfer => {
            TransactionChannel::Transfer
        }
        crate::entities::sea_orm_active_enums::TransactionChannel::Atm => TransactionChannel::Atm,
        crate::entities::sea_orm_active_enums::TransactionChannel::Online => {
            TransactionChannel::Online
        }
    };

    TransactionRecord {
        id: TransactionId::from_uuid(model.id),
        transaction_number: model.transaction_number.clone(),
        account_id: AccountId::from_uuid(model.account_id),
        transaction_type,
        channel,
        amount: model.amount,
        balance_before: model.balance_before,
        balance_after: model.balance_after,
        description: model.description.clone(),
        reference_number: model.reference_number.clone(),
        created_by: model.created_by.clone(),
        created_at: model.created_at.into(),
        counterpart_account_id: model.counterpart_account_id.map(AccountId::from_uuid),
        counterpart_transaction_id: model.counterpart_transaction_id.map(TransactionId::from_uuid),
    }
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by transaction type.
    pub transaction_type: Option<TransactionType>,
    /// Filter by origination channel.
    pub channel: Option<TransactionChannel>,
}

/// Repository for querying the append-only transaction log.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists an account's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Database` on query failure.
    pub async fn list_for_account(
        &self,
        account_id: AccountId,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> Result<PageResponse<transactions::Model>, LedgerError> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(account_id.into_inner()));

        if let Some(transaction_type) = filter.transaction_type {
            query = query.filter(
                transactions::Column::TransactionType
                    .eq(convert::transaction_type_to_db(transaction_type)),
            );
        }
        if let Some(channel) = filter.channel {
            query = query
                .filter(transactions::Column::Channel.eq(convert::channel_to_db(channel)));
        }

        let paginator = query
            .order_by_desc(transactions::Column::CreatedAt)
            .paginate(&self.db, page.limit().max(1));

        let total = paginator.num_items().await.map_err(db_err)?;
        let data = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await
            .map_err(db_err)?;

        Ok(PageResponse::new(data, page, total))
    }

    /// Looks up a transaction by its display number.
    ///
    /// # Errors
    ///
    /// Returns `Database` on query failure.
    pub async fn find_by_number(
        &self,
        transaction_number: &str,
    ) -> Result<Option<transactions::Model>, LedgerError> {
        transactions::Entity::find()
            .filter(transactions::Column::TransactionNumber.eq(transaction_number))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Loads both legs of a transfer given either leg's id.
    ///
    /// # Errors
    ///
    /// Returns `Database` on query failure or a missing leg.
    pub async fn find_transfer_legs(
        &self,
        transaction_id: TransactionId,
    ) -> Result<(transactions::Model, transactions::Model), LedgerError> {
        let leg = transactions::Entity::find_by_id(transaction_id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| {
                LedgerError::Database(format!("transaction {transaction_id} not found"))
            })?;

        let counterpart_id = leg.counterpart_transaction_id.ok_or_else(|| {
            LedgerError::Database(format!(
                "transaction {} is not a transfer leg",
                leg.transaction_number
            ))
        })?;

        let counterpart = transactions::Entity::find_by_id(counterpart_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| {
                LedgerError::Database(format!(
                    "counterpart of {} is missing",
                    leg.transaction_number
                ))
            })?;

        Ok((leg, counterpart))
    }
}
