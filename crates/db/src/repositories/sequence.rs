//! Named number sequence allocation.
//!
//! Allocation takes a row lock on the sequence row so concurrent callers
//! observe distinct numbers; the caller's enclosing transaction makes the
//! allocation atomic with the row that uses the number.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseTransaction, DbErr, EntityTrait, QuerySelect,
};

use crate::entities::sequence_numbers;

/// Allocates the next number from the named sequence.
pub(crate) async fn next_number(
    txn: &DatabaseTransaction,
    sequence_name: &str,
) -> Result<i64, DbErr> {
    let existing = sequence_numbers::Entity::find_by_id(sequence_name.to_owned())
        .lock_exclusive()
        .one(txn)
        .await?;

    match existing {
        Some(row) => {
            let next = row.last_number + 1;
            let mut active: sequence_numbers::ActiveModel = row.into();
            active.last_number = Set(next);
            active.updated_at = Set(Utc::now().into());
            active.update(txn).await?;
            Ok(next)
        }
        None => {
            sequence_numbers::ActiveModel {
                sequence_name: Set(sequence_name.to_owned()),
                last_number: Set(1),
                updated_at: Set(Utc::now().into()),
            }
            .insert(txn)
            .await?;
            Ok(1)
        }
    }
}
