//! `SeaORM` Entity for named number sequences.
//!
//! Display numbers (accounts, customers, transactions) are allocated from
//! these rows under a row lock, so concurrent allocations never collide.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sequence_numbers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sequence_name: String,
    pub last_number: i64,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
