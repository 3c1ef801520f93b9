//! `SeaORM` Entity for products table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ProductType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub product_code: String,
    pub product_name: String,
    pub product_type: ProductType,
    pub is_active: bool,
    pub currency: String,
    pub minimum_opening_balance: Decimal,
    pub minimum_balance: Decimal,
    pub maximum_balance: Option<Decimal>,
    pub allow_overdraft: bool,
    pub overdraft_limit: Decimal,
    pub nisbah_customer: Option<Decimal>,
    pub nisbah_bank: Option<Decimal>,
    /// Comma-separated customer types, e.g. `PERSONAL,CORPORATE`.
    pub allowed_customer_types: String,
    pub created_by: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::accounts::Entity")]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
