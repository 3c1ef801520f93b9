//! `SeaORM` Entity for customers table.
//!
//! Personal and corporate customers share one table; type-specific columns
//! are nullable and populated according to `customer_type`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{CustomerStatus, CustomerType, IdentityType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub customer_number: String,
    pub customer_type: CustomerType,
    pub email: String,
    pub phone_number: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub status: CustomerStatus,
    // Personal fields
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<Date>,
    pub identity_type: Option<IdentityType>,
    pub identity_number: Option<String>,
    // Corporate fields
    pub company_name: Option<String>,
    pub company_registration_number: Option<String>,
    pub tax_identification_number: Option<String>,
    pub contact_person_name: Option<String>,
    pub contact_person_title: Option<String>,
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
