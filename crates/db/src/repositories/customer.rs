//! Customer repository.

use chrono::{NaiveDate, Utc};
use minibank_core::customer::{Customer, CustomerType, IdentityType};
use minibank_core::ledger::numbering;
use minibank_shared::types::CustomerId;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::{customers, sea_orm_active_enums};

use super::convert;
use super::sequence;

/// Error types for customer operations.
#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    /// Customer not found.
    #[error("Customer not found: {0}")]
    NotFound(String),

    /// Stored row does not match its declared customer type.
    #[error("Corrupted customer record: {0}")]
    InvalidRecord(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for onboarding a personal customer.
#[derive(Debug, Clone)]
pub struct CreatePersonalCustomerInput {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Identity document type.
    pub identity_type: IdentityType,
    /// Identity document number.
    pub identity_number: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Actor identity.
    pub created_by: String,
}

/// Input for onboarding a corporate customer.
#[derive(Debug, Clone)]
pub struct CreateCorporateCustomerInput {
    /// Registered company name.
    pub company_name: String,
    /// Company registration number.
    pub company_registration_number: String,
    /// Tax identification number (NPWP).
    pub tax_identification_number: String,
    /// Contact person name.
    pub contact_person_name: String,
    /// Contact person title.
    pub contact_person_title: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Actor identity.
    pub created_by: String,
}

/// Repository for customer onboarding and lookup.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Onboards a personal customer, allocating a `C`-prefixed number.
    ///
    /// # Errors
    ///
    /// Returns `Database` on persistence failure.
    #[instrument(skip(self, input))]
    pub async fn create_personal(
        &self,
        input: CreatePersonalCustomerInput,
    ) -> Result<customers::Model, CustomerError> {
        let txn = self.db.begin().await?;

        let seq = sequence::next_number(&txn, numbering::CUSTOMER_NUMBER_SEQUENCE).await?;
        let customer_number = numbering::customer_number(CustomerType::Personal, seq);
        let now = Utc::now().into();

        let model = customers::ActiveModel {
            id: Set(Uuid::now_v7()),
            customer_number: Set(customer_number),
            customer_type: Set(sea_orm_active_enums::CustomerType::Personal),
            email: Set(input.email),
            phone_number: Set(input.phone_number),
            address: Set(input.address),
            city: Set(input.city),
            status: Set(sea_orm_active_enums::CustomerStatus::Active),
            first_name: Set(Some(input.first_name)),
            last_name: Set(Some(input.last_name)),
            date_of_birth: Set(Some(input.date_of_birth)),
            identity_type: Set(Some(convert::identity_type_to_db(input.identity_type))),
            identity_number: Set(Some(input.identity_number)),
            company_name: Set(None),
            company_registration_number: Set(None),
            tax_identification_number: Set(None),
            contact_person_name: Set(None),
            contact_person_title: Set(None),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!(customer_number = %model.customer_number, "Personal customer onboarded");
        Ok(model)
    }

    /// Onboards a corporate customer, allocating a `CORP`-prefixed number.
    ///
    /// # Errors
    ///
    /// Returns `Database` on persistence failure.
    #[instrument(skip(self, input))]
    pub async fn create_corporate(
        &self,
        input: CreateCorporateCustomerInput,
    ) -> Result<customers::Model, CustomerError> {
        let txn = self.db.begin().await?;

        let seq = sequence::next_number(&txn, numbering::CUSTOMER_NUMBER_SEQUENCE).await?;
        let customer_number = numbering::customer_number(CustomerType::Corporate, seq);
        let now = Utc::now().into();

        let model = customers::ActiveModel {
            id: Set(Uuid::now_v7()),
            customer_number: Set(customer_number),
            customer_type: Set(sea_orm_active_enums::CustomerType::Corporate),
            email: Set(input.email),
            phone_number: Set(input.phone_number),
            address: Set(input.address),
            city: Set(input.city),
            status: Set(sea_orm_active_enums::CustomerStatus::Active),
            first_name: Set(None),
            last_name: Set(None),
            date_of_birth: Set(None),
            identity_type: Set(None),
            identity_number: Set(None),
            company_name: Set(Some(input.company_name)),
            company_registration_number: Set(Some(input.company_registration_number)),
            tax_identification_number: Set(Some(input.tax_identification_number)),
            contact_person_name: Set(Some(input.contact_person_name)),
            contact_person_title: Set(Some(input.contact_person_title)),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!(customer_number = %model.customer_number, "Corporate customer onboarded");
        Ok(model)
    }

    /// Loads a customer row by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the row does not exist.
    pub async fn find(&self, customer_id: CustomerId) -> Result<customers::Model, CustomerError> {
        customers::Entity::find_by_id(customer_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| CustomerError::NotFound(customer_id.to_string()))
    }

    /// Loads a customer as the domain type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing row, `InvalidRecord` for a row whose
    /// type-specific columns do not match its declared type.
    pub async fn find_domain(&self, customer_id: CustomerId) -> Result<Customer, CustomerError> {
        let model = self.find(customer_id).await?;
        convert::customer_to_domain(&model).map_err(CustomerError::InvalidRecord)
    }
}
