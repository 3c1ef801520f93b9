//! Product catalog repository.

use chrono::Utc;
use minibank_core::customer::CustomerType;
use minibank_core::product::{Product, ProductType};
use minibank_shared::types::ProductId;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use tracing::{info, instrument};

use crate::entities::products;

use super::convert;

/// Error types for product catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// The product definition violates a catalog invariant.
    #[error(transparent)]
    Invalid(#[from] minibank_core::product::ProductError),

    /// Product code already exists.
    #[error("Product code '{0}' already exists")]
    DuplicateCode(String),

    /// Product not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for defining a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Short product code (unique).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Product type.
    pub product_type: ProductType,
    /// Minimum balance required to open an account.
    pub minimum_opening_balance: Decimal,
    /// Minimum balance that must remain after a withdrawal.
    pub minimum_balance: Decimal,
    /// Optional balance cap.
    pub maximum_balance: Option<Decimal>,
    /// Whether overdraft is allowed.
    pub allow_overdraft: bool,
    /// Overdraft limit when allowed.
    pub overdraft_limit: Decimal,
    /// Customer profit share for profit-sharing products.
    pub nisbah_customer: Option<Decimal>,
    /// Bank profit share for profit-sharing products.
    pub nisbah_bank: Option<Decimal>,
    /// Customer types allowed to open accounts.
    pub allowed_customer_types: Vec<CustomerType>,
    /// Actor identity.
    pub created_by: String,
}

/// Repository for the product catalog.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Defines a new product after validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Invalid` when the definition breaks a catalog
    /// rule (nisbah sum, balance limits, eligibility set), `DuplicateCode`
    /// when the code is taken.
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create(&self, input: CreateProductInput) -> Result<products::Model, ProductError> {
        let product = Product {
            id: ProductId::new(),
            code: input.code.clone(),
            name: input.name.clone(),
            product_type: input.product_type,
            is_active: true,
            minimum_opening_balance: input.minimum_opening_balance,
            minimum_balance: input.minimum_balance,
            maximum_balance: input.maximum_balance,
            allow_overdraft: input.allow_overdraft,
            overdraft_limit: input.overdraft_limit,
            nisbah_customer: input.nisbah_customer,
            nisbah_bank: input.nisbah_bank,
            allowed_customer_types: input.allowed_customer_types.clone(),
        };
        product.validate()?;

        let existing = products::Entity::find()
            .filter(products::Column::ProductCode.eq(&input.code))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(ProductError::DuplicateCode(input.code));
        }

        let now = Utc::now().into();
        let allowed = product
            .allowed_customer_types
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let model = products::ActiveModel {
            id: Set(product.id.into_inner()),
            product_code: Set(product.code.clone()),
            product_name: Set(product.name.clone()),
            product_type: Set(convert::product_type_to_db(product.product_type)),
            is_active: Set(true),
            currency: Set("IDR".to_string()),
            minimum_opening_balance: Set(product.minimum_opening_balance),
            minimum_balance: Set(product.minimum_balance),
            maximum_balance: Set(product.maximum_balance),
            allow_overdraft: Set(product.allow_overdraft),
            overdraft_limit: Set(product.overdraft_limit),
            nisbah_customer: Set(product.nisbah_customer),
            nisbah_bank: Set(product.nisbah_bank),
            allowed_customer_types: Set(allowed),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(product_code = %model.product_code, "Product defined");
        Ok(model)
    }

    /// Loads a product row by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the row does not exist.
    pub async fn find(&self, product_id: ProductId) -> Result<products::Model, ProductError> {
        products::Entity::find_by_id(product_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| ProductError::NotFound(product_id.to_string()))
    }

    /// Loads a product as the domain read model.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing row, `Database` for a corrupted one.
    pub async fn find_domain(&self, product_id: ProductId) -> Result<Product, ProductError> {
        let model = self.find(product_id).await?;
        convert::product_to_domain(&model).map_err(|e| ProductError::Database(DbErr::Custom(e)))
    }

    /// Lists products currently open for new accounts.
    ///
    /// # Errors
    ///
    /// Returns `Database` on query failure.
    pub async fn list_active(&self) -> Result<Vec<products::Model>, ProductError> {
        let models = products::Entity::find()
            .filter(products::Column::IsActive.eq(true))
            .order_by_asc(products::Column::ProductCode)
            .all(&self.db)
            .await?;
        Ok(models)
    }
}
