//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//!
//! All balance mutations run inside one database transaction with the
//! affected account rows locked, and re-check the account's optimistic
//! version at write time. Transaction rows are insert-only.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    CustomerRepository, LedgerRepository, OpeningRepository, ProductRepository, TellerLimits,
    TransactionRepository, TransferRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
