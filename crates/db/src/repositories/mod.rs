//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.
//! Every balance-mutating operation runs as one database transaction with
//! the affected account rows locked in a fixed order, and retries once on an
//! optimistic-version conflict before surfacing it.

pub mod customer;
pub mod ledger;
pub mod opening;
pub mod product;
pub mod transaction;
pub mod transfer;

mod convert;
mod posting;
mod sequence;

pub use customer::{
    CreateCorporateCustomerInput, CreatePersonalCustomerInput, CustomerError, CustomerRepository,
};
pub use ledger::{LedgerRepository, TellerLimits};
pub use opening::{OpenAccountInput, OpeningRepository};
pub use product::{CreateProductInput, ProductError, ProductRepository};
pub use transaction::{to_domain_record, TransactionFilter, TransactionRepository};
pub use transfer::{TransferReceipt, TransferRepository};
