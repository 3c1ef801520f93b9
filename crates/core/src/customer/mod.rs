//! Personal and corporate customers.
//!
//! Customers come in two shapes with different identifying data; the ledger
//! only cares about the shared fields and the customer type when checking
//! product eligibility.

pub mod types;

pub use types::{
    CorporateDetails, Customer, CustomerDetails, CustomerStatus, CustomerType, IdentityType,
    PersonalDetails,
};
