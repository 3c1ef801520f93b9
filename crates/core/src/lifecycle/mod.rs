//! Account lifecycle rules.
//!
//! Opening creates the account together with its initial-deposit transaction
//! in one atomic unit; closure lives on the `Account` aggregate itself since
//! it is a pure state transition.

pub mod error;
pub mod service;

pub use error::OpeningError;
pub use service::LifecycleService;
