//! Two-phase transfer orchestration.
//!
//! A transfer touches two accounts, so the flow is validate → confirm →
//! execute: validation produces a [`types::TransferPreview`] without touching
//! state, and execution re-validates against current state before committing
//! both legs atomically.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod transfer_props;

pub use error::TransferError;
pub use service::TransferService;
pub use types::{TransferPreview, TransferRequest};
