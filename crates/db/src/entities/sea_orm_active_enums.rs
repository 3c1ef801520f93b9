//! Active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_status")]
pub enum AccountStatus {
    /// Account accepts monetary operations.
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Account is dormant.
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
    /// Account is blocked pending review.
    #[sea_orm(string_value = "FROZEN")]
    Frozen,
    /// Account has been closed (terminal).
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

/// Ledger transaction type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
pub enum TransactionType {
    /// Cash or incoming deposit.
    #[sea_orm(string_value = "DEPOSIT")]
    Deposit,
    /// Cash withdrawal.
    #[sea_orm(string_value = "WITHDRAWAL")]
    Withdrawal,
    /// Credit leg of a transfer.
    #[sea_orm(string_value = "TRANSFER_IN")]
    TransferIn,
    /// Debit leg of a transfer.
    #[sea_orm(string_value = "TRANSFER_OUT")]
    TransferOut,
}

/// Transaction origination channel.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_channel")]
pub enum TransactionChannel {
    /// In-branch cash handling.
    #[sea_orm(string_value = "TELLER")]
    Teller,
    /// Account-to-account transfer.
    #[sea_orm(string_value = "TRANSFER")]
    Transfer,
    /// Automated teller machine.
    #[sea_orm(string_value = "ATM")]
    Atm,
    /// Online banking.
    #[sea_orm(string_value = "ONLINE")]
    Online,
}

/// Islamic banking product type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "product_type")]
pub enum ProductType {
    /// Safekeeping savings account.
    #[sea_orm(string_value = "TABUNGAN_WADIAH")]
    TabunganWadiah,
    /// Profit-sharing savings account.
    #[sea_orm(string_value = "TABUNGAN_MUDHARABAH")]
    TabunganMudharabah,
    /// Profit-sharing time deposit.
    #[sea_orm(string_value = "DEPOSITO_MUDHARABAH")]
    DepositoMudharabah,
}

/// Customer classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "customer_type")]
pub enum CustomerType {
    /// Individual customer.
    #[sea_orm(string_value = "PERSONAL")]
    Personal,
    /// Company customer.
    #[sea_orm(string_value = "CORPORATE")]
    Corporate,
}

/// Customer standing.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "customer_status")]
pub enum CustomerStatus {
    /// Customer can open accounts and transact.
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Customer is dormant.
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
    /// Customer relationship has ended.
    #[sea_orm(string_value = "CLOSED")]
    Closed,
    /// Customer is blocked pending review.
    #[sea_orm(string_value = "FROZEN")]
    Frozen,
}

/// Identity document type for personal customers.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "identity_type")]
pub enum IdentityType {
    /// Indonesian national identity card.
    #[sea_orm(string_value = "KTP")]
    Ktp,
    /// Passport.
    #[sea_orm(string_value = "PASSPORT")]
    Passport,
    /// Indonesian driving licence.
    #[sea_orm(string_value = "SIM")]
    Sim,
}
