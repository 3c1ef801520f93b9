//! Conversions between entity models and core domain types.

use std::str::FromStr;

use minibank_core::customer::{
    CorporateDetails, Customer, CustomerDetails, CustomerStatus, CustomerType, IdentityType,
    PersonalDetails,
};
use minibank_core::ledger::{Account, AccountStatus, LedgerError, TransactionChannel, TransactionType};
use minibank_core::product::{Product, ProductType};
use minibank_shared::types::{AccountId, BranchId, CustomerId, ProductId};
use sea_orm::DbErr;

use crate::entities::{accounts, customers, products, sea_orm_active_enums};

/// Maps a database error into the ledger error space.
pub(crate) fn db_err(err: DbErr) -> LedgerError {
    LedgerError::Database(err.to_string())
}

pub(crate) fn account_status_to_domain(status: &sea_orm_active_enums::AccountStatus) -> AccountStatus {
    match status {
        sea_orm_active_enums::AccountStatus::Active => AccountStatus::Active,
        sea_orm_active_enums::AccountStatus::Inactive => AccountStatus::Inactive,
        sea_orm_active_enums::AccountStatus::Frozen => AccountStatus::Frozen,
        sea_orm_active_enums::AccountStatus::Closed => AccountStatus::Closed,
    }
}

pub(crate) fn account_status_to_db(status: AccountStatus) -> sea_orm_active_enums::AccountStatus {
    match status {
        AccountStatus::Active => sea_orm_active_enums::AccountStatus::Active,
        AccountStatus::Inactive => sea_orm_active_enums::AccountStatus::Inactive,
        AccountStatus::Frozen => sea_orm_active_enums::AccountStatus::Frozen,
        AccountStatus::Closed => sea_orm_active_enums::AccountStatus::Closed,
    }
}

pub(crate) fn transaction_type_to_db(
    transaction_type: TransactionType,
) -> sea_orm_active_enums::TransactionType {
    match transaction_type {
        TransactionType::Deposit => sea_orm_active_enums::TransactionType::Deposit,
        TransactionType::Withdrawal => sea_orm_active_enums::TransactionType::Withdrawal,
        TransactionType::TransferIn => sea_orm_active_enums::TransactionType::TransferIn,
        TransactionType::TransferOut => sea_orm_active_enums::TransactionType::TransferOut,
    }
}

pub(crate) fn channel_to_db(
    channel: TransactionChannel,
) -> sea_orm_active_enums::TransactionChannel {
    match channel {
        TransactionChannel::Teller => sea_orm_active_enums::TransactionChannel::Teller,
        TransactionChannel::Transfer => sea_orm_active_enums::TransactionChannel::Transfer,
        TransactionChannel::Atm => sea_orm_active_enums::TransactionChannel::Atm,
        TransactionChannel::Online => sea_orm_active_enums::TransactionChannel::Online,
    }
}

pub(crate) fn product_type_to_domain(
    product_type: &sea_orm_active_enums::ProductType,
) -> ProductType {
    match product_type {
        sea_orm_active_enums::ProductType::TabunganWadiah => ProductType::TabunganWadiah,
        sea_orm_active_enums::ProductType::TabunganMudharabah => ProductType::TabunganMudharabah,
        sea_orm_active_enums::ProductType::DepositoMudharabah => ProductType::DepositoMudharabah,
    }
}

pub(crate) fn product_type_to_db(
    product_type: ProductType,
) -> sea_orm_active_enums::ProductType {
    match product_type {
        ProductType::TabunganWadiah => sea_orm_active_enums::ProductType::TabunganWadiah,
        ProductType::TabunganMudharabah => sea_orm_active_enums::ProductType::TabunganMudharabah,
        ProductType::DepositoMudharabah => sea_orm_active_enums::ProductType::DepositoMudharabah,
    }
}

pub(crate) fn customer_status_to_domain(
    status: &sea_orm_active_enums::CustomerStatus,
) -> CustomerStatus {
    match status {
        sea_orm_active_enums::CustomerStatus::Active => CustomerStatus::Active,
        sea_orm_active_enums::CustomerStatus::Inactive => CustomerStatus::Inactive,
        sea_orm_active_enums::CustomerStatus::Closed => CustomerStatus::Closed,
        sea_orm_active_enums::CustomerStatus::Frozen => CustomerStatus::Frozen,
    }
}

pub(crate) fn identity_type_to_domain(
    identity_type: &sea_orm_active_enums::IdentityType,
) -> IdentityType {
    match identity_type {
        sea_orm_active_enums::IdentityType::Ktp => IdentityType::Ktp,
        sea_orm_active_enums::IdentityType::Passport => IdentityType::Passport,
        sea_orm_active_enums::IdentityType::Sim => IdentityType::Sim,
    }
}

pub(crate) fn identity_type_to_db(
    identity_type: IdentityType,
) -> sea_orm_active_enums::IdentityType {
    match identity_type {
        IdentityType::Ktp => sea_orm_active_enums::IdentityType::Ktp,
        IdentityType::Passport => sea_orm_active_enums::IdentityType::Passport,
        IdentityType::Sim => sea_orm_active_enums::IdentityType::Sim,
    }
}

/// Rehydrates the account aggregate from its row.
pub(crate) fn account_to_domain(model: &accounts::Model) -> Account {
    Account::from_storage(
        AccountId::from_uuid(model.id),
        model.account_number.clone(),
        model.account_name.clone(),
        CustomerId::from_uuid(model.customer_id),
        ProductId::from_uuid(model.product_id),
        BranchId::from_uuid(model.branch_id),
        account_status_to_domain(&model.status),
        model.opened_date,
        model.closed_date,
        model.balance,
        model.version,
    )
}

/// Rehydrates the product read model from its row.
///
/// Fails only on a corrupted `allowed_customer_types` column.
pub(crate) fn product_to_domain(model: &products::Model) -> Result<Product, String> {
    let allowed_customer_types = model
        .allowed_customer_types
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(CustomerType::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("product {}: {e}", model.product_code))?;

    Ok(Product {
        id: ProductId::from_uuid(model.id),
        code: model.product_code.clone(),
        name: model.product_name.clone(),
        product_type: product_type_to_domain(&model.product_type),
        is_active: model.is_active,
        minimum_opening_balance: model.minimum_opening_balance,
        minimum_balance: model.minimum_balance,
        maximum_balance: model.maximum_balance,
        allow_overdraft: model.allow_overdraft,
        overdraft_limit: model.overdraft_limit,
        nisbah_customer: model.nisbah_customer,
        nisbah_bank: model.nisbah_bank,
        allowed_customer_types,
    })
}

/// Rehydrates a customer from its row.
///
/// Fails when the type-specific columns do not match `customer_type`.
pub(crate) fn customer_to_domain(model: &customers::Model) -> Result<Customer, String> {
    let details = match model.customer_type {
        sea_orm_active_enums::CustomerType::Personal => {
            let (Some(first_name), Some(last_name), Some(date_of_birth), Some(identity_type), Some(identity_number)) = (
                model.first_name.clone(),
                model.last_name.clone(),
                model.date_of_birth,
                model.identity_type.as_ref(),
                model.identity_number.clone(),
            ) else {
                return Err(format!(
                    "customer {} is PERSONAL but is missing personal fields",
                    model.customer_number
                ));
            };
            CustomerDetails::Personal(PersonalDetails {
                first_name,
                last_name,
                date_of_birth,
                identity_type: identity_type_to_domain(identity_type),
                identity_number,
            })
        }
        sea_orm_active_enums::CustomerType::Corporate => {
            let (Some(company_name), Some(company_registration_number), Some(tax_identification_number)) = (
                model.company_name.clone(),
                model.company_registration_number.clone(),
                model.tax_identification_number.clone(),
            ) else {
                return Err(format!(
                    "customer {} is CORPORATE but is missing corporate fields",
                    model.customer_number
                ));
            };
            CustomerDetails::Corporate(CorporateDetails {
                company_name,
                company_registration_number,
                tax_identification_number,
                contact_person_name: model.contact_person_name.clone().unwrap_or_default(),
                contact_person_title: model.contact_person_title.clone().unwrap_or_default(),
            })
        }
    };

    Ok(Customer {
        id: CustomerId::from_uuid(model.id),
        customer_number: model.customer_number.clone(),
        email: model.email.clone(),
        phone_number: model.phone_number.clone(),
        status: customer_status_to_domain(&model.status),
        details,
    })
}
