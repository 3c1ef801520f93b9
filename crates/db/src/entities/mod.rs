//! `SeaORM` entity definitions.

pub mod accounts;
pub mod branches;
pub mod customers;
pub mod products;
pub mod sea_orm_active_enums;
pub mod sequence_numbers;
pub mod transactions;
