//! Initial database migration.
//!
//! Creates the enums and core tables: branches, customers, products,
//! accounts, transactions, and sequence counters.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(BRANCHES_SQL).await?;
        db.execute_unprepared(CUSTOMERS_SQL).await?;
        db.execute_unprepared(PRODUCTS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(SEQUENCE_NUMBERS_SQL).await?;
        db.execute_unprepared(SEED_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account lifecycle status
CREATE TYPE account_status AS ENUM (
    'ACTIVE',
    'INACTIVE',
    'FROZEN',
    'CLOSED'
);

-- Ledger transaction type
CREATE TYPE transaction_type AS ENUM (
    'DEPOSIT',
    'WITHDRAWAL',
    'TRANSFER_IN',
    'TRANSFER_OUT'
);

-- Transaction origination channel
CREATE TYPE transaction_channel AS ENUM (
    'TELLER',
    'TRANSFER',
    'ATM',
    'ONLINE'
);

-- Islamic banking product type
CREATE TYPE product_type AS ENUM (
    'TABUNGAN_WADIAH',
    'TABUNGAN_MUDHARABAH',
    'DEPOSITO_MUDHARABAH'
);

-- Customer classification
CREATE TYPE customer_type AS ENUM ('PERSONAL', 'CORPORATE');

-- Customer standing
CREATE TYPE customer_status AS ENUM (
    'ACTIVE',
    'INACTIVE',
    'CLOSED',
    'FROZEN'
);

-- Identity document type
CREATE TYPE identity_type AS ENUM ('KTP', 'PASSPORT', 'SIM');
";

const BRANCHES_SQL: &str = r"
CREATE TABLE branches (
    id UUID PRIMARY KEY,
    branch_code VARCHAR(20) NOT NULL UNIQUE,
    branch_name VARCHAR(100) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CUSTOMERS_SQL: &str = r"
CREATE TABLE customers (
    id UUID PRIMARY KEY,
    customer_number VARCHAR(50) NOT NULL UNIQUE,
    customer_type customer_type NOT NULL,
    email VARCHAR(100) NOT NULL,
    phone_number VARCHAR(20) NOT NULL,
    address TEXT,
    city VARCHAR(100),
    status customer_status NOT NULL DEFAULT 'ACTIVE',
    -- Personal fields
    first_name VARCHAR(100),
    last_name VARCHAR(100),
    date_of_birth DATE,
    identity_type identity_type,
    identity_number VARCHAR(50),
    -- Corporate fields
    company_name VARCHAR(200),
    company_registration_number VARCHAR(50),
    tax_identification_number VARCHAR(50),
    contact_person_name VARCHAR(100),
    contact_person_title VARCHAR(100),
    created_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_customers_number ON customers(customer_number);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id UUID PRIMARY KEY,
    product_code VARCHAR(20) NOT NULL UNIQUE,
    product_name VARCHAR(100) NOT NULL,
    product_type product_type NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    currency VARCHAR(3) NOT NULL DEFAULT 'IDR',
    minimum_opening_balance NUMERIC(20, 2) NOT NULL DEFAULT 0,
    minimum_balance NUMERIC(20, 2) NOT NULL DEFAULT 0,
    maximum_balance NUMERIC(20, 2),
    allow_overdraft BOOLEAN NOT NULL DEFAULT false,
    overdraft_limit NUMERIC(20, 2) NOT NULL DEFAULT 0,
    nisbah_customer NUMERIC(5, 4),
    nisbah_bank NUMERIC(5, 4),
    allowed_customer_types VARCHAR(50) NOT NULL DEFAULT 'PERSONAL,CORPORATE',
    created_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_products_limits CHECK (
        minimum_opening_balance >= 0 AND minimum_balance >= 0 AND overdraft_limit >= 0
    )
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    customer_id UUID NOT NULL REFERENCES customers(id),
    product_id UUID NOT NULL REFERENCES products(id),
    branch_id UUID NOT NULL REFERENCES branches(id),
    account_number VARCHAR(50) NOT NULL UNIQUE,
    account_name VARCHAR(200) NOT NULL,
    balance NUMERIC(20, 2) NOT NULL DEFAULT 0,
    status account_status NOT NULL DEFAULT 'ACTIVE',
    opened_date DATE NOT NULL,
    closed_date DATE,
    version BIGINT NOT NULL DEFAULT 0,
    created_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- closed_date is set iff the account is closed
    CONSTRAINT chk_accounts_closed_date CHECK (
        (status = 'CLOSED') = (closed_date IS NOT NULL)
    )
);

CREATE INDEX idx_accounts_customer ON accounts(customer_id);
CREATE INDEX idx_accounts_number ON accounts(account_number);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    transaction_number VARCHAR(50) NOT NULL UNIQUE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    transaction_type transaction_type NOT NULL,
    channel transaction_channel NOT NULL,
    amount NUMERIC(20, 2) NOT NULL,
    balance_before NUMERIC(20, 2) NOT NULL,
    balance_after NUMERIC(20, 2) NOT NULL,
    description TEXT NOT NULL,
    reference_number VARCHAR(100),
    counterpart_account_id UUID REFERENCES accounts(id),
    counterpart_transaction_id UUID,
    created_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_transactions_amount CHECK (amount > 0),
    CONSTRAINT chk_transactions_balances CHECK (
        (transaction_type IN ('DEPOSIT', 'TRANSFER_IN')
            AND balance_after = balance_before + amount)
        OR
        (transaction_type IN ('WITHDRAWAL', 'TRANSFER_OUT')
            AND balance_after = balance_before - amount)
    )
);

CREATE INDEX idx_transactions_account ON transactions(account_id, created_at DESC);
CREATE INDEX idx_transactions_number ON transactions(transaction_number);
";

const SEQUENCE_NUMBERS_SQL: &str = r"
CREATE TABLE sequence_numbers (
    sequence_name VARCHAR(50) PRIMARY KEY,
    last_number BIGINT NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const SEED_SQL: &str = r"
INSERT INTO branches (id, branch_code, branch_name, is_active)
VALUES (gen_random_uuid(), 'HO001', 'Kantor Pusat', true);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS accounts;
DROP TABLE IF EXISTS sequence_numbers;
DROP TABLE IF EXISTS products;
DROP TABLE IF EXISTS customers;
DROP TABLE IF EXISTS branches;
DROP TYPE IF EXISTS identity_type;
DROP TYPE IF EXISTS customer_status;
DROP TYPE IF EXISTS customer_type;
DROP TYPE IF EXISTS product_type;
DROP TYPE IF EXISTS transaction_channel;
DROP TYPE IF EXISTS transaction_type;
DROP TYPE IF EXISTS account_status;
";
