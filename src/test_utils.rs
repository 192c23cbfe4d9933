//! Shared test utilities for stockroom.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{
        category,
        client::{self, FullClient, NewClient},
        contact::{self, NewContact},
        employee::{self, FullEmployee, NewEmployee},
        product::{self, NewProduct},
        supplier::{self, FullSupplier, NewSupplier},
    },
    entities::{self, Role},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Turns off foreign key enforcement so a test can leave a dangling contact reference.
///
/// The in-memory database runs on a single connection, so the pragma holds for every
/// later statement of the test.
pub async fn disable_foreign_keys(db: &DatabaseConnection) -> Result<()> {
    db.execute_unprepared("PRAGMA foreign_keys = OFF").await?;
    Ok(())
}

/// Creates a test contact.
///
/// # Defaults
/// * phone: "11 99999-0000"
/// * address: "Rua das Flores, 100"
pub async fn create_test_contact(db: &DatabaseConnection) -> Result<entities::contact::Model> {
    contact::insert(db, &NewContact::new("11 99999-0000", "Rua das Flores, 100")).await
}

/// Creates a salesperson with a default contact.
pub async fn create_test_employee(
    db: &DatabaseConnection,
    name: &str,
    national_id: &str,
) -> Result<FullEmployee> {
    employee::insert_with_contact(
        db,
        &NewEmployee::new(name, national_id, Role::Salesperson),
        &NewContact::new("11 98888-0000", "Av. Paulista, 1000"),
    )
    .await
}

/// Creates a client with a default contact.
///
/// # Defaults
/// * `birth_date`: 1990-01-01
/// * email: `<national_id>@example.com`
pub async fn create_test_client(
    db: &DatabaseConnection,
    name: &str,
    national_id: &str,
) -> Result<FullClient> {
    let new = NewClient {
        name: name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
        national_id: national_id.to_string(),
        email: format!("{national_id}@example.com"),
    };
    client::insert_with_contact(db, &new, &NewContact::new("11 97777-0000", "Rua A, 1")).await
}

/// Creates a supplier with a default contact and responsible person.
pub async fn create_test_supplier(
    db: &DatabaseConnection,
    name: &str,
    tax_id: &str,
) -> Result<FullSupplier> {
    let new = NewSupplier {
        name: name.to_string(),
        tax_id: tax_id.to_string(),
        responsible: "Marta".to_string(),
    };
    supplier::insert_with_contact(db, &new, &NewContact::new("51 3333-0000", "Rua do Porto, 7"))
        .await
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * stock: 10
/// * price: 10.0
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    category_id: i32,
    supplier_id: i32,
) -> Result<entities::product::Model> {
    let new = NewProduct {
        name: name.to_string(),
        category_id,
        supplier_id,
        stock: 10,
        price: 10.0,
    };
    product::insert(db, &new).await
}

/// Fresh database holding one category ("Bebidas") and one supplier, ready for products.
pub async fn setup_with_catalog() -> Result<(
    DatabaseConnection,
    entities::category::Model,
    FullSupplier,
)> {
    let db = setup_test_db().await?;
    let drinks = category::insert(&db, "Bebidas").await?;
    let supplier = create_test_supplier(&db, "Distribuidora Sul", "12.345.678/0001-90").await?;
    Ok((db, drinks, supplier))
}
