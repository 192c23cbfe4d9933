//! Populator - One-shot seeding of the database from delimited text files.
//!
//! Files live under `<base_dir>/populador/` and are loaded in a fixed order: clients,
//! employees, suppliers, categories, products, sales, users. Each record that spans
//! several tables (contact + owner, sale + lines) is written in one transaction.
//! A failing record stops its kind with [`Error::Install`]; records of that kind that
//! were already committed stay in place.

pub mod records;

use crate::{
    core::{category, client, employee, product, sale, supplier, user},
    errors::{Error, InstallStep, Result},
};
use records::Origin;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::{
    future::Future,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, instrument};

/// Directory holding the seed files inside the base directory.
pub const SEED_DIR: &str = "populador";
/// Seed file for clients
pub const CLIENTS_FILE: &str = "clientes.txt";
/// Seed file for employees
pub const EMPLOYEES_FILE: &str = "funcionario.txt";
/// Seed file for suppliers
pub const SUPPLIERS_FILE: &str = "fornecedor.txt";
/// Seed file for categories
pub const CATEGORIES_FILE: &str = "categoria.txt";
/// Seed file for products
pub const PRODUCTS_FILE: &str = "produto.txt";
/// Seed file for sales
pub const SALES_FILE: &str = "venda.txt";
/// Seed file for users
pub const USERS_FILE: &str = "usuario.txt";

/// Where the populator looks for its files.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PopulatorConfig {
    /// Directory that contains the `populador/` folder
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for PopulatorConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
        }
    }
}

impl PopulatorConfig {
    /// Seeds from `<base_dir>/populador/`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Full path of one seed file.
    #[must_use]
    pub fn file_path(&self, file: &str) -> PathBuf {
        self.base_dir.join(SEED_DIR).join(file)
    }
}

/// Number of records inserted per kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopulationReport {
    /// Clients inserted
    pub clients: usize,
    /// Employees inserted
    pub employees: usize,
    /// Suppliers inserted
    pub suppliers: usize,
    /// Categories inserted
    pub categories: usize,
    /// Products inserted
    pub products: usize,
    /// Sales inserted
    pub sales: usize,
    /// Users inserted
    pub users: usize,
}

/// Non-blank lines of a seed file with their 1-based line numbers.
fn read_records(path: &Path) -> Result<Vec<(usize, String)>> {
    let contents = std::fs::read_to_string(path)
        .inspect_err(|e| error!("Cannot read seed file {}: {}", path.display(), e))?;
    Ok(contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, line.to_string()))
        .collect())
}

/// Parses every record of `file` and hands it to `insert`, stopping at the first failure.
async fn populate_file<T, P, F, Fut>(
    config: &PopulatorConfig,
    file: &str,
    parse: P,
    mut insert: F,
) -> Result<usize>
where
    P: Fn(Origin<'_>, &str) -> Result<T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let path = config.file_path(file);
    debug!("Reading {}", path.display());
    let mut inserted = 0;
    for (line, text) in read_records(&path)? {
        let record = parse(Origin { file, line }, &text)?;
        insert(record).await?;
        inserted += 1;
    }
    Ok(inserted)
}

/// Turns any failure of one kind into the installation error naming that kind.
async fn run_step<F>(step: InstallStep, work: F) -> Result<usize>
where
    F: Future<Output = Result<usize>>,
{
    info!("Populating {}", step);
    match work.await {
        Ok(count) => {
            info!("Populated {} ({} record(s))", step, count);
            Ok(count)
        }
        Err(e) => {
            error!("Population of {} aborted: {}", step, e);
            Err(Error::Install {
                step,
                message: e.to_string(),
            })
        }
    }
}

/// Seeds clients and their contacts from `clientes.txt`.
#[instrument(skip(db))]
pub async fn populate_clients(db: &DatabaseConnection, config: &PopulatorConfig) -> Result<usize> {
    run_step(
        InstallStep::Clients,
        populate_file(config, CLIENTS_FILE, records::parse_client, move |parsed| async move {
            client::insert_with_contact(db, &parsed.record, &parsed.contact)
                .await
                .map(|_| ())
        }),
    )
    .await
}

/// Seeds employees and their contacts from `funcionario.txt`.
#[instrument(skip(db))]
pub async fn populate_employees(
    db: &DatabaseConnection,
    config: &PopulatorConfig,
) -> Result<usize> {
    run_step(
        InstallStep::Employees,
        populate_file(config, EMPLOYEES_FILE, records::parse_employee, move |parsed| async move {
            employee::insert_with_contact(db, &parsed.record, &parsed.contact)
                .await
                .map(|_| ())
        }),
    )
    .await
}

/// Seeds suppliers and their contacts from `fornecedor.txt`.
#[instrument(skip(db))]
pub async fn populate_suppliers(
    db: &DatabaseConnection,
    config: &PopulatorConfig,
) -> Result<usize> {
    run_step(
        InstallStep::Suppliers,
        populate_file(config, SUPPLIERS_FILE, records::parse_supplier, move |parsed| async move {
            supplier::insert_with_contact(db, &parsed.record, &parsed.contact)
                .await
                .map(|_| ())
        }),
    )
    .await
}

/// Seeds categories from `categoria.txt`.
#[instrument(skip(db))]
pub async fn populate_categories(
    db: &DatabaseConnection,
    config: &PopulatorConfig,
) -> Result<usize> {
    run_step(
        InstallStep::Categories,
        populate_file(config, CATEGORIES_FILE, records::parse_category, move |name| async move {
            category::insert(db, &name).await.map(|_| ())
        }),
    )
    .await
}

/// Seeds products from `produto.txt`.
#[instrument(skip(db))]
pub async fn populate_products(
    db: &DatabaseConnection,
    config: &PopulatorConfig,
) -> Result<usize> {
    run_step(
        InstallStep::Products,
        populate_file(config, PRODUCTS_FILE, records::parse_product, move |new| async move {
            product::insert(db, &new).await.map(|_| ())
        }),
    )
    .await
}

/// Seeds sales and their product lines from `venda.txt`.
#[instrument(skip(db))]
pub async fn populate_sales(db: &DatabaseConnection, config: &PopulatorConfig) -> Result<usize> {
    run_step(
        InstallStep::Sales,
        populate_file(config, SALES_FILE, records::parse_sale, move |parsed| async move {
            sale::insert_with_items(db, &parsed.sale, &parsed.lines)
                .await
                .map(|_| ())
        }),
    )
    .await
}

/// Seeds users from `usuario.txt`, hashing each password.
#[instrument(skip(db))]
pub async fn populate_users(db: &DatabaseConnection, config: &PopulatorConfig) -> Result<usize> {
    run_step(
        InstallStep::Users,
        populate_file(config, USERS_FILE, records::parse_user, move |parsed| async move {
            user::insert(db, &parsed.login, &parsed.password)
                .await
                .map(|_| ())
        }),
    )
    .await
}

/// Seeds every kind in order, stopping at the first kind that fails.
///
/// # Errors
/// Returns `Error::Install` naming the kind that failed. Kinds before it stay populated.
#[instrument(skip(db))]
pub async fn populate_all(
    db: &DatabaseConnection,
    config: &PopulatorConfig,
) -> Result<PopulationReport> {
    let report = PopulationReport {
        clients: populate_clients(db, config).await?,
        employees: populate_employees(db, config).await?,
        suppliers: populate_suppliers(db, config).await?,
        categories: populate_categories(db, config).await?,
        products: populate_products(db, config).await?,
        sales: populate_sales(db, config).await?,
        users: populate_users(db, config).await?,
    };
    info!("Population finished: {:?}", report);
    Ok(report)
}
