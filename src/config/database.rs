//! Database configuration module.
//!
//! This module handles the database connection and table management using `SeaORM`.
//! Tables are generated from the entity definitions through the generic
//! [`crate::core::dao::create_table`], so the schema always matches the Rust structs.

use crate::core::dao::{create_table, drop_table};
use crate::entities::{
    Category, Client, Contact, Employee, Product, Sale, SaleItem, Supplier, User,
};
use crate::errors::{Error, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::{info, instrument};

/// Default location of the database file when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/stockroom.sqlite?mode=rwc";

/// Opens a connection to the database at `database_url`.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);

    Database::connect(options).await.map_err(|e| Error::Config {
        message: format!("Failed to open database at {database_url}: {e}"),
    })
}

/// Creates every table that does not exist yet, referenced tables first.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<()> {
    create_table::<Contact, C>(db).await?;
    create_table::<Category, C>(db).await?;
    create_table::<Client, C>(db).await?;
    create_table::<Employee, C>(db).await?;
    create_table::<Supplier, C>(db).await?;
    create_table::<Product, C>(db).await?;
    create_table::<Sale, C>(db).await?;
    create_table::<SaleItem, C>(db).await?;
    create_table::<User, C>(db).await?;

    info!("Database tables ensured");
    Ok(())
}

/// Drops every table, referencing tables first.
pub async fn drop_tables<C: ConnectionTrait>(db: &C) -> Result<()> {
    drop_table::<User, C>(db).await?;
    drop_table::<SaleItem, C>(db).await?;
    drop_table::<Sale, C>(db).await?;
    drop_table::<Product, C>(db).await?;
    drop_table::<Supplier, C>(db).await?;
    drop_table::<Employee, C>(db).await?;
    drop_table::<Client, C>(db).await?;
    drop_table::<Category, C>(db).await?;
    drop_table::<Contact, C>(db).await?;

    info!("Database tables dropped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        category::Model as CategoryModel, employee::Model as EmployeeModel,
        sale_item::Model as SaleItemModel, user::Model as UserModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_connection() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that we can execute a query to verify the connection is working
        let _: Vec<EmployeeModel> = Employee::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_twice() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<CategoryModel> = Category::find().limit(1).all(&db).await?;
        let _: Vec<SaleItemModel> = SaleItem::find().limit(1).all(&db).await?;
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_drop_tables_then_recreate() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        drop_tables(&db).await?;

        assert!(Category::find().all(&db).await.is_err());

        create_tables(&db).await?;
        assert!(Category::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_url_is_config_error() {
        let result = create_connection("not-a-database://nowhere").await;
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
