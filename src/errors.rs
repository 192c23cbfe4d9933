//! Unified error types for the data-access layer and the populator.

use std::fmt;
use thiserror::Error;

/// Which data-access step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaoErrorKind {
    /// Creating a table
    CreateTable,
    /// Dropping a table
    DropTable,
    /// Reading rows
    Query,
    /// Inserting a row
    Insert,
    /// Updating a row
    Update,
    /// Deleting rows
    Delete,
    /// Reading the highest generated id
    GetId,
}

impl fmt::Display for DaoErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CreateTable => "create table",
            Self::DropTable => "drop table",
            Self::Query => "query",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::GetId => "get id",
        };
        f.write_str(label)
    }
}

/// Which population step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStep {
    /// `clientes.txt`
    Clients,
    /// `funcionario.txt`
    Employees,
    /// `fornecedor.txt`
    Suppliers,
    /// `categoria.txt`
    Categories,
    /// `produto.txt`
    Products,
    /// `venda.txt`
    Sales,
    /// `usuario.txt`
    Users,
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Clients => "clients",
            Self::Employees => "employees",
            Self::Suppliers => "suppliers",
            Self::Categories => "categories",
            Self::Products => "products",
            Self::Sales => "sales",
            Self::Users => "users",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    Validation { message: String },

    #[error("{kind} failed in {origin}: {message}")]
    Dao {
        kind: DaoErrorKind,
        message: String,
        origin: String,
    },

    #[error("Failed to populate {step}: {message}")]
    Install { step: InstallStep, message: String },

    #[error("Malformed record in {file} at line {line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    #[error("Contact not found: {id}")]
    ContactNotFound { id: i32 },

    #[error("Product not found: {id}")]
    ProductNotFound { id: i32 },

    #[error("Password hashing error: {message}")]
    Password { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Wraps an underlying failure with the step and the table it happened on.
    pub fn dao(kind: DaoErrorKind, origin: &str, cause: impl fmt::Display) -> Self {
        Self::Dao {
            kind,
            message: cause.to_string(),
            origin: origin.to_string(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
