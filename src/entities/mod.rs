//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Table and column names keep the legacy schema; field names are English.

pub mod category;
pub mod client;
pub mod contact;
pub mod employee;
pub mod product;
pub mod sale;
pub mod sale_item;
pub mod supplier;
pub mod user;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use contact::{Column as ContactColumn, Entity as Contact, Model as ContactModel};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel, Role};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use sale::{Column as SaleColumn, Entity as Sale, Model as SaleModel};
pub use sale_item::{Column as SaleItemColumn, Entity as SaleItem, Model as SaleItemModel};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
