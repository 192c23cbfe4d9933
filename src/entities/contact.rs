//! Contact entity - Phone and address shared by the people-like records.
//!
//! Employees, clients and suppliers each store the id of their own contact row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contact database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Contato")]
pub struct Model {
    /// Unique identifier for the contact
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Phone number as written in the source data
    #[sea_orm(column_name = "Telefone")]
    pub phone: String,
    /// Free-form postal address
    #[sea_orm(column_name = "Endereco")]
    pub address: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
