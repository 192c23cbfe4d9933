//! Sale entity - One checkout made by an employee for a client.
//!
//! The products sold and their quantities live in [`super::sale_item`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Venda")]
pub struct Model {
    /// Unique identifier for the sale
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the client who bought
    #[sea_orm(column_name = "Cliente", indexed)]
    pub client_id: i32,
    /// ID of the employee who sold
    #[sea_orm(column_name = "Funcionario", indexed)]
    pub employee_id: i32,
    /// Total amount charged
    #[sea_orm(column_name = "ValorTotal")]
    pub total: f64,
    /// Day the sale happened
    #[sea_orm(column_name = "Data")]
    pub date: Date,
}

/// Defines relationships between Sale and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each sale is made to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    /// Each sale is made by one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
    /// One sale has many items
    #[sea_orm(has_many = "super::sale_item::Entity")]
    Items,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::sale_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
