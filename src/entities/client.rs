//! Client entity - People the store sells to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Cliente")]
pub struct Model {
    /// Unique identifier for the client
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Full name
    #[sea_orm(column_name = "Nome")]
    pub name: String,
    /// Date of birth
    #[sea_orm(column_name = "DataNascimento")]
    pub birth_date: Date,
    /// National id (CPF)
    #[sea_orm(column_name = "CPF")]
    pub national_id: String,
    /// E-mail address
    #[sea_orm(column_name = "Email")]
    pub email: String,
    /// ID of the contact row owned by this client
    #[sea_orm(column_name = "Contato", indexed)]
    pub contact_id: i32,
}

/// Defines relationships between Client and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each client owns one contact
    #[sea_orm(
        belongs_to = "super::contact::Entity",
        from = "Column::ContactId",
        to = "super::contact::Column::Id"
    )]
    Contact,
    /// One client has many sales
    #[sea_orm(has_many = "super::sale::Entity")]
    Sales,
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
