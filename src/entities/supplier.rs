//! Supplier entity - Companies products are bought from.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database model
///
/// Two suppliers are equal when they share tax id and id; other fields are ignored.
#[derive(Clone, Debug, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Fornecedor")]
pub struct Model {
    /// Unique identifier for the supplier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Company name
    #[sea_orm(column_name = "Nome")]
    pub name: String,
    /// Company tax id (CNPJ)
    #[sea_orm(column_name = "CNPJ")]
    pub tax_id: String,
    /// Person answering for the supplier
    #[sea_orm(column_name = "PessoaResponsavel")]
    pub responsible: String,
    /// ID of the contact row owned by this supplier
    #[sea_orm(column_name = "Contato", indexed)]
    pub contact_id: i32,
}

/// Defines relationships between Supplier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each supplier owns one contact
    #[sea_orm(
        belongs_to = "super::contact::Entity",
        from = "Column::ContactId",
        to = "super::contact::Column::Id"
    )]
    Contact,
    /// One supplier provides many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.tax_id == other.tax_id && self.id == other.id
    }
}

impl Eq for Model {}

impl std::hash::Hash for Model {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.tax_id.hash(state);
        self.id.hash(state);
    }
}

impl ActiveModelBehavior for ActiveModel {}
