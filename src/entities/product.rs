//! Product entity - Items kept in stock and sold to clients.
//!
//! Each product belongs to a category and is bought from one supplier.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Produto")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Name of the product
    #[sea_orm(column_name = "Nome")]
    pub name: String,
    /// ID of the category this product is listed under
    #[sea_orm(column_name = "Categoria", indexed)]
    pub category_id: i32,
    /// ID of the supplier this product is bought from
    #[sea_orm(column_name = "Fornecedor", indexed)]
    pub supplier_id: i32,
    /// Units currently in stock
    #[sea_orm(column_name = "Quantidade")]
    pub stock: i32,
    /// Unit price
    #[sea_orm(column_name = "Valor")]
    pub price: f64,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// Each product is bought from one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    /// A product appears in many sale items
    #[sea_orm(has_many = "super::sale_item::Entity")]
    SaleItems,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::sale_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
