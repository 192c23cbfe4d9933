//! Sale item entity - A (product, quantity) line of a sale.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "VendaProduto")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the sale this line belongs to
    #[sea_orm(column_name = "Venda", indexed)]
    pub sale_id: i32,
    /// ID of the product sold
    #[sea_orm(column_name = "Produto", indexed)]
    pub product_id: i32,
    /// Units sold
    #[sea_orm(column_name = "Quantidade")]
    pub quantity: i32,
}

/// Defines relationships between SaleItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one sale
    #[sea_orm(
        belongs_to = "super::sale::Entity",
        from = "Column::SaleId",
        to = "super::sale::Column::Id"
    )]
    Sale,
    /// Each line refers to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
