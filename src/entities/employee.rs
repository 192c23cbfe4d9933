//! Employee entity - Staff members with a role and a contact.
//!
//! The role is stored as a stable string code. Older data encoded it as the
//! position of the role in the declaration below; [`Role::from_ordinal`] and
//! [`Role::ordinal`] are the mapping for that encoding and must not be reordered.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job role of an employee
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Role {
    /// Runs the store
    #[sea_orm(string_value = "manager")]
    Manager,
    /// Sells to clients
    #[sea_orm(string_value = "salesperson")]
    Salesperson,
    /// Receives and shelves supplier deliveries
    #[sea_orm(string_value = "stockist")]
    Stockist,
    /// Operates the till
    #[sea_orm(string_value = "cashier")]
    Cashier,
}

impl Role {
    const LEGACY_ORDER: [Self; 4] = [
        Self::Manager,
        Self::Salesperson,
        Self::Stockist,
        Self::Cashier,
    ];

    /// Maps a legacy ordinal code to its role, if the code is known.
    #[must_use]
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::LEGACY_ORDER.get(ordinal).copied()
    }

    /// Legacy ordinal code of this role.
    #[must_use]
    pub fn ordinal(self) -> usize {
        match self {
            Self::Manager => 0,
            Self::Salesperson => 1,
            Self::Stockist => 2,
            Self::Cashier => 3,
        }
    }
}

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Funcionario")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Full name
    #[sea_orm(column_name = "Nome")]
    pub name: String,
    /// National id (CPF)
    #[sea_orm(column_name = "CPF")]
    pub national_id: String,
    /// Job role
    #[sea_orm(column_name = "Cargo")]
    pub role: Role,
    /// ID of the contact row owned by this employee
    #[sea_orm(column_name = "Contato", indexed)]
    pub contact_id: i32,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each employee owns one contact
    #[sea_orm(
        belongs_to = "super::contact::Entity",
        from = "Column::ContactId",
        to = "super::contact::Column::Id"
    )]
    Contact,
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
