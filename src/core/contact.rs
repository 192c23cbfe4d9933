//! Contact business logic - Phone/address rows owned by employees, clients and suppliers.

use crate::{
    core::dao,
    entities::{Contact, contact},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, Set, Unchanged};
use tracing::debug;

/// Fields of a contact that is about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    /// Phone number
    pub phone: String,
    /// Postal address
    pub address: String,
}

impl NewContact {
    /// Builds a contact from its phone and address.
    #[must_use]
    pub fn new(phone: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            address: address.into(),
        }
    }
}

/// Stores a contact and returns it with its generated id.
pub async fn insert<C: ConnectionTrait>(db: &C, new: &NewContact) -> Result<contact::Model> {
    let model = contact::ActiveModel {
        phone: Set(new.phone.trim().to_string()),
        address: Set(new.address.trim().to_string()),
        ..Default::default()
    };
    let stored = dao::insert_model(db, model).await?;
    debug!("Inserted contact {}", stored.id);
    Ok(stored)
}

/// Replaces phone and address of the contact with `updated.id`.
pub async fn update<C: ConnectionTrait>(db: &C, updated: &contact::Model) -> Result<bool> {
    let model = contact::ActiveModel {
        id: Unchanged(updated.id),
        phone: Set(updated.phone.trim().to_string()),
        address: Set(updated.address.trim().to_string()),
    };
    dao::update_model(db, model).await
}

/// Fetches a contact that another row refers to; a dangling reference is an error.
pub async fn require<C: ConnectionTrait>(db: &C, id: i32) -> Result<contact::Model> {
    dao::get_by_id::<Contact, C>(db, id)
        .await?
        .ok_or(Error::ContactNotFound { id })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_insert_trims_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let stored = insert(&db, &NewContact::new(" 999999 ", "Rua A  ")).await?;
        assert_eq!(stored.phone, "999999");
        assert_eq!(stored.address, "Rua A");
        assert!(stored.id > 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_existing_and_missing() -> Result<()> {
        let db = setup_test_db().await?;
        let mut stored = create_test_contact(&db).await?;
        stored.address = "Rua B, 12".to_string();

        assert!(update(&db, &stored).await?);
        assert_eq!(require(&db, stored.id).await?.address, "Rua B, 12");

        let ghost = contact::Model {
            id: 404,
            phone: "0".to_string(),
            address: "nowhere".to_string(),
        };
        assert!(!update(&db, &ghost).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_require_missing_contact() -> Result<()> {
        let db = setup_test_db().await?;
        let result = require(&db, 7).await;
        assert!(matches!(result, Err(Error::ContactNotFound { id: 7 })));
        Ok(())
    }
}
