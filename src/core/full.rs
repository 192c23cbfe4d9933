//! Composite fetches - an owner row together with the contact it refers to.
//!
//! Hydration issues one extra query per owner row; nothing is batched.

use crate::{
    core::{
        contact,
        dao::{self, BatchResult},
    },
    entities::{client, contact as contact_entity, employee, supplier},
    errors::Result,
};
use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};
use serde::Serialize;

/// Rows that own a contact through a foreign key.
pub trait ContactOwner {
    /// Primary key of the owner row
    fn id(&self) -> i32;
    /// ID of the referenced contact row
    fn contact_id(&self) -> i32;
}

impl ContactOwner for employee::Model {
    fn id(&self) -> i32 {
        self.id
    }
    fn contact_id(&self) -> i32 {
        self.contact_id
    }
}

impl ContactOwner for client::Model {
    fn id(&self) -> i32 {
        self.id
    }
    fn contact_id(&self) -> i32 {
        self.contact_id
    }
}

impl ContactOwner for supplier::Model {
    fn id(&self) -> i32 {
        self.id
    }
    fn contact_id(&self) -> i32 {
        self.contact_id
    }
}

/// An owner row with its contact loaded.
///
/// Equality follows the owner row alone, so a supplier compares by tax id and id.
#[derive(Debug, Clone, Serialize)]
pub struct Full<T> {
    /// The owner row
    pub record: T,
    /// The contact the owner refers to
    pub contact: contact_entity::Model,
}

impl<T: PartialEq> PartialEq for Full<T> {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl<T: Eq> Eq for Full<T> {}

/// Loads the contact of an already fetched owner row.
pub async fn hydrate<T, C>(db: &C, record: T) -> Result<Full<T>>
where
    T: ContactOwner,
    C: ConnectionTrait,
{
    let contact = contact::require(db, record.contact_id()).await?;
    Ok(Full { record, contact })
}

/// Owner by id plus its contact. `None` when the owner does not exist.
pub async fn get_full<E, C>(db: &C, id: i32) -> Result<Option<Full<E::Model>>>
where
    E: EntityTrait,
    E::Model: ContactOwner,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    match dao::get_by_id::<E, C>(db, id).await? {
        Some(record) => hydrate(db, record).await.map(Some),
        None => Ok(None),
    }
}

/// Every owner row with its contact. Any failure fails the whole fetch.
pub async fn get_all_full<E, C>(db: &C) -> Result<Vec<Full<E::Model>>>
where
    E: EntityTrait,
    E::Model: ContactOwner,
    C: ConnectionTrait,
{
    let records = dao::get_all::<E, C>(db).await?;
    let mut full = Vec::with_capacity(records.len());
    for record in records {
        full.push(hydrate(db, record).await?);
    }
    Ok(full)
}

/// Owners for the given ids with their contacts.
///
/// Ids whose owner or contact lookup fails land in `failed`; absent owners in `missing`.
pub async fn get_range_full<E, C>(db: &C, ids: &[i32]) -> BatchResult<Full<E::Model>>
where
    E: EntityTrait,
    E::Model: ContactOwner,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let found = dao::get_by_ids::<E, C>(db, ids).await;
    let mut batch = BatchResult {
        succeeded: Vec::with_capacity(found.succeeded.len()),
        missing: found.missing,
        failed: found.failed,
    };
    for record in found.succeeded {
        let id = record.id();
        match hydrate(db, record).await {
            Ok(full) => batch.succeeded.push(full),
            Err(e) => batch.failed.push((id, e)),
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::employee::{self as employee_dao, NewEmployee};
    use crate::entities::{Contact, Employee, Role};
    use crate::errors::Error;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_get_full_hydrates_contact() -> Result<()> {
        let db = setup_test_db().await?;
        let stored = create_test_employee(&db, "Bruno", "12345678900").await?;

        let full = get_full::<Employee, _>(&db, stored.record.id).await?.unwrap();

        assert_eq!(full, stored);
        assert_eq!(full.contact.id, full.record.contact_id);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_full_absent_owner() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_full::<Employee, _>(&db, 3).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_dangling_contact_fails_single_and_all() -> Result<()> {
        let db = setup_test_db().await?;
        disable_foreign_keys(&db).await?;
        let employee = employee_dao::insert(
            &db,
            &NewEmployee::new("Carla", "98765432100", Role::Cashier),
            555,
        )
        .await?;

        let single = get_full::<Employee, _>(&db, employee.id).await;
        assert!(matches!(single, Err(Error::ContactNotFound { id: 555 })));

        let all = get_all_full::<Employee, _>(&db).await;
        assert!(matches!(all, Err(Error::ContactNotFound { id: 555 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_range_full_splits_outcomes() -> Result<()> {
        let db = setup_test_db().await?;
        let healthy = create_test_employee(&db, "Bruno", "111").await?;
        let broken = create_test_employee(&db, "Davi", "222").await?;
        disable_foreign_keys(&db).await?;
        let removed = dao::delete::<Contact, _>(&db, &[broken.contact.id]).await;
        assert_eq!(removed.succeeded, vec![broken.contact.id]);
        assert!(removed.is_complete());

        let batch =
            get_range_full::<Employee, _>(&db, &[healthy.record.id, broken.record.id, 99]).await;

        assert_eq!(batch.succeeded, vec![healthy]);
        assert_eq!(batch.missing, vec![99]);
        assert_eq!(batch.failed.len(), 1);
        assert_eq!(batch.failed[0].0, broken.record.id);
        assert!(matches!(
            batch.failed[0].1,
            Error::ContactNotFound { id } if id == broken.contact.id
        ));
        Ok(())
    }
}
