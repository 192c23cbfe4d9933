//! Employee business logic - Staff records, their roles and contacts.

use crate::{
    core::{
        contact::{self, NewContact},
        dao::{self, BatchResult},
        full::{self, Full},
    },
    entities::{Employee, Role, employee},
    errors::{DaoErrorKind, Error, Result},
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
    TransactionTrait, Unchanged,
};
use tracing::info;

/// An employee together with its contact.
pub type FullEmployee = Full<employee::Model>;

/// Fields of an employee that is about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// Full name
    pub name: String,
    /// National id (CPF)
    pub national_id: String,
    /// Job role
    pub role: Role,
}

impl NewEmployee {
    /// Builds an employee from its name, national id and role.
    #[must_use]
    pub fn new(name: impl Into<String>, national_id: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            national_id: national_id.into(),
            role,
        }
    }
}

fn validate(name: &str, national_id: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Employee name cannot be empty"));
    }
    if national_id.trim().is_empty() {
        return Err(Error::validation("Employee national id cannot be empty"));
    }
    Ok(())
}

/// Stores an employee linked to an existing contact.
///
/// # Errors
/// Returns `Error::Validation` for an empty name or national id, `Error::Dao` when
/// the insert fails.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    new: &NewEmployee,
    contact_id: i32,
) -> Result<employee::Model> {
    validate(&new.name, &new.national_id)?;
    let model = employee::ActiveModel {
        name: Set(new.name.trim().to_string()),
        national_id: Set(new.national_id.trim().to_string()),
        role: Set(new.role),
        contact_id: Set(contact_id),
        ..Default::default()
    };
    dao::insert_model(db, model).await
}

/// Stores a contact and the employee owning it in one transaction.
pub async fn insert_with_contact<C>(
    db: &C,
    new: &NewEmployee,
    new_contact: &NewContact,
) -> Result<FullEmployee>
where
    C: ConnectionTrait + TransactionTrait,
{
    validate(&new.name, &new.national_id)?;
    let origin = dao::table_of::<Employee>();
    let txn = db
        .begin()
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Insert, &origin, e))?;

    let contact = contact::insert(&txn, new_contact).await?;
    let record = insert(&txn, new, contact.id).await?;

    txn.commit()
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Insert, &origin, e))?;
    info!(
        "Inserted employee {} ({:?}) with contact {}",
        record.id, record.role, contact.id
    );
    Ok(Full { record, contact })
}

/// Replaces name, national id and role of the employee with `updated.id`.
///
/// The contact link is not changed.
pub async fn update<C: ConnectionTrait>(db: &C, updated: &employee::Model) -> Result<bool> {
    validate(&updated.name, &updated.national_id)?;
    let model = employee::ActiveModel {
        id: Unchanged(updated.id),
        name: Set(updated.name.trim().to_string()),
        national_id: Set(updated.national_id.trim().to_string()),
        role: Set(updated.role),
        contact_id: NotSet,
    };
    dao::update_model(db, model).await
}

/// ID of the employee with this national id, if any.
pub async fn find_id_by_national_id<C: ConnectionTrait>(
    db: &C,
    national_id: &str,
) -> Result<Option<i32>> {
    Employee::find()
        .filter(employee::Column::NationalId.eq(national_id.trim()))
        .one(db)
        .await
        .map(|found| found.map(|e| e.id))
        .map_err(|e| Error::dao(DaoErrorKind::GetId, &dao::table_of::<Employee>(), e))
}

/// Employee by id with its contact.
pub async fn get_full<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<FullEmployee>> {
    full::get_full::<Employee, C>(db, id).await
}

/// Every employee with its contact.
pub async fn get_all_full<C: ConnectionTrait>(db: &C) -> Result<Vec<FullEmployee>> {
    full::get_all_full::<Employee, C>(db).await
}

/// Employees for the given ids with their contacts.
pub async fn get_range_full<C: ConnectionTrait>(db: &C, ids: &[i32]) -> BatchResult<FullEmployee> {
    full::get_range_full::<Employee, C>(db, ids).await
}
