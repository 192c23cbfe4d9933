//! Client business logic - Buyers and their contacts.

use crate::{
    core::{
        contact::{self, NewContact},
        dao::{self, BatchResult},
        full::{self, Full},
    },
    entities::{Client, client},
    errors::{DaoErrorKind, Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
    TransactionTrait, Unchanged,
};
use tracing::info;

/// A client together with its contact.
pub type FullClient = Full<client::Model>;

/// Fields of a client that is about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    /// Full name
    pub name: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// National id (CPF)
    pub national_id: String,
    /// E-mail address
    pub email: String,
}

fn validate(name: &str, national_id: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Client name cannot be empty"));
    }
    if national_id.trim().is_empty() {
        return Err(Error::validation("Client national id cannot be empty"));
    }
    Ok(())
}

/// Stores a client linked to an existing contact.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    new: &NewClient,
    contact_id: i32,
) -> Result<client::Model> {
    validate(&new.name, &new.national_id)?;
    let model = client::ActiveModel {
        name: Set(new.name.trim().to_string()),
        birth_date: Set(new.birth_date),
        national_id: Set(new.national_id.trim().to_string()),
        email: Set(new.email.trim().to_string()),
        contact_id: Set(contact_id),
        ..Default::default()
    };
    dao::insert_model(db, model).await
}

/// Stores a contact and the client owning it in one transaction.
pub async fn insert_with_contact<C>(
    db: &C,
    new: &NewClient,
    new_contact: &NewContact,
) -> Result<FullClient>
where
    C: ConnectionTrait + TransactionTrait,
{
    validate(&new.name, &new.national_id)?;
    let origin = dao::table_of::<Client>();
    let txn = db
        .begin()
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Insert, &origin, e))?;

    let contact = contact::insert(&txn, new_contact).await?;
    let record = insert(&txn, new, contact.id).await?;

    txn.commit()
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Insert, &origin, e))?;
    info!("Inserted client {} with contact {}", record.id, contact.id);
    Ok(Full { record, contact })
}

/// Replaces the personal fields of the client with `updated.id`. The contact link is kept.
pub async fn update<C: ConnectionTrait>(db: &C, updated: &client::Model) -> Result<bool> {
    validate(&updated.name, &updated.national_id)?;
    let model = client::ActiveModel {
        id: Unchanged(updated.id),
        name: Set(updated.name.trim().to_string()),
        birth_date: Set(updated.birth_date),
        national_id: Set(updated.national_id.trim().to_string()),
        email: Set(updated.email.trim().to_string()),
        contact_id: NotSet,
    };
    dao::update_model(db, model).await
}

/// Client with this national id, if any.
pub async fn find_by_national_id<C: ConnectionTrait>(
    db: &C,
    national_id: &str,
) -> Result<Option<client::Model>> {
    Client::find()
        .filter(client::Column::NationalId.eq(national_id.trim()))
        .one(db)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Query, &dao::table_of::<Client>(), e))
}

/// Client by id with its contact.
pub async fn get_full<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<FullClient>> {
    full::get_full::<Client, C>(db, id).await
}

/// Every client with its contact.
pub async fn get_all_full<C: ConnectionTrait>(db: &C) -> Result<Vec<FullClient>> {
    full::get_all_full::<Client, C>(db).await
}

/// Clients for the given ids with their contacts.
pub async fn get_range_full<C: ConnectionTrait>(db: &C, ids: &[i32]) -> BatchResult<FullClient> {
    full::get_range_full::<Client, C>(db, ids).await
}
