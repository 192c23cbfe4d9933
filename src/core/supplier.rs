//! Supplier business logic - Companies products are bought from.

use crate::{
    core::{
        contact::{self, NewContact},
        dao::{self, BatchResult},
        full::{self, Full},
    },
    entities::{Supplier, supplier},
    errors::{DaoErrorKind, Error, Result},
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
    TransactionTrait, Unchanged,
};
use tracing::info;

/// A supplier together with its contact.
pub type FullSupplier = Full<supplier::Model>;

/// Fields of a supplier that is about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupplier {
    /// Company name
    pub name: String,
    /// Tax id (CNPJ)
    pub tax_id: String,
    /// Person answering for the supplier
    pub responsible: String,
}

fn validate(name: &str, tax_id: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Supplier name cannot be empty"));
    }
    if tax_id.trim().is_empty() {
        return Err(Error::validation("Supplier tax id cannot be empty"));
    }
    Ok(())
}

/// Stores a supplier linked to an existing contact.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    new: &NewSupplier,
    contact_id: i32,
) -> Result<supplier::Model> {
    validate(&new.name, &new.tax_id)?;
    let model = supplier::ActiveModel {
        name: Set(new.name.trim().to_string()),
        tax_id: Set(new.tax_id.trim().to_string()),
        responsible: Set(new.responsible.trim().to_string()),
        contact_id: Set(contact_id),
        ..Default::default()
    };
    dao::insert_model(db, model).await
}

/// Stores a contact and the supplier owning it in one transaction.
pub async fn insert_with_contact<C>(
    db: &C,
    new: &NewSupplier,
    new_contact: &NewContact,
) -> Result<FullSupplier>
where
    C: ConnectionTrait + TransactionTrait,
{
    validate(&new.name, &new.tax_id)?;
    let origin = dao::table_of::<Supplier>();
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
        "Inserted supplier {} ({}) with contact {}",
        record.id, record.tax_id, contact.id
    );
    Ok(Full { record, contact })
}

/// Replaces name, tax id and responsible person of the supplier with `updated.id`.
pub async fn update<C: ConnectionTrait>(db: &C, updated: &supplier::Model) -> Result<bool> {
    validate(&updated.name, &updated.tax_id)?;
    let model = supplier::ActiveModel {
        id: Unchanged(updated.id),
        name: Set(updated.name.trim().to_string()),
        tax_id: Set(updated.tax_id.trim().to_string()),
        responsible: Set(updated.responsible.trim().to_string()),
        contact_id: NotSet,
    };
    dao::update_model(db, model).await
}

/// Supplier with this tax id, if any.
pub async fn find_by_tax_id<C: ConnectionTrait>(
    db: &C,
    tax_id: &str,
) -> Result<Option<supplier::Model>> {
    Supplier::find()
        .filter(supplier::Column::TaxId.eq(tax_id.trim()))
        .one(db)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Query, &dao::table_of::<Supplier>(), e))
}

/// Supplier by id with its contact.
pub async fn get_full<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<FullSupplier>> {
    full::get_full::<Supplier, C>(db, id).await
}

/// Every supplier with its contact.
pub async fn get_all_full<C: ConnectionTrait>(db: &C) -> Result<Vec<FullSupplier>> {
    full::get_all_full::<Supplier, C>(db).await
}

/// Suppliers for the given ids with their contacts.
pub async fn get_range_full<C: ConnectionTrait>(
    db: &C,
    ids: &[i32],
) -> BatchResult<FullSupplier> {
    full::get_range_full::<Supplier, C>(db, ids).await
}
