//! Generic data-access operations shared by every entity.
//!
//! Each function is parameterised by the SeaORM entity it works on and accepts any
//! [`ConnectionTrait`], so the same call runs against a plain connection or inside an
//! open transaction. Every underlying [`sea_orm::DbErr`] is wrapped into
//! [`Error::Dao`] carrying the failed step and the table name.

use crate::errors::{DaoErrorKind, Error, Result};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait, QuerySelect, Schema,
    sea_query::{Expr, Table},
};
use tracing::{debug, info, warn};

/// Outcome of an operation applied to several ids, one id at a time.
///
/// Nothing is dropped: every requested id ends up in exactly one of the three lists.
#[derive(Debug)]
pub struct BatchResult<T> {
    /// Items the operation succeeded for, in request order
    pub succeeded: Vec<T>,
    /// Ids that matched no row
    pub missing: Vec<i32>,
    /// Ids whose operation failed, with the failure
    pub failed: Vec<(i32, Error)>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            missing: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    /// True when every requested id succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.failed.is_empty()
    }

    /// Discards the per-id report and keeps the successful items.
    #[must_use]
    pub fn into_succeeded(self) -> Vec<T> {
        self.succeeded
    }
}

/// Name of the table backing `E`, used as the error origin.
pub(crate) fn table_of<E: EntityTrait>() -> String {
    E::default().table_name().to_string()
}

/// Creates the table for `E` and its indexes if they do not exist yet.
pub async fn create_table<E, C>(db: &C) -> Result<bool>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let origin = table_of::<E>();
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(E::default());
    table.if_not_exists();
    db.execute(backend.build(&table))
        .await
        .map_err(|e| Error::dao(DaoErrorKind::CreateTable, &origin, e))?;

    for mut index in schema.create_index_from_entity(E::default()) {
        index.if_not_exists();
        db.execute(backend.build(&index))
            .await
            .map_err(|e| Error::dao(DaoErrorKind::CreateTable, &origin, e))?;
    }

    debug!("Table {} ensured", origin);
    Ok(true)
}

/// Drops the table for `E` if it exists.
pub async fn drop_table<E, C>(db: &C) -> Result<bool>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let origin = table_of::<E>();
    let backend = db.get_database_backend();
    let statement = Table::drop().table(E::default()).if_exists().to_owned();
    db.execute(backend.build(&statement))
        .await
        .map_err(|e| Error::dao(DaoErrorKind::DropTable, &origin, e))?;
    info!("Dropped table {}", origin);
    Ok(true)
}

/// Fetches one row by primary key, `None` when no row has that id.
pub async fn get_by_id<E, C>(db: &C, id: i32) -> Result<Option<E::Model>>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Query, &table_of::<E>(), e))
}

/// Fetches every row of the table. Row order is whatever the database returns.
pub async fn get_all<E, C>(db: &C) -> Result<Vec<E::Model>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    E::find()
        .all(db)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Query, &table_of::<E>(), e))
}

/// Looks up each id in turn. A failing lookup is recorded and the batch goes on.
pub async fn get_by_ids<E, C>(db: &C, ids: &[i32]) -> BatchResult<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let mut batch = BatchResult::default();
    for &id in ids {
        match get_by_id::<E, C>(db, id).await {
            Ok(Some(model)) => batch.succeeded.push(model),
            Ok(None) => batch.missing.push(id),
            Err(e) => {
                warn!("Lookup of id {} failed: {}", id, e);
                batch.failed.push((id, e));
            }
        }
    }
    batch
}

/// Deletes each id in turn, reporting which ids matched a row.
pub async fn delete<E, C>(db: &C, ids: &[i32]) -> BatchResult<i32>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let origin = table_of::<E>();
    let mut batch = BatchResult::default();
    for &id in ids {
        match E::delete_by_id(id).exec(db).await {
            Ok(result) if result.rows_affected > 0 => batch.succeeded.push(id),
            Ok(_) => batch.missing.push(id),
            Err(e) => {
                warn!("Delete of {} id {} failed: {}", origin, id, e);
                batch
                    .failed
                    .push((id, Error::dao(DaoErrorKind::Delete, &origin, e)));
            }
        }
    }
    info!(
        "Deleted {} row(s) from {} ({} missing, {} failed)",
        batch.succeeded.len(),
        origin,
        batch.missing.len(),
        batch.failed.len()
    );
    batch
}

/// Highest id currently in the table, 0 when the table is empty.
///
/// Not tied to any particular insert: other writers may have inserted since.
/// Inserts in this crate return their generated id directly.
pub async fn last_inserted_id<E, C>(db: &C) -> Result<i32>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let origin = table_of::<E>();
    let key = E::PrimaryKey::iter()
        .next()
        .ok_or_else(|| Error::dao(DaoErrorKind::GetId, &origin, "table has no primary key"))?
        .into_column();

    let max: Option<Option<i32>> = E::find()
        .select_only()
        .column_as(Expr::col(key).max(), "max_id")
        .into_tuple()
        .one(db)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::GetId, &origin, e))?;

    Ok(max.flatten().unwrap_or(0))
}

/// Inserts a prepared active model and returns the stored row with its generated id.
pub(crate) async fn insert_model<'a, A, C>(
    db: &'a C,
    model: A,
) -> Result<<A::Entity as EntityTrait>::Model>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'a,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    model
        .insert(db)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Insert, &table_of::<A::Entity>(), e))
}

/// Applies an update by id. `false` when no row carries that id.
pub(crate) async fn update_model<'a, A, C>(db: &'a C, model: A) -> Result<bool>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'a,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    match model.update(db).await {
        Ok(_) => Ok(true),
        Err(DbErr::RecordNotUpdated) => Ok(false),
        Err(e) => Err(Error::dao(
            DaoErrorKind::Update,
            &table_of::<A::Entity>(),
            e,
        )),
    }
}
