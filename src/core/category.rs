//! Category business logic.

use crate::{
    core::dao,
    entities::{Category, category},
    errors::{DaoErrorKind, Error, Result},
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, Unchanged};

/// Stores a category and returns it with its generated id.
pub async fn insert<C: ConnectionTrait>(db: &C, name: &str) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Category name cannot be empty"));
    }
    let model = category::ActiveModel {
        name: Set(name.trim().to_string()),
        ..Default::default()
    };
    dao::insert_model(db, model).await
}

/// Renames the category with `updated.id`.
pub async fn update<C: ConnectionTrait>(db: &C, updated: &category::Model) -> Result<bool> {
    if updated.name.trim().is_empty() {
        return Err(Error::validation("Category name cannot be empty"));
    }
    let model = category::ActiveModel {
        id: Unchanged(updated.id),
        name: Set(updated.name.trim().to_string()),
    };
    dao::update_model(db, model).await
}

/// Category with exactly this name, if any.
pub async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Query, &dao::table_of::<Category>(), e))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_insert_update_find() -> Result<()> {
        let db = setup_test_db().await?;
        let drinks = insert(&db, " Bebidas ").await?;
        assert_eq!(drinks.name, "Bebidas");

        let renamed = category::Model {
            id: drinks.id,
            name: "Bebidas Geladas".to_string(),
        };
        assert!(update(&db, &renamed).await?);

        assert!(find_by_name(&db, "Bebidas").await?.is_none());
        assert_eq!(find_by_name(&db, "Bebidas Geladas").await?, Some(renamed));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_name_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            insert(&db, "").await,
            Err(Error::Validation { .. })
        ));
        Ok(())
    }
}
