//! Product business logic - Stocked items, their category and supplier.
//!
//! Writes check that the referenced category and supplier exist before storing.

use crate::{
    core::dao,
    entities::{Category, Product, Supplier, product},
    errors::{DaoErrorKind, Error, Result},
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set, Unchanged};

/// Fields of a product that is about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Name of the product
    pub name: String,
    /// Category it is listed under
    pub category_id: i32,
    /// Supplier it is bought from
    pub supplier_id: i32,
    /// Units in stock
    pub stock: i32,
    /// Unit price
    pub price: f64,
}

async fn validate<C: ConnectionTrait>(
    db: &C,
    name: &str,
    category_id: i32,
    supplier_id: i32,
    stock: i32,
    price: f64,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Product name cannot be empty"));
    }
    if stock < 0 {
        return Err(Error::validation(format!(
            "Product stock cannot be negative: {stock}"
        )));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(Error::validation(format!("Invalid product price: {price}")));
    }
    if dao::get_by_id::<Category, C>(db, category_id).await?.is_none() {
        return Err(Error::validation(format!(
            "Category {category_id} does not exist"
        )));
    }
    if dao::get_by_id::<Supplier, C>(db, supplier_id).await?.is_none() {
        return Err(Error::validation(format!(
            "Supplier {supplier_id} does not exist"
        )));
    }
    Ok(())
}

/// Stores a product and returns it with its generated id.
///
/// # Errors
/// Returns `Error::Validation` if the name is empty, the stock is negative, the price is
/// negative or not finite, or the category or supplier does not exist.
pub async fn insert<C: ConnectionTrait>(db: &C, new: &NewProduct) -> Result<product::Model> {
    validate(
        db,
        &new.name,
        new.category_id,
        new.supplier_id,
        new.stock,
        new.price,
    )
    .await?;

    let model = product::ActiveModel {
        name: Set(new.name.trim().to_string()),
        category_id: Set(new.category_id),
        supplier_id: Set(new.supplier_id),
        stock: Set(new.stock),
        price: Set(new.price),
        ..Default::default()
    };
    dao::insert_model(db, model).await
}

/// Replaces every field of the product with `updated.id`.
pub async fn update<C: ConnectionTrait>(db: &C, updated: &product::Model) -> Result<bool> {
    validate(
        db,
        &updated.name,
        updated.category_id,
        updated.supplier_id,
        updated.stock,
        updated.price,
    )
    .await?;

    let model = product::ActiveModel {
        id: Unchanged(updated.id),
        name: Set(updated.name.trim().to_string()),
        category_id: Set(updated.category_id),
        supplier_id: Set(updated.supplier_id),
        stock: Set(updated.stock),
        price: Set(updated.price),
    };
    dao::update_model(db, model).await
}

/// Products of a category, ordered alphabetically by name.
pub async fn find_by_category<C: ConnectionTrait>(
    db: &C,
    category_id: i32,
) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Query, &dao::table_of::<Product>(), e))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::category;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_insert_validation() -> Result<()> {
        let (db, category, supplier) = setup_with_catalog().await?;
        let valid = NewProduct {
            name: "Café 500g".to_string(),
            category_id: category.id,
            supplier_id: supplier.record.id,
            stock: 10,
            price: 18.9,
        };

        let mut empty_name = valid.clone();
        empty_name.name = "  ".to_string();
        assert!(matches!(
            insert(&db, &empty_name).await,
            Err(Error::Validation { .. })
        ));

        let mut negative_stock = valid.clone();
        negative_stock.stock = -1;
        assert!(matches!(
            insert(&db, &negative_stock).await,
            Err(Error::Validation { .. })
        ));

        let mut nan_price = valid.clone();
        nan_price.price = f64::NAN;
        assert!(matches!(
            insert(&db, &nan_price).await,
            Err(Error::Validation { .. })
        ));

        let mut unknown_category = valid.clone();
        unknown_category.category_id = 999;
        assert!(matches!(
            insert(&db, &unknown_category).await,
            Err(Error::Validation { .. })
        ));

        let mut unknown_supplier = valid;
        unknown_supplier.supplier_id = 999;
        assert!(matches!(
            insert(&db, &unknown_supplier).await,
            Err(Error::Validation { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_then_get_by_id() -> Result<()> {
        let (db, category, supplier) = setup_with_catalog().await?;
        let stored = create_test_product(&db, "Café 500g", category.id, supplier.record.id).await?;

        let fetched = dao::get_by_id::<Product, _>(&db, stored.id).await?.unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.price, 10.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_product() -> Result<()> {
        let (db, category, supplier) = setup_with_catalog().await?;
        let stored = create_test_product(&db, "Café 500g", category.id, supplier.record.id).await?;

        let mut changed = stored.clone();
        changed.stock = 3;
        changed.price = 21.5;
        assert!(update(&db, &changed).await?);

        let fetched = dao::get_by_id::<Product, _>(&db, stored.id).await?.unwrap();
        assert_eq!(fetched.stock, 3);
        assert_eq!(fetched.price, 21.5);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_category_sorted() -> Result<()> {
        let (db, drinks, supplier) = setup_with_catalog().await?;
        let snacks = category::insert(&db, "Salgados").await?;
        create_test_product(&db, "Suco", drinks.id, supplier.record.id).await?;
        create_test_product(&db, "Agua", drinks.id, supplier.record.id).await?;
        create_test_product(&db, "Coxinha", snacks.id, supplier.record.id).await?;

        let names: Vec<String> = find_by_category(&db, drinks.id)
            .await?
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Agua".to_string(), "Suco".to_string()]);
        Ok(())
    }
}
