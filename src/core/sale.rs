//! Sale business logic - Checkouts and the products they carry.
//!
//! A sale header lives in `Venda`; each (product, quantity) pair is a row of `VendaProduto`.
//! Writes that touch both tables run in one transaction.

use crate::{
    core::dao::{self, BatchResult},
    entities::{Client, Employee, Product, Sale, SaleItem, product, sale, sale_item},
    errors::{DaoErrorKind, Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, Unchanged,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Header fields of a sale that is about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    /// Client who bought
    pub client_id: i32,
    /// Employee who sold
    pub employee_id: i32,
    /// Total amount charged
    pub total: f64,
    /// Day of the sale
    pub date: NaiveDate,
}

/// One requested line of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleLine {
    /// Product sold
    pub product_id: i32,
    /// Units sold
    pub quantity: i32,
}

/// A product with the quantity sold of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductQuantity {
    /// The product row
    pub product: product::Model,
    /// Units sold
    pub quantity: i32,
}

/// A sale with its lines resolved to products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullSale {
    /// The sale header
    pub sale: sale::Model,
    /// Products and quantities, in insertion order
    pub items: Vec<ProductQuantity>,
}

async fn validate<C: ConnectionTrait>(
    db: &C,
    client_id: i32,
    employee_id: i32,
    total: f64,
) -> Result<()> {
    if !total.is_finite() || total < 0.0 {
        return Err(Error::validation(format!("Invalid sale total: {total}")));
    }
    if dao::get_by_id::<Client, C>(db, client_id).await?.is_none() {
        return Err(Error::validation(format!(
            "Client {client_id} does not exist"
        )));
    }
    if dao::get_by_id::<Employee, C>(db, employee_id).await?.is_none() {
        return Err(Error::validation(format!(
            "Employee {employee_id} does not exist"
        )));
    }
    Ok(())
}

/// Stores a sale header without lines.
pub async fn insert<C: ConnectionTrait>(db: &C, new: &NewSale) -> Result<sale::Model> {
    validate(db, new.client_id, new.employee_id, new.total).await?;
    let model = sale::ActiveModel {
        client_id: Set(new.client_id),
        employee_id: Set(new.employee_id),
        total: Set(new.total),
        date: Set(new.date),
        ..Default::default()
    };
    dao::insert_model(db, model).await
}

/// Stores a sale and all of its lines in one transaction.
///
/// # Errors
/// Returns `Error::Validation` when there are no lines, a quantity is not positive, or the
/// client or employee does not exist, and `Error::ProductNotFound` for an unknown product.
/// Nothing is stored in any of these cases.
pub async fn insert_with_items<C>(
    db: &C,
    new: &NewSale,
    lines: &[SaleLine],
) -> Result<FullSale>
where
    C: ConnectionTrait + TransactionTrait,
{
    if lines.is_empty() {
        return Err(Error::validation("A sale needs at least one product"));
    }
    if let Some(line) = lines.iter().find(|line| line.quantity <= 0) {
        return Err(Error::validation(format!(
            "Invalid quantity {} for product {}",
            line.quantity, line.product_id
        )));
    }

    let origin = dao::table_of::<Sale>();
    let txn = db
        .begin()
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Insert, &origin, e))?;

    let header = insert(&txn, new).await?;
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let product = dao::get_by_id::<Product, _>(&txn, line.product_id)
            .await?
            .ok_or(Error::ProductNotFound {
                id: line.product_id,
            })?;
        let item = sale_item::ActiveModel {
            sale_id: Set(header.id),
            product_id: Set(product.id),
            quantity: Set(line.quantity),
            ..Default::default()
        };
        dao::insert_model(&txn, item).await?;
        items.push(ProductQuantity {
            product,
            quantity: line.quantity,
        });
    }

    txn.commit()
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Insert, &origin, e))?;
    info!(
        "Inserted sale {} with {} item(s), total {}",
        header.id,
        items.len(),
        header.total
    );
    Ok(FullSale {
        sale: header,
        items,
    })
}

/// Replaces the header fields of the sale with `updated.id`. Lines are not touched.
pub async fn update<C: ConnectionTrait>(db: &C, updated: &sale::Model) -> Result<bool> {
    validate(db, updated.client_id, updated.employee_id, updated.total).await?;
    let model = sale::ActiveModel {
        id: Unchanged(updated.id),
        client_id: Set(updated.client_id),
        employee_id: Set(updated.employee_id),
        total: Set(updated.total),
        date: Set(updated.date),
    };
    dao::update_model(db, model).await
}

/// Lines of a sale in insertion order.
pub async fn items_for_sale<C: ConnectionTrait>(
    db: &C,
    sale_id: i32,
) -> Result<Vec<sale_item::Model>> {
    SaleItem::find()
        .filter(sale_item::Column::SaleId.eq(sale_id))
        .order_by_asc(sale_item::Column::Id)
        .all(db)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Query, &dao::table_of::<SaleItem>(), e))
}

/// Sale by id with each line resolved to its product.
pub async fn get_full<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<FullSale>> {
    let Some(header) = dao::get_by_id::<Sale, C>(db, id).await? else {
        return Ok(None);
    };

    let lines = items_for_sale(db, header.id).await?;
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let product = dao::get_by_id::<Product, C>(db, line.product_id)
            .await?
            .ok_or(Error::ProductNotFound {
                id: line.product_id,
            })?;
        items.push(ProductQuantity {
            product,
            quantity: line.quantity,
        });
    }
    debug!("Loaded sale {} with {} item(s)", id, items.len());
    Ok(Some(FullSale {
        sale: header,
        items,
    }))
}

async fn delete_one<C>(db: &C, id: i32) -> Result<bool>
where
    C: ConnectionTrait + TransactionTrait,
{
    let origin = dao::table_of::<Sale>();
    let txn = db
        .begin()
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Delete, &origin, e))?;

    SaleItem::delete_many()
        .filter(sale_item::Column::SaleId.eq(id))
        .exec(&txn)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Delete, &dao::table_of::<SaleItem>(), e))?;
    let result = Sale::delete_by_id(id)
        .exec(&txn)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Delete, &origin, e))?;

    txn.commit()
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Delete, &origin, e))?;
    Ok(result.rows_affected > 0)
}

/// Deletes each sale together with its lines, one transaction per sale.
pub async fn delete_with_items<C>(db: &C, ids: &[i32]) -> BatchResult<i32>
where
    C: ConnectionTrait + TransactionTrait,
{
    let mut batch = BatchResult::default();
    for &id in ids {
        match delete_one(db, id).await {
            Ok(true) => batch.succeeded.push(id),
            Ok(false) => batch.missing.push(id),
            Err(e) => {
                warn!("Delete of sale {} failed: {}", id, e);
                batch.failed.push((id, e));
            }
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::DatabaseConnection;

    async fn header(db: &DatabaseConnection) -> Result<NewSale> {
        let client = create_test_client(db, "Ana", "11122233344").await?;
        let employee = create_test_employee(db, "Bruno", "12345678900").await?;
        Ok(NewSale {
            client_id: client.record.id,
            employee_id: employee.record.id,
            total: 35.0,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        })
    }

    #[tokio::test]
    async fn test_insert_with_items_and_get_full() -> Result<()> {
        let (db, category, supplier) = setup_with_catalog().await?;
        let coffee = create_test_product(&db, "Café", category.id, supplier.record.id).await?;
        let bread = create_test_product(&db, "Pão", category.id, supplier.record.id).await?;
        let new = header(&db).await?;

        let stored = insert_with_items(
            &db,
            &new,
            &[
                SaleLine {
                    product_id: coffee.id,
                    quantity: 2,
                },
                SaleLine {
                    product_id: bread.id,
                    quantity: 1,
                },
            ],
        )
        .await?;

        let fetched = get_full(&db, stored.sale.id).await?.unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.sale.total, 35.0);
        assert_eq!(fetched.items.len(), 2);
        assert_eq!(fetched.items[0].product, coffee);
        assert_eq!(fetched.items[0].quantity, 2);
        assert_eq!(fetched.items[1].product, bread);
        assert_eq!(fetched.items[1].quantity, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_stores_nothing() -> Result<()> {
        let (db, category, supplier) = setup_with_catalog().await?;
        let coffee = create_test_product(&db, "Café", category.id, supplier.record.id).await?;
        let new = header(&db).await?;

        let result = insert_with_items(
            &db,
            &new,
            &[
                SaleLine {
                    product_id: coffee.id,
                    quantity: 1,
                },
                SaleLine {
                    product_id: 404,
                    quantity: 1,
                },
            ],
        )
        .await;

        assert!(matches!(result, Err(Error::ProductNotFound { id: 404 })));
        assert!(dao::get_all::<Sale, _>(&db).await?.is_empty());
        assert!(dao::get_all::<SaleItem, _>(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_line_and_header_validation() -> Result<()> {
        let (db, category, supplier) = setup_with_catalog().await?;
        let coffee = create_test_product(&db, "Café", category.id, supplier.record.id).await?;
        let new = header(&db).await?;

        assert!(matches!(
            insert_with_items(&db, &new, &[]).await,
            Err(Error::Validation { .. })
        ));

        let zero = [SaleLine {
            product_id: coffee.id,
            quantity: 0,
        }];
        assert!(matches!(
            insert_with_items(&db, &new, &zero).await,
            Err(Error::Validation { .. })
        ));

        let mut no_client = new.clone();
        no_client.client_id = 999;
        let one = [SaleLine {
            product_id: coffee.id,
            quantity: 1,
        }];
        assert!(matches!(
            insert_with_items(&db, &no_client, &one).await,
            Err(Error::Validation { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_header() -> Result<()> {
        let db = setup_test_db().await?;
        let new = header(&db).await?;
        let stored = insert(&db, &new).await?;

        let mut changed = stored.clone();
        changed.total = 40.5;
        assert!(update(&db, &changed).await?);
        assert_eq!(
            dao::get_by_id::<Sale, _>(&db, stored.id).await?.unwrap().total,
            40.5
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_with_items_removes_lines() -> Result<()> {
        let (db, category, supplier) = setup_with_catalog().await?;
        let coffee = create_test_product(&db, "Café", category.id, supplier.record.id).await?;
        let new = header(&db).await?;
        let stored = insert_with_items(
            &db,
            &new,
            &[SaleLine {
                product_id: coffee.id,
                quantity: 3,
            }],
        )
        .await?;

        let batch = delete_with_items(&db, &[stored.sale.id, 8080]).await;

        assert_eq!(batch.succeeded, vec![stored.sale.id]);
        assert_eq!(batch.missing, vec![8080]);
        assert!(items_for_sale(&db, stored.sale.id).await?.is_empty());
        assert!(get_full(&db, stored.sale.id).await?.is_none());
        Ok(())
    }
}
