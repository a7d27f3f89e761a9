//! Sale registration and lookup

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::{aggregate_line_quantities, SaleItemRequest};
use shared::validation::validate_sale_items;

/// Sale service for registering sales and reading back their lines
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

/// One line of a sale as shown to the caller
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SaleLineView {
    pub nombre: String,
    pub cantidad: i32,
    pub costo: Decimal,
}

/// Total amount of a sale
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SaleTotal {
    pub total: Decimal,
}

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a sale and decrement stock for every requested line
    ///
    /// The sale header, the stock decrements and the line snapshots all
    /// ride one transaction. Stock is taken with a guarded batched
    /// update; when any product is missing or short the affected count
    /// falls below the distinct product count and the whole sale rolls
    /// back, leaving every stock level untouched.
    pub async fn register_sale(
        &self,
        client_id: i32,
        items: &[SaleItemRequest],
    ) -> AppResult<i32> {
        validate_sale_items(items).map_err(|msg| AppError::Validation(msg.to_string()))?;

        let mut tx = self.db.begin().await?;

        let sale_id =
            sqlx::query_scalar::<_, i32>("INSERT INTO sales (client_id) VALUES ($1) RETURNING id")
                .bind(client_id)
                .fetch_one(&mut *tx)
                .await?;

        // Duplicate lines for one product must decrement as a single
        // combined quantity; the update touches each product row once.
        let aggregated = aggregate_line_quantities(items);
        let product_ids: Vec<i32> = aggregated.iter().map(|&(id, _)| id).collect();
        let quantities: Vec<i64> = aggregated.iter().map(|&(_, qty)| qty).collect();

        let decremented = sqlx::query(
            r#"
            UPDATE products p
            SET stock = p.stock - d.quantity::int4
            FROM (SELECT UNNEST($1::int4[]) AS id, UNNEST($2::int8[]) AS quantity) d
            WHERE p.id = d.id
              AND p.stock >= d.quantity
            "#,
        )
        .bind(&product_ids)
        .bind(&quantities)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() != product_ids.len() as u64 {
            tx.rollback().await?;
            return Err(AppError::InsufficientStock);
        }

        let line_product_ids: Vec<i32> = items.iter().map(|item| item.producto_id).collect();
        let line_quantities: Vec<i32> = items.iter().map(|item| item.cantidad).collect();

        // Snapshot the current catalog price onto each line; ordinality
        // keeps the lines in request order.
        sqlx::query(
            r#"
            INSERT INTO sale_lines (sale_id, product_id, quantity, unit_price)
            SELECT $1, d.product_id, d.quantity, p.price
            FROM UNNEST($2::int4[], $3::int4[]) WITH ORDINALITY AS d(product_id, quantity, ord)
            JOIN products p ON p.id = d.product_id
            ORDER BY d.ord
            "#,
        )
        .bind(sale_id)
        .bind(&line_product_ids)
        .bind(&line_quantities)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            "Registered sale {} for client {} with {} lines",
            sale_id,
            client_id,
            items.len()
        );

        Ok(sale_id)
    }

    /// List the lines of a sale with product names and snapshot prices
    pub async fn get_sale_products(&self, sale_id: i32) -> AppResult<Vec<SaleLineView>> {
        sqlx::query_scalar::<_, i32>("SELECT id FROM sales WHERE id = $1")
            .bind(sale_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("sale".to_string()))?;

        let lines = sqlx::query_as::<_, SaleLineView>(
            r#"
            SELECT p.name AS nombre, sl.quantity AS cantidad, sl.unit_price AS costo
            FROM sale_lines sl
            JOIN products p ON p.id = sl.product_id
            WHERE sl.sale_id = $1
            ORDER BY sl.id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.db)
        .await?;

        Ok(lines)
    }

    /// Total of a sale computed from its line snapshots
    pub async fn get_sale_total(&self, sale_id: i32) -> AppResult<SaleTotal> {
        let total = sqlx::query_as::<_, SaleTotal>(
            r#"
            SELECT COALESCE(SUM(sl.unit_price * sl.quantity), 0) AS total
            FROM sales s
            LEFT JOIN sale_lines sl ON sl.sale_id = s.id
            WHERE s.id = $1
            GROUP BY s.id
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("sale".to_string()))?;

        Ok(total)
    }
}
