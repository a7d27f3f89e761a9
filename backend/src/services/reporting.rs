//! Sales and inventory reporting with CSV export

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Sales report entry, one row per matching sale
#[derive(Debug, Serialize, FromRow)]
pub struct SalesReportRow {
    pub venta_id: i32,
    pub fecha: DateTime<Utc>,
    pub cliente: String,
    pub total: Decimal,
}

/// Inventory report entry for a product with recorded sales
#[derive(Debug, Serialize, FromRow)]
pub struct InventoryReportRow {
    pub id: i32,
    pub nombre: String,
    pub cantidad_comprada: i64,
}

/// Sales report filter parameters
#[derive(Debug, Default, Deserialize)]
pub struct SalesReportFilter {
    pub fecha: Option<NaiveDate>,
    pub cliente: Option<String>,
    pub producto: Option<String>,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Sales report with optional date, client and product filters
    ///
    /// Name filters match case-insensitive substrings. With a product
    /// filter the reported total covers the matching lines only, not
    /// the whole sale.
    pub async fn sales_report(&self, filter: &SalesReportFilter) -> AppResult<Vec<SalesReportRow>> {
        let rows = sqlx::query_as::<_, SalesReportRow>(
            r#"
            SELECT s.id AS venta_id, s.sold_at AS fecha, c.name AS cliente,
                   SUM(sl.unit_price * sl.quantity) AS total
            FROM sales s
            JOIN clients c ON c.id = s.client_id
            JOIN sale_lines sl ON sl.sale_id = s.id
            JOIN products p ON p.id = sl.product_id
            WHERE ($1::date IS NULL OR s.sold_at::date = $1)
              AND ($2::text IS NULL OR c.name ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR p.name ILIKE '%' || $3 || '%')
            GROUP BY s.id, s.sold_at, c.name
            ORDER BY s.id
            "#,
        )
        .bind(filter.fecha)
        .bind(&filter.cliente)
        .bind(&filter.producto)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Inventory report of quantities sold per product
    ///
    /// Products without any recorded sale are not listed.
    pub async fn inventory_report(&self) -> AppResult<Vec<InventoryReportRow>> {
        let rows = sqlx::query_as::<_, InventoryReportRow>(
            r#"
            SELECT p.id, p.name AS nombre, SUM(sl.quantity) AS cantidad_comprada
            FROM products p
            JOIN sale_lines sl ON sl.product_id = p.id
            GROUP BY p.id, p.name
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}
