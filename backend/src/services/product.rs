//! Product catalog service

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use shared::validation::{validate_name, validate_price, validate_stock};

/// Product service for catalog maintenance
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Product row joined with its category and supplier names
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductListRow {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub stock: i32,
    pub proveedor: String,
    pub fecha_ingreso: Option<NaiveDate>,
    pub categoria: String,
}

/// Input for creating a product
///
/// The caller assigns the id; `categoria` and `proveedor` carry the
/// referenced catalog ids.
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub categoria: i32,
    pub precio: Decimal,
    pub stock: i32,
    pub proveedor: i32,
    pub fecha_ingreso: Option<NaiveDate>,
}

/// Input for updating a product
///
/// Category and supplier assignments are fixed at creation time.
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub stock: i32,
    pub fecha_ingreso: Option<NaiveDate>,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all products with category and supplier names
    pub async fn list_products(&self) -> AppResult<Vec<ProductListRow>> {
        let products = sqlx::query_as::<_, ProductListRow>(
            r#"
            SELECT p.id, p.name AS nombre, p.description AS descripcion, p.price AS precio,
                   p.stock, s.name AS proveedor, p.entry_date AS fecha_ingreso,
                   c.name AS categoria
            FROM products p
            JOIN categories c ON c.id = p.category_id
            JOIN suppliers s ON s.id = p.supplier_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Create a product with a caller-assigned id
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<()> {
        validate_name(&input.nombre).map_err(|msg| AppError::Validation(msg.to_string()))?;
        validate_price(input.precio).map_err(|msg| AppError::Validation(msg.to_string()))?;
        validate_stock(input.stock).map_err(|msg| AppError::Validation(msg.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, category_id, price, stock, supplier_id, entry_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(input.id)
        .bind(&input.nombre)
        .bind(&input.descripcion)
        .bind(input.categoria)
        .bind(input.precio)
        .bind(input.stock)
        .bind(input.proveedor)
        .bind(input.fecha_ingreso)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Update a product's editable fields
    pub async fn update_product(&self, product_id: i32, input: UpdateProductInput) -> AppResult<()> {
        validate_name(&input.nombre).map_err(|msg| AppError::Validation(msg.to_string()))?;
        validate_price(input.precio).map_err(|msg| AppError::Validation(msg.to_string()))?;
        validate_stock(input.stock).map_err(|msg| AppError::Validation(msg.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, description = $2, price = $3, stock = $4, entry_date = $5
            WHERE id = $6
            "#,
        )
        .bind(&input.nombre)
        .bind(&input.descripcion)
        .bind(input.precio)
        .bind(input.stock)
        .bind(input.fecha_ingreso)
        .bind(product_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("product".to_string()));
        }

        Ok(())
    }

    /// Delete a product together with the sales that reference it
    ///
    /// Every sale holding a line for this product is removed first (its
    /// lines go via the cascade), so the product row has no remaining
    /// references. Both deletes commit together or not at all.
    pub async fn delete_product(&self, product_id: i32) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query(
            "DELETE FROM sales WHERE id IN (SELECT sale_id FROM sale_lines WHERE product_id = $1)",
        )
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("product".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }
}
