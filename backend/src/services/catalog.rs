//! Category and supplier lookups

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;

/// Catalog service for the reference tables backing products
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Reference table entry
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CatalogEntry {
    pub id: i32,
    pub nombre: String,
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all product categories
    pub async fn list_categories(&self) -> AppResult<Vec<CatalogEntry>> {
        let categories =
            sqlx::query_as::<_, CatalogEntry>("SELECT id, name AS nombre FROM categories ORDER BY id")
                .fetch_all(&self.db)
                .await?;

        Ok(categories)
    }

    /// List all suppliers
    pub async fn list_suppliers(&self) -> AppResult<Vec<CatalogEntry>> {
        let suppliers =
            sqlx::query_as::<_, CatalogEntry>("SELECT id, name AS nombre FROM suppliers ORDER BY id")
                .fetch_all(&self.db)
                .await?;

        Ok(suppliers)
    }
}
