//! Category and supplier HTTP handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::catalog::{CatalogEntry, CatalogService};
use crate::AppState;

/// List product categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<CatalogEntry>>> {
    let service = CatalogService::new(state.db.clone());
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// List suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<Json<Vec<CatalogEntry>>> {
    let service = CatalogService::new(state.db.clone());
    let suppliers = service.list_suppliers().await?;
    Ok(Json(suppliers))
}
