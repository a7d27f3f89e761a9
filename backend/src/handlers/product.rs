//! Product catalog HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::product::{
    CreateProductInput, ProductListRow, ProductService, UpdateProductInput,
};
use crate::AppState;
use shared::StatusMessage;

/// List all products with category and supplier names
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductListRow>>> {
    let service = ProductService::new(state.db.clone());
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Add a product to the catalog
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<StatusMessage>)> {
    let service = ProductService::new(state.db.clone());
    service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(StatusMessage::new("product added"))))
}

/// Update a product's editable fields
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<StatusMessage>> {
    let service = ProductService::new(state.db.clone());
    service.update_product(product_id, input).await?;
    Ok(Json(StatusMessage::new("product updated")))
}

/// Delete a product and the sales that reference it
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<StatusMessage>> {
    let service = ProductService::new(state.db.clone());
    service.delete_product(product_id).await?;
    Ok(Json(StatusMessage::new("product deleted")))
}
