//! Sale registration and lookup HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::models::{RegisterSaleRequest, RegisterSaleResponse};
use crate::services::sale::{SaleLineView, SaleService, SaleTotal};
use crate::AppState;

/// Register a sale, decrementing stock for every line
pub async fn register_sale(
    State(state): State<AppState>,
    Json(payload): Json<RegisterSaleRequest>,
) -> AppResult<(StatusCode, Json<RegisterSaleResponse>)> {
    let service = SaleService::new(state.db.clone());
    let sale_id = service
        .register_sale(payload.cliente_id, &payload.productos)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterSaleResponse {
            message: "sale registered and stock updated".to_string(),
            venta_id: sale_id,
        }),
    ))
}

/// List the lines of a sale
pub async fn get_sale_products(
    State(state): State<AppState>,
    Path(sale_id): Path<i32>,
) -> AppResult<Json<Vec<SaleLineView>>> {
    let service = SaleService::new(state.db.clone());
    let lines = service.get_sale_products(sale_id).await?;
    Ok(Json(lines))
}

/// Total amount of a sale
pub async fn get_sale_total(
    State(state): State<AppState>,
    Path(sale_id): Path<i32>,
) -> AppResult<Json<SaleTotal>> {
    let service = SaleService::new(state.db.clone());
    let total = service.get_sale_total(sale_id).await?;
    Ok(Json(total))
}
