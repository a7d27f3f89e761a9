//! Reporting HTTP handlers for sales search and inventory export

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::reporting::{ReportingService, SalesReportFilter};
use crate::AppState;
use shared::ReportFormat;

#[derive(Deserialize)]
pub struct SalesReportQuery {
    pub fecha: Option<String>,
    pub cliente: Option<String>,
    pub producto: Option<String>,
    pub format: Option<ReportFormat>,
}

#[derive(Deserialize)]
pub struct InventoryReportQuery {
    pub format: Option<ReportFormat>,
}

/// Sales report filtered by date, client or product
pub async fn get_sales_report(
    State(state): State<AppState>,
    Query(query): Query<SalesReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db.clone());

    let filter = SalesReportFilter {
        fecha: query.fecha.and_then(|s| s.parse().ok()),
        cliente: query.cliente,
        producto: query.producto,
    };

    let rows = service.sales_report(&filter).await?;

    if query.format == Some(ReportFormat::Csv) {
        let csv = ReportingService::export_to_csv(&rows)?;
        Ok((
            [
                (header::CONTENT_TYPE, ReportFormat::Csv.content_type()),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"ventas.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(rows).into_response())
    }
}

/// Quantities sold per product
pub async fn get_inventory_report(
    State(state): State<AppState>,
    Query(query): Query<InventoryReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db.clone());

    let rows = service.inventory_report().await?;

    if query.format == Some(ReportFormat::Csv) {
        let csv = ReportingService::export_to_csv(&rows)?;
        Ok((
            [
                (header::CONTENT_TYPE, ReportFormat::Csv.content_type()),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"inventario.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(rows).into_response())
    }
}
