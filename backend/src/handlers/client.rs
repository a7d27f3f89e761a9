//! Client registry HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::client::{Client, ClientInput, ClientPurchase, ClientService};
use crate::AppState;
use shared::StatusMessage;

/// List all clients
pub async fn list_clients(State(state): State<AppState>) -> AppResult<Json<Vec<Client>>> {
    let service = ClientService::new(state.db.clone());
    let clients = service.list_clients().await?;
    Ok(Json(clients))
}

/// Get a single client
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> AppResult<Json<Client>> {
    let service = ClientService::new(state.db.clone());
    let client = service.get_client(client_id).await?;
    Ok(Json(client))
}

/// Register a new client
pub async fn create_client(
    State(state): State<AppState>,
    Json(input): Json<ClientInput>,
) -> AppResult<(StatusCode, Json<StatusMessage>)> {
    let service = ClientService::new(state.db.clone());
    service.create_client(input).await?;
    Ok((StatusCode::CREATED, Json(StatusMessage::new("client added"))))
}

/// Update a client's contact details
pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
    Json(input): Json<ClientInput>,
) -> AppResult<Json<StatusMessage>> {
    let service = ClientService::new(state.db.clone());
    service.update_client(client_id, input).await?;
    Ok(Json(StatusMessage::new("client updated")))
}

/// Delete a client
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> AppResult<Json<StatusMessage>> {
    let service = ClientService::new(state.db.clone());
    service.delete_client(client_id).await?;
    Ok(Json(StatusMessage::new("client deleted")))
}

/// Purchase history for a client
pub async fn get_client_purchases(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> AppResult<Json<Vec<ClientPurchase>>> {
    let service = ClientService::new(state.db.clone());
    let purchases = service.purchase_history(client_id).await?;
    Ok(Json(purchases))
}
