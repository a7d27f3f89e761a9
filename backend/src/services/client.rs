//! Client registry and purchase history

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use shared::validation::validate_name;

/// Client service for registry maintenance and purchase history
#[derive(Clone)]
pub struct ClientService {
    db: PgPool,
}

/// Client record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Client {
    pub id: i32,
    pub nombre: String,
    pub contacto: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
}

/// Input for creating or updating a client
#[derive(Debug, Deserialize)]
pub struct ClientInput {
    pub nombre: String,
    pub contacto: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
}

/// One completed sale in a client's purchase history
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ClientPurchase {
    pub venta_id: i32,
    pub fecha: DateTime<Utc>,
    pub total: Decimal,
}

impl ClientService {
    /// Create a new ClientService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all clients
    pub async fn list_clients(&self) -> AppResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name AS nombre, contact AS contacto, address AS direccion,
                   phone AS telefono, email AS correo
            FROM clients
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(clients)
    }

    /// Look up a single client by id
    pub async fn get_client(&self, client_id: i32) -> AppResult<Client> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name AS nombre, contact AS contacto, address AS direccion,
                   phone AS telefono, email AS correo
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(client_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("client".to_string()))?;

        Ok(client)
    }

    /// Register a new client
    pub async fn create_client(&self, input: ClientInput) -> AppResult<()> {
        validate_name(&input.nombre).map_err(|msg| AppError::Validation(msg.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO clients (name, contact, address, phone, email)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&input.nombre)
        .bind(&input.contacto)
        .bind(&input.direccion)
        .bind(&input.telefono)
        .bind(&input.correo)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Replace a client's contact details
    pub async fn update_client(&self, client_id: i32, input: ClientInput) -> AppResult<()> {
        validate_name(&input.nombre).map_err(|msg| AppError::Validation(msg.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE clients
            SET name = $1, contact = $2, address = $3, phone = $4, email = $5
            WHERE id = $6
            "#,
        )
        .bind(&input.nombre)
        .bind(&input.contacto)
        .bind(&input.direccion)
        .bind(&input.telefono)
        .bind(&input.correo)
        .bind(client_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("client".to_string()));
        }

        Ok(())
    }

    /// Delete a client
    ///
    /// Clients with recorded sales are kept by the foreign key; the
    /// constraint violation surfaces as a database error.
    pub async fn delete_client(&self, client_id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(client_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("client".to_string()));
        }

        Ok(())
    }

    /// Purchase history for a client, one row per sale with its total
    ///
    /// Unknown clients yield an empty list rather than an error.
    pub async fn purchase_history(&self, client_id: i32) -> AppResult<Vec<ClientPurchase>> {
        let purchases = sqlx::query_as::<_, ClientPurchase>(
            r#"
            SELECT s.id AS venta_id, s.sold_at AS fecha,
                   SUM(sl.unit_price * sl.quantity) AS total
            FROM sales s
            JOIN sale_lines sl ON sl.sale_id = s.id
            WHERE s.client_id = $1
            GROUP BY s.id, s.sold_at
            ORDER BY s.id
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.db)
        .await?;

        Ok(purchases)
    }
}
