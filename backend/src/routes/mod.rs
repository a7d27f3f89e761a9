//! Route definitions for the inventory and sales API

use axum::{
    routing::{get, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Product catalog
        .nest("/productos", product_routes())
        // Catalog reference tables
        .route("/categorias", get(handlers::list_categories))
        .route("/proveedores", get(handlers::list_suppliers))
        // Client registry
        .nest("/clientes", client_routes())
        // Sales
        .nest("/ventas", sale_routes())
        // Inventory report
        .route("/inventario", get(handlers::get_inventory_report))
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:product_id",
            put(handlers::update_product).delete(handlers::delete_product),
        )
}

/// Client registry routes
fn client_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route(
            "/:client_id",
            get(handlers::get_client)
                .put(handlers::update_client)
                .delete(handlers::delete_client),
        )
        .route("/:client_id/compras", get(handlers::get_client_purchases))
}

/// Sale registration and reporting routes
fn sale_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::get_sales_report).post(handlers::register_sale),
        )
        .route("/:sale_id/productos", get(handlers::get_sale_products))
        .route("/:sale_id/total", get(handlers::get_sale_total))
}
