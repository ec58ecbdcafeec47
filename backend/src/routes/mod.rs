//! Route definitions for the Mercado Ops API

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Fee configuration (global singleton)
        .nest("/fees", fee_routes())
        // Supplier management
        .nest("/suppliers", supplier_routes())
        // Vendor management
        .nest("/vendors", vendor_routes())
        // Product catalog, stock and images
        .nest("/products", product_routes())
        // Sales
        .nest("/sales", sale_routes())
        // Dashboards and analytics
        .nest("/dashboard", dashboard_routes())
        // Chat assistant
        .route("/chat", post(handlers::handle_chat_message))
}

/// Fee configuration routes
fn fee_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::get_fee_config)
            .post(handlers::create_fee_config)
            .put(handlers::update_fee_config)
            .delete(handlers::delete_fee_config),
    )
}

/// Supplier management routes
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
}

/// Vendor management routes
fn vendor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_vendors).post(handlers::create_vendor),
        )
        .route(
            "/:vendor_id",
            get(handlers::get_vendor)
                .put(handlers::update_vendor)
                .delete(handlers::delete_vendor),
        )
}

/// Product management routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        // CSV import/export
        .route("/export", get(handlers::export_products_csv))
        .route("/import", post(handlers::import_products_csv))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        // Stock
        .route("/:product_id/stock", post(handlers::adjust_product_stock))
        .route("/:product_id/stock-history", get(handlers::get_stock_history))
        // Images
        .route(
            "/:product_id/images",
            get(handlers::list_product_images).post(handlers::add_product_image),
        )
        .route(
            "/:product_id/images/:image_id",
            delete(handlers::delete_product_image),
        )
}

/// Sales routes
fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::record_sale))
        .route("/:sale_id", get(handlers::get_sale))
}

/// Dashboard and analytics routes
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_dashboard_overview))
        .route("/sales-over-time", get(handlers::get_sales_over_time))
        .route("/top-products", get(handlers::get_top_products))
        .route("/sales-by-vendor", get(handlers::get_sales_by_vendor))
        .route("/sales-by-channel", get(handlers::get_sales_by_channel))
        // Per-entity dashboards
        .route("/vendors/:vendor_id", get(handlers::get_vendor_dashboard))
        .route(
            "/suppliers/:supplier_id",
            get(handlers::get_supplier_dashboard),
        )
}
