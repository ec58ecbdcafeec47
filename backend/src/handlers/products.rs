//! HTTP handlers for product management endpoints
//!
//! Covers the catalog CRUD, stock adjustments and history, CSV
//! import/export, and the per-product image gallery.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::notifier::spawn_low_stock_check;
use crate::services::product::{
    ImportSummary, ProductDetail, ProductFilter, ProductService, ProductWithPricing,
};
use crate::services::ProductImageService;
use crate::AppState;
use shared::models::{
    AddProductImageInput, AdjustStockInput, CreateProductInput, ProductImage, StockHistoryEntry,
    UpdateProductInput,
};

#[derive(Deserialize)]
pub struct ProductQuery {
    pub name: Option<String>,
    pub product_code: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub min_stock: Option<i32>,
    pub max_stock: Option<i32>,
    pub is_active: Option<bool>,
}

/// List products with optional filters
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<ProductWithPricing>>> {
    let service = ProductService::new(state.db);
    let filter = ProductFilter {
        name: query.name,
        product_code: query.product_code,
        supplier_id: query.supplier_id,
        min_stock: query.min_stock,
        max_stock: query.max_stock,
        is_active: query.is_active,
    };
    let products = service.list(&filter).await?;
    Ok(Json(products))
}

/// Get a specific product with pricing and images
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ProductDetail>> {
    let service = ProductService::new(state.db);
    let product = service.get(product_id).await?;
    Ok(Json(product))
}

/// Create a new product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<ProductWithPricing>)> {
    let service = ProductService::new(state.db);
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<ProductWithPricing>> {
    let stock_touched = input.stock.is_some();

    let service = ProductService::new(state.db.clone());
    let product = service.update(product_id, input).await?;

    if stock_touched {
        spawn_low_stock_check(&state, product_id);
    }

    Ok(Json(product))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = ProductService::new(state.db);
    service.delete(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Adjust a product's stock level
pub async fn adjust_product_stock(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<AdjustStockInput>,
) -> AppResult<Json<ProductWithPricing>> {
    let service = ProductService::new(state.db.clone());
    let product = service.adjust_stock(product_id, input).await?;

    spawn_low_stock_check(&state, product_id);

    Ok(Json(product))
}

/// Get the stock movement history for a product
pub async fn get_stock_history(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<StockHistoryEntry>>> {
    let service = ProductService::new(state.db);
    let history = service.stock_history(product_id).await?;
    Ok(Json(history))
}

/// Export the product catalog as CSV
pub async fn export_products_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = ProductService::new(state.db);
    let csv = service.export_csv().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"products.csv\"",
            ),
        ],
        csv,
    ))
}

/// Import products from a CSV file body
pub async fn import_products_csv(
    State(state): State<AppState>,
    body: String,
) -> AppResult<Json<ImportSummary>> {
    let service = ProductService::new(state.db);
    let summary = service.import_csv(&body).await?;
    Ok(Json(summary))
}

/// List images for a product
pub async fn list_product_images(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<ProductImage>>> {
    let service = ProductImageService::new(state.db);
    let images = service.list(product_id).await?;
    Ok(Json(images))
}

/// Add an image to a product
pub async fn add_product_image(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<AddProductImageInput>,
) -> AppResult<(StatusCode, Json<ProductImage>)> {
    let service = ProductImageService::new(state.db);
    let image = service.add(product_id, input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// Remove an image from a product
pub async fn delete_product_image(
    State(state): State<AppState>,
    Path((product_id, image_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    let service = ProductImageService::new(state.db);
    service.delete(product_id, image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
