//! HTTP handlers for sales endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::notifier::spawn_low_stock_check;
use crate::services::sale::{SaleFilter, SaleService, SaleWithDetails};
use crate::AppState;
use shared::models::{RecordSaleInput, SaleChannel};

#[derive(Deserialize)]
pub struct SaleQuery {
    pub product_id: Option<Uuid>,
    pub vendor_id: Option<Uuid>,
    pub channel: Option<SaleChannel>,
    pub min_total_price: Option<Decimal>,
    pub max_total_price: Option<Decimal>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// List sales with optional filters
pub async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<SaleQuery>,
) -> AppResult<Json<Vec<SaleWithDetails>>> {
    let service = SaleService::new(state.db);
    let filter = SaleFilter {
        product_id: query.product_id,
        vendor_id: query.vendor_id,
        channel: query.channel,
        min_total_price: query.min_total_price,
        max_total_price: query.max_total_price,
        start_date: query.start_date.and_then(|s| s.parse().ok()),
        end_date: query.end_date.and_then(|s| s.parse().ok()),
    };
    let sales = service.list(&filter).await?;
    Ok(Json(sales))
}

/// Get a specific sale
pub async fn get_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<Json<SaleWithDetails>> {
    let service = SaleService::new(state.db);
    let sale = service.get(sale_id).await?;
    Ok(Json(sale))
}

/// Record a new sale
pub async fn record_sale(
    State(state): State<AppState>,
    Json(input): Json<RecordSaleInput>,
) -> AppResult<(StatusCode, Json<SaleWithDetails>)> {
    let service = SaleService::new(state.db.clone());
    let sale = service.record_sale(input).await?;

    spawn_low_stock_check(&state, sale.product_id);

    Ok((StatusCode::CREATED, Json(sale)))
}
