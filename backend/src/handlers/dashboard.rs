//! Dashboard and analytics HTTP handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::reporting::{
    ChannelSalesEntry, DashboardOverview, ReportFilter, ReportingService, SalesOverTimePoint,
    SupplierDashboard, TopProductEntry, VendorDashboard, VendorSalesEntry,
};
use crate::AppState;

#[derive(Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub group_by: Option<String>, // "day" or "month"
    pub limit: Option<i64>,
}

impl ReportQuery {
    fn into_filter(self) -> ReportFilter {
        ReportFilter {
            start_date: self.start_date.and_then(|s| s.parse().ok()),
            end_date: self.end_date.and_then(|s| s.parse().ok()),
            group_by: self.group_by,
            limit: self.limit,
        }
    }
}

/// Get the main dashboard overview
pub async fn get_dashboard_overview(
    State(state): State<AppState>,
) -> AppResult<Json<DashboardOverview>> {
    let service = ReportingService::new(state.db.clone());
    let overview = service
        .get_overview(state.config.alerts.low_stock_threshold)
        .await?;
    Ok(Json(overview))
}

/// Get sales aggregated over time
pub async fn get_sales_over_time(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<SalesOverTimePoint>>> {
    let service = ReportingService::new(state.db);
    let points = service.get_sales_over_time(&query.into_filter()).await?;
    Ok(Json(points))
}

/// Get the top selling products by revenue
pub async fn get_top_products(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<TopProductEntry>>> {
    let service = ReportingService::new(state.db);
    let products = service.get_top_products(&query.into_filter()).await?;
    Ok(Json(products))
}

/// Get sales totals grouped by vendor
pub async fn get_sales_by_vendor(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<VendorSalesEntry>>> {
    let service = ReportingService::new(state.db);
    let entries = service.get_sales_by_vendor(&query.into_filter()).await?;
    Ok(Json(entries))
}

/// Get sales totals grouped by channel
pub async fn get_sales_by_channel(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<ChannelSalesEntry>>> {
    let service = ReportingService::new(state.db);
    let entries = service.get_sales_by_channel(&query.into_filter()).await?;
    Ok(Json(entries))
}

/// Get the per-vendor dashboard
pub async fn get_vendor_dashboard(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> AppResult<Json<VendorDashboard>> {
    let service = ReportingService::new(state.db);
    let dashboard = service.get_vendor_dashboard(vendor_id).await?;
    Ok(Json(dashboard))
}

/// Get the per-supplier dashboard
pub async fn get_supplier_dashboard(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<SupplierDashboard>> {
    let service = ReportingService::new(state.db.clone());
    let dashboard = service
        .get_supplier_dashboard(supplier_id, state.config.alerts.low_stock_threshold)
        .await?;
    Ok(Json(dashboard))
}
