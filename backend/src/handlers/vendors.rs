//! HTTP handlers for vendor management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::vendor::{VendorFilter, VendorService};
use crate::AppState;
use shared::models::{CreateVendorInput, UpdateVendorInput, Vendor};

#[derive(Deserialize)]
pub struct VendorQuery {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// List vendors with optional filters
pub async fn list_vendors(
    State(state): State<AppState>,
    Query(query): Query<VendorQuery>,
) -> AppResult<Json<Vec<Vendor>>> {
    let service = VendorService::new(state.db);
    let filter = VendorFilter {
        name: query.name,
        phone: query.phone,
    };
    let vendors = service.list(&filter).await?;
    Ok(Json(vendors))
}

/// Get a specific vendor
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> AppResult<Json<Vendor>> {
    let service = VendorService::new(state.db);
    let vendor = service.get(vendor_id).await?;
    Ok(Json(vendor))
}

/// Create a new vendor
pub async fn create_vendor(
    State(state): State<AppState>,
    Json(input): Json<CreateVendorInput>,
) -> AppResult<(StatusCode, Json<Vendor>)> {
    let service = VendorService::new(state.db);
    let vendor = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(vendor)))
}

/// Update a vendor
pub async fn update_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
    Json(input): Json<UpdateVendorInput>,
) -> AppResult<Json<Vendor>> {
    let service = VendorService::new(state.db);
    let vendor = service.update(vendor_id, input).await?;
    Ok(Json(vendor))
}

/// Delete a vendor
pub async fn delete_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = VendorService::new(state.db);
    service.delete(vendor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
