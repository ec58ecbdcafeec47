//! HTTP handlers for supplier management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::supplier::{SupplierFilter, SupplierService};
use crate::AppState;
use shared::models::{CreateSupplierInput, Supplier, UpdateSupplierInput};

#[derive(Deserialize)]
pub struct SupplierQuery {
    pub name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

/// List suppliers with optional filters
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(query): Query<SupplierQuery>,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    let filter = SupplierFilter {
        name: query.name,
        contact_email: query.contact_email,
        contact_phone: query.contact_phone,
    };
    let suppliers = service.list(&filter).await?;
    Ok(Json(suppliers))
}

/// Get a specific supplier
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.get(supplier_id).await?;
    Ok(Json(supplier))
}

/// Create a new supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let service = SupplierService::new(state.db);
    let supplier = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.update(supplier_id, input).await?;
    Ok(Json(supplier))
}

/// Delete a supplier
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = SupplierService::new(state.db);
    service.delete(supplier_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
