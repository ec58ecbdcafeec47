//! HTTP handlers for the global fee configuration

use axum::{extract::State, http::StatusCode, Json};
use shared::models::{CreateFeeConfigInput, FeeConfig, UpdateFeeConfigInput};

use crate::error::{AppError, AppResult};
use crate::services::FeeConfigService;
use crate::AppState;

/// Get the current fee configuration
pub async fn get_fee_config(State(state): State<AppState>) -> AppResult<Json<FeeConfig>> {
    let service = FeeConfigService::new(state.db);
    let config = service
        .get()
        .await?
        .ok_or_else(|| AppError::NotFound("Fee configuration".to_string()))?;
    Ok(Json(config))
}

/// Create the fee configuration
pub async fn create_fee_config(
    State(state): State<AppState>,
    Json(input): Json<CreateFeeConfigInput>,
) -> AppResult<(StatusCode, Json<FeeConfig>)> {
    let service = FeeConfigService::new(state.db);
    let config = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(config)))
}

/// Update the fee configuration
pub async fn update_fee_config(
    State(state): State<AppState>,
    Json(input): Json<UpdateFeeConfigInput>,
) -> AppResult<Json<FeeConfig>> {
    let service = FeeConfigService::new(state.db);
    let config = service.update(input).await?;
    Ok(Json(config))
}

/// Delete the fee configuration
pub async fn delete_fee_config(State(state): State<AppState>) -> AppResult<StatusCode> {
    let service = FeeConfigService::new(state.db);
    service.delete().await?;
    Ok(StatusCode::NO_CONTENT)
}
