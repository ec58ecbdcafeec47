//! Vendor models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A vendor (salesperson) registered on the platform
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vendor {
    pub id: Uuid,
    /// Optional reference to a login identity managed outside this service
    pub user_id: Option<Uuid>,
    pub name: String,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a vendor
#[derive(Debug, Deserialize)]
pub struct CreateVendorInput {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Input for updating a vendor
#[derive(Debug, Deserialize)]
pub struct UpdateVendorInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
}
