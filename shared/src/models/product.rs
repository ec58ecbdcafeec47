//! Product and product image models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog product
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    /// Unique human-readable code
    pub product_code: String,
    pub name: String,
    pub description: String,
    pub supplier_id: Option<Uuid>,
    pub cost_price: Decimal,
    pub recommended_price: Decimal,
    /// Discount room below the recommended price (%)
    pub negotiation_margin: Decimal,
    /// Units on hand. May go negative: overselling is recorded, not blocked.
    pub stock: i32,
    pub is_active: bool,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An image attached to a product
///
/// Positions are unique per product and limited to slots 0 through 4.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    pub image_url: String,
    pub alt_text: String,
    pub position: i16,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub product_code: String,
    pub name: String,
    pub description: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub cost_price: Option<Decimal>,
    pub recommended_price: Decimal,
    pub negotiation_margin: Option<Decimal>,
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
    pub video_url: Option<String>,
    /// Declared size of the uploaded video, checked against the limit
    pub video_size_bytes: Option<i64>,
}

/// Input for updating a product
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub product_code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub cost_price: Option<Decimal>,
    pub recommended_price: Option<Decimal>,
    pub negotiation_margin: Option<Decimal>,
    /// Changing stock here records a manual adjustment in the ledger
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
    pub video_url: Option<String>,
    pub video_size_bytes: Option<i64>,
}

/// Input for attaching an image to a product
#[derive(Debug, Deserialize)]
pub struct AddProductImageInput {
    pub image_url: String,
    pub alt_text: Option<String>,
    /// Requested slot; when absent or taken, the lowest free slot is used
    pub position: Option<i16>,
    /// Declared size of the uploaded image, checked against the limit
    pub file_size_bytes: Option<i64>,
}
