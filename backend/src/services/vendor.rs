//! Vendor registry service

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{CreateVendorInput, UpdateVendorInput, Vendor};

/// Vendor service for managing the sales team registry
#[derive(Clone)]
pub struct VendorService {
    db: PgPool,
}

/// Query filters for listing vendors
///
/// Text filters match case-insensitive substrings.
#[derive(Debug, Default, Deserialize)]
pub struct VendorFilter {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl VendorService {
    /// Create a new VendorService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List vendors, optionally filtered
    pub async fn list(&self, filter: &VendorFilter) -> AppResult<Vec<Vendor>> {
        let vendors = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT id, user_id, name, phone, profile_image_url, created_at
            FROM vendors
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR phone ILIKE '%' || $2 || '%')
            ORDER BY name ASC
            "#,
        )
        .bind(&filter.name)
        .bind(&filter.phone)
        .fetch_all(&self.db)
        .await?;

        Ok(vendors)
    }

    /// Get a vendor by id
    pub async fn get(&self, vendor_id: Uuid) -> AppResult<Vendor> {
        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT id, user_id, name, phone, profile_image_url, created_at
            FROM vendors
            WHERE id = $1
            "#,
        )
        .bind(vendor_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor".to_string()))?;

        Ok(vendor)
    }

    /// Create a vendor
    pub async fn create(&self, input: CreateVendorInput) -> AppResult<Vendor> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_pt: "O nome é obrigatório".to_string(),
            });
        }

        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            INSERT INTO vendors (user_id, name, phone, profile_image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, phone, profile_image_url, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.profile_image_url)
        .fetch_one(&self.db)
        .await?;

        Ok(vendor)
    }

    /// Update a vendor; absent fields are left unchanged
    pub async fn update(&self, vendor_id: Uuid, input: UpdateVendorInput) -> AppResult<Vendor> {
        let existing = self.get(vendor_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let phone = input.phone.or(existing.phone);
        let profile_image_url = input.profile_image_url.or(existing.profile_image_url);

        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_pt: "O nome é obrigatório".to_string(),
            });
        }

        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            UPDATE vendors
            SET name = $1, phone = $2, profile_image_url = $3
            WHERE id = $4
            RETURNING id, user_id, name, phone, profile_image_url, created_at
            "#,
        )
        .bind(&name)
        .bind(&phone)
        .bind(&profile_image_url)
        .bind(vendor_id)
        .fetch_one(&self.db)
        .await?;

        Ok(vendor)
    }

    /// Delete a vendor
    ///
    /// Recorded sales are kept; the schema clears their vendor link.
    pub async fn delete(&self, vendor_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vendors WHERE id = $1")
            .bind(vendor_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vendor".to_string()));
        }

        Ok(())
    }
}
