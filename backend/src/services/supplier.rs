//! Supplier registry service

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{CreateSupplierInput, Supplier, UpdateSupplierInput};
use shared::validation::validate_email;

/// Supplier service for managing the supplier registry
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Query filters for listing suppliers
///
/// Text filters match case-insensitive substrings.
#[derive(Debug, Default, Deserialize)]
pub struct SupplierFilter {
    pub name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List suppliers, optionally filtered
    pub async fn list(&self, filter: &SupplierFilter) -> AppResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, contact_email, contact_phone, document, created_at
            FROM suppliers
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR contact_email ILIKE '%' || $2 || '%')
              AND ($3::TEXT IS NULL OR contact_phone ILIKE '%' || $3 || '%')
            ORDER BY name ASC
            "#,
        )
        .bind(&filter.name)
        .bind(&filter.contact_email)
        .bind(&filter.contact_phone)
        .fetch_all(&self.db)
        .await?;

        Ok(suppliers)
    }

    /// Get a supplier by id
    pub async fn get(&self, supplier_id: Uuid) -> AppResult<Supplier> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, contact_email, contact_phone, document, created_at
            FROM suppliers
            WHERE id = $1
            "#,
        )
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        Ok(supplier)
    }

    /// Create a supplier
    pub async fn create(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_pt: "O nome é obrigatório".to_string(),
            });
        }

        if let Some(email) = &input.contact_email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "contact_email".to_string(),
                message: msg.to_string(),
                message_pt: "Formato de e-mail inválido".to_string(),
            })?;
        }

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, contact_email, contact_phone, document)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, contact_email, contact_phone, document, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact_email)
        .bind(&input.contact_phone)
        .bind(&input.document)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Update a supplier; absent fields are left unchanged
    pub async fn update(
        &self,
        supplier_id: Uuid,
        input: UpdateSupplierInput,
    ) -> AppResult<Supplier> {
        let existing = self.get(supplier_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let contact_email = input.contact_email.or(existing.contact_email);
        let contact_phone = input.contact_phone.or(existing.contact_phone);
        let document = input.document.or(existing.document);

        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_pt: "O nome é obrigatório".to_string(),
            });
        }

        if let Some(email) = &contact_email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "contact_email".to_string(),
                message: msg.to_string(),
                message_pt: "Formato de e-mail inválido".to_string(),
            })?;
        }

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = $1, contact_email = $2, contact_phone = $3, document = $4
            WHERE id = $5
            RETURNING id, name, contact_email, contact_phone, document, created_at
            "#,
        )
        .bind(&name)
        .bind(&contact_email)
        .bind(&contact_phone)
        .bind(&document)
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Delete a supplier
    ///
    /// Products sourced from the supplier are kept; the schema clears
    /// their supplier link.
    pub async fn delete(&self, supplier_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(supplier_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }
}
