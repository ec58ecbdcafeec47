//! Supplier models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A supplier of products
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    /// Tax document (CNPJ or CPF)
    pub document: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a supplier
#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub document: Option<String>,
}

/// Input for updating a supplier
#[derive(Debug, Deserialize)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub document: Option<String>,
}
