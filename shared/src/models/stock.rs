//! Stock ledger models
//!
//! Every stock mutation is mirrored by exactly one ledger entry written
//! in the same database transaction, so the sum of all changes for a
//! product always equals its current stock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Why a stock level changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "stock_reason", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StockReason {
    NewStock,
    Sale,
    ManualAdjustment,
    InitialStock,
}

impl StockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockReason::NewStock => "new_stock",
            StockReason::Sale => "sale",
            StockReason::ManualAdjustment => "manual_adjustment",
            StockReason::InitialStock => "initial_stock",
        }
    }
}

/// One entry in a product's stock ledger
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockHistoryEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Signed unit delta applied to the product's stock
    pub change: i32,
    pub reason: StockReason,
    pub timestamp: DateTime<Utc>,
}

/// Input for setting a product's stock to a new absolute level
#[derive(Debug, Deserialize)]
pub struct AdjustStockInput {
    /// Target stock level; the ledger records the delta from the current level
    pub stock: i32,
    /// Only `new_stock` and `manual_adjustment` are accepted here;
    /// defaults to `manual_adjustment`
    pub reason: Option<StockReason>,
}
