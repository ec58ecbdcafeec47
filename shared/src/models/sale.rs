//! Sale models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Channel a sale was made through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sale_channel", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SaleChannel {
    PhysicalStore,
    Marketplace,
    Other,
}

impl SaleChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleChannel::PhysicalStore => "physical_store",
            SaleChannel::Marketplace => "marketplace",
            SaleChannel::Other => "other",
        }
    }
}

impl Default for SaleChannel {
    fn default() -> Self {
        SaleChannel::PhysicalStore
    }
}

/// A recorded sale
///
/// Sales are immutable once recorded. Stock corrections go through the
/// stock adjustment endpoint so the ledger stays consistent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sale {
    pub id: Uuid,
    pub product_id: Uuid,
    pub vendor_id: Option<Uuid>,
    pub quantity: i32,
    pub total_price: Decimal,
    pub channel: SaleChannel,
    pub sale_date: DateTime<Utc>,
}

/// Input for recording a sale
#[derive(Debug, Deserialize)]
pub struct RecordSaleInput {
    pub product_id: Uuid,
    pub vendor_id: Option<Uuid>,
    /// Units sold, defaults to 1
    pub quantity: Option<i32>,
    pub total_price: Decimal,
    pub channel: Option<SaleChannel>,
    /// Defaults to now
    pub sale_date: Option<DateTime<Utc>>,
}
