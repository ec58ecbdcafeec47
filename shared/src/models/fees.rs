//! Platform fee configuration models
//!
//! A single global row drives every fee-dependent derived price. Its
//! absence is a valid state: derived channel prices are simply reported
//! as unavailable until a configuration is created.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Global fee configuration (singleton)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeeConfig {
    pub id: Uuid,
    /// Fixed cost added to every product's cost price
    pub cost_fixed: Decimal,
    /// Default margin for physical store pricing (%)
    pub physical_margin: Decimal,
    /// Marketplace commission (%)
    pub marketplace_commission: Decimal,
    /// Free shipping program fee (%)
    pub free_shipping_fee: Decimal,
    /// Fixed fee charged per marketplace order
    pub fixed_fee: Decimal,
    /// Whether the highlight campaign surcharge applies
    pub highlight_active: bool,
    /// Highlight campaign fee (%)
    pub highlight_fee: Decimal,
}

/// Input for creating the fee configuration
///
/// Omitted fields fall back to the platform defaults.
#[derive(Debug, Deserialize)]
pub struct CreateFeeConfigInput {
    pub cost_fixed: Option<Decimal>,
    pub physical_margin: Option<Decimal>,
    pub marketplace_commission: Option<Decimal>,
    pub free_shipping_fee: Option<Decimal>,
    pub fixed_fee: Option<Decimal>,
    pub highlight_active: Option<bool>,
    pub highlight_fee: Option<Decimal>,
}

/// Input for updating the fee configuration
#[derive(Debug, Deserialize)]
pub struct UpdateFeeConfigInput {
    pub cost_fixed: Option<Decimal>,
    pub physical_margin: Option<Decimal>,
    pub marketplace_commission: Option<Decimal>,
    pub free_shipping_fee: Option<Decimal>,
    pub fixed_fee: Option<Decimal>,
    pub highlight_active: Option<bool>,
    pub highlight_fee: Option<Decimal>,
}
