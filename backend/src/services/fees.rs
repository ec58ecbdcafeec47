//! Platform fee configuration service
//!
//! A single configuration row drives channel price derivation. Absence of
//! the row is a valid state: channel prices are simply not published until
//! fees are configured.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use shared::models::{CreateFeeConfigInput, FeeConfig, UpdateFeeConfigInput};

/// Service for the singleton platform fee configuration
#[derive(Clone)]
pub struct FeeConfigService {
    db: PgPool,
}

impl FeeConfigService {
    /// Create a new FeeConfigService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the fee configuration, if one has been created
    pub async fn get(&self) -> AppResult<Option<FeeConfig>> {
        let config = sqlx::query_as::<_, FeeConfig>(
            r#"
            SELECT id, cost_fixed, physical_margin, marketplace_commission,
                   free_shipping_fee, fixed_fee, highlight_active, highlight_fee
            FROM fee_config
            "#,
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(config)
    }

    /// Create the fee configuration
    ///
    /// Only one configuration may exist; omitted fields take the platform
    /// defaults.
    pub async fn create(&self, input: CreateFeeConfigInput) -> AppResult<FeeConfig> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM fee_config)")
            .fetch_one(&self.db)
            .await?;

        if exists {
            return Err(AppError::Conflict {
                resource: "fee_config".to_string(),
                message: "A fee configuration already exists".to_string(),
                message_pt: "Já existe uma configuração de taxas".to_string(),
            });
        }

        let cost_fixed = input.cost_fixed.unwrap_or(Decimal::ZERO);
        let physical_margin = input.physical_margin.unwrap_or_else(|| Decimal::from(30));
        let marketplace_commission = input
            .marketplace_commission
            .unwrap_or_else(|| Decimal::from(14));
        let free_shipping_fee = input.free_shipping_fee.unwrap_or_else(|| Decimal::from(6));
        let fixed_fee = input.fixed_fee.unwrap_or_else(|| Decimal::from(4));
        let highlight_active = input.highlight_active.unwrap_or(true);
        let highlight_fee = input.highlight_fee.unwrap_or_else(|| Decimal::from(3));

        Self::validate_non_negative(&[
            ("cost_fixed", cost_fixed),
            ("physical_margin", physical_margin),
            ("marketplace_commission", marketplace_commission),
            ("free_shipping_fee", free_shipping_fee),
            ("fixed_fee", fixed_fee),
            ("highlight_fee", highlight_fee),
        ])?;

        let config = sqlx::query_as::<_, FeeConfig>(
            r#"
            INSERT INTO fee_config (
                cost_fixed, physical_margin, marketplace_commission,
                free_shipping_fee, fixed_fee, highlight_active, highlight_fee
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, cost_fixed, physical_margin, marketplace_commission,
                      free_shipping_fee, fixed_fee, highlight_active, highlight_fee
            "#,
        )
        .bind(cost_fixed)
        .bind(physical_margin)
        .bind(marketplace_commission)
        .bind(free_shipping_fee)
        .bind(fixed_fee)
        .bind(highlight_active)
        .bind(highlight_fee)
        .fetch_one(&self.db)
        .await?;

        Ok(config)
    }

    /// Update the fee configuration
    pub async fn update(&self, input: UpdateFeeConfigInput) -> AppResult<FeeConfig> {
        let existing = self
            .get()
            .await?
            .ok_or_else(|| AppError::NotFound("Fee configuration".to_string()))?;

        let cost_fixed = input.cost_fixed.unwrap_or(existing.cost_fixed);
        let physical_margin = input.physical_margin.unwrap_or(existing.physical_margin);
        let marketplace_commission = input
            .marketplace_commission
            .unwrap_or(existing.marketplace_commission);
        let free_shipping_fee = input
            .free_shipping_fee
            .unwrap_or(existing.free_shipping_fee);
        let fixed_fee = input.fixed_fee.unwrap_or(existing.fixed_fee);
        let highlight_active = input.highlight_active.unwrap_or(existing.highlight_active);
        let highlight_fee = input.highlight_fee.unwrap_or(existing.highlight_fee);

        Self::validate_non_negative(&[
            ("cost_fixed", cost_fixed),
            ("physical_margin", physical_margin),
            ("marketplace_commission", marketplace_commission),
            ("free_shipping_fee", free_shipping_fee),
            ("fixed_fee", fixed_fee),
            ("highlight_fee", highlight_fee),
        ])?;

        let config = sqlx::query_as::<_, FeeConfig>(
            r#"
            UPDATE fee_config
            SET cost_fixed = $1, physical_margin = $2, marketplace_commission = $3,
                free_shipping_fee = $4, fixed_fee = $5, highlight_active = $6,
                highlight_fee = $7
            WHERE id = $8
            RETURNING id, cost_fixed, physical_margin, marketplace_commission,
                      free_shipping_fee, fixed_fee, highlight_active, highlight_fee
            "#,
        )
        .bind(cost_fixed)
        .bind(physical_margin)
        .bind(marketplace_commission)
        .bind(free_shipping_fee)
        .bind(fixed_fee)
        .bind(highlight_active)
        .bind(highlight_fee)
        .bind(existing.id)
        .fetch_one(&self.db)
        .await?;

        Ok(config)
    }

    /// Delete the fee configuration
    ///
    /// Channel prices stop being published until a new configuration is
    /// created.
    pub async fn delete(&self) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM fee_config")
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fee configuration".to_string()));
        }

        Ok(())
    }

    fn validate_non_negative(fields: &[(&str, Decimal)]) -> AppResult<()> {
        for (field, value) in fields {
            if *value < Decimal::ZERO {
                return Err(AppError::Validation {
                    field: (*field).to_string(),
                    message: format!("{} cannot be negative", field),
                    message_pt: format!("O campo {} não pode ser negativo", field),
                });
            }
        }
        Ok(())
    }
}
