//! Sales recording service
//!
//! Recording a sale decrements product stock and appends the matching
//! ledger entry in one transaction. Sales are immutable once recorded;
//! corrections go through stock adjustments.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{RecordSaleInput, SaleChannel, StockReason};
use shared::validation::{validate_quantity, validate_total_price};

/// Sale service for recording and querying sales
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

/// Query filters for listing sales
///
/// Date bounds are inclusive.
#[derive(Debug, Default, Deserialize)]
pub struct SaleFilter {
    pub product_id: Option<Uuid>,
    pub vendor_id: Option<Uuid>,
    pub channel: Option<SaleChannel>,
    pub min_total_price: Option<Decimal>,
    pub max_total_price: Option<Decimal>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Database row for sale with product and vendor info
#[derive(Debug, Clone, FromRow)]
struct SaleWithDetailsRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_code: String,
    pub product_name: String,
    pub vendor_id: Option<Uuid>,
    pub vendor_name: Option<String>,
    pub quantity: i32,
    pub total_price: Decimal,
    pub channel: SaleChannel,
    pub sale_date: DateTime<Utc>,
}

/// Sale with product and vendor info for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SaleWithDetails {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_code: String,
    pub product_name: String,
    pub vendor_id: Option<Uuid>,
    pub vendor_name: Option<String>,
    pub quantity: i32,
    pub total_price: Decimal,
    pub channel: SaleChannel,
    pub sale_date: DateTime<Utc>,
}

impl From<SaleWithDetailsRow> for SaleWithDetails {
    fn from(row: SaleWithDetailsRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            product_code: row.product_code,
            product_name: row.product_name,
            vendor_id: row.vendor_id,
            vendor_name: row.vendor_name,
            quantity: row.quantity,
            total_price: row.total_price,
            channel: row.channel,
            sale_date: row.sale_date,
        }
    }
}

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List sales with product and vendor info, optionally filtered
    pub async fn list(&self, filter: &SaleFilter) -> AppResult<Vec<SaleWithDetails>> {
        let rows = sqlx::query_as::<_, SaleWithDetailsRow>(
            r#"
            SELECT s.id, s.product_id, p.product_code, p.name AS product_name,
                   s.vendor_id, v.name AS vendor_name, s.quantity, s.total_price,
                   s.channel, s.sale_date
            FROM sales s
            JOIN products p ON p.id = s.product_id
            LEFT JOIN vendors v ON v.id = s.vendor_id
            WHERE ($1::UUID IS NULL OR s.product_id = $1)
              AND ($2::UUID IS NULL OR s.vendor_id = $2)
              AND ($3::sale_channel IS NULL OR s.channel = $3)
              AND ($4::NUMERIC IS NULL OR s.total_price >= $4)
              AND ($5::NUMERIC IS NULL OR s.total_price <= $5)
              AND ($6::TIMESTAMPTZ IS NULL OR s.sale_date >= $6)
              AND ($7::TIMESTAMPTZ IS NULL OR s.sale_date <= $7)
            ORDER BY s.sale_date DESC
            "#,
        )
        .bind(filter.product_id)
        .bind(filter.vendor_id)
        .bind(filter.channel)
        .bind(filter.min_total_price)
        .bind(filter.max_total_price)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(SaleWithDetails::from).collect())
    }

    /// Get a sale by id
    pub async fn get(&self, sale_id: Uuid) -> AppResult<SaleWithDetails> {
        let row = sqlx::query_as::<_, SaleWithDetailsRow>(
            r#"
            SELECT s.id, s.product_id, p.product_code, p.name AS product_name,
                   s.vendor_id, v.name AS vendor_name, s.quantity, s.total_price,
                   s.channel, s.sale_date
            FROM sales s
            JOIN products p ON p.id = s.product_id
            LEFT JOIN vendors v ON v.id = s.vendor_id
            WHERE s.id = $1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale".to_string()))?;

        Ok(SaleWithDetails::from(row))
    }

    /// Record a sale
    ///
    /// Inserts the sale, decrements product stock, and appends the ledger
    /// entry in one transaction. A failure anywhere rolls back all three.
    /// Stock is allowed to go negative: overselling is recorded, not
    /// blocked.
    pub async fn record_sale(&self, input: RecordSaleInput) -> AppResult<SaleWithDetails> {
        let quantity = input.quantity.unwrap_or(1);

        validate_quantity(quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_pt: "A quantidade deve ser pelo menos 1".to_string(),
        })?;

        validate_total_price(input.total_price).map_err(|msg| AppError::Validation {
            field: "total_price".to_string(),
            message: msg.to_string(),
            message_pt: "O preço total deve ser maior que zero".to_string(),
        })?;

        if let Some(vendor_id) = input.vendor_id {
            let vendor_exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM vendors WHERE id = $1)")
                    .bind(vendor_id)
                    .fetch_one(&self.db)
                    .await?;

            if !vendor_exists {
                return Err(AppError::NotFound("Vendor".to_string()));
            }
        }

        let channel = input.channel.unwrap_or_default();
        let sale_date = input.sale_date.unwrap_or_else(Utc::now);

        let mut tx = self.db.begin().await?;

        // Lock the product row so the decrement and the ledger entry see
        // the same stock level
        let product_exists =
            sqlx::query_scalar::<_, i32>("SELECT stock FROM products WHERE id = $1 FOR UPDATE")
                .bind(input.product_id)
                .fetch_optional(&mut *tx)
                .await?;

        if product_exists.is_none() {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let sale_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO sales (product_id, vendor_id, quantity, total_price, channel, sale_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.product_id)
        .bind(input.vendor_id)
        .bind(quantity)
        .bind(input.total_price)
        .bind(channel)
        .bind(sale_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET stock = stock - $1, updated_at = NOW() WHERE id = $2")
            .bind(quantity)
            .bind(input.product_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO stock_history (product_id, change, reason) VALUES ($1, $2, $3)")
            .bind(input.product_id)
            .bind(-quantity)
            .bind(StockReason::Sale)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get(sale_id).await
    }
}
