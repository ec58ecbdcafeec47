//! Product catalog service
//!
//! Products carry a denormalized stock counter that is never written on
//! its own: every stock mutation appends a ledger entry in the same
//! transaction, so the ledger always sums to the counter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{
    AdjustStockInput, CreateProductInput, FeeConfig, ProductImage, StockHistoryEntry, StockReason,
    UpdateProductInput,
};
use shared::pricing::ProductPricing;
use shared::validation::{
    validate_negotiation_margin, validate_non_negative_price, validate_video_size,
};

use super::fees::FeeConfigService;

/// Product service for catalog and stock management
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Query filters for listing products
///
/// Text filters match case-insensitive substrings; stock bounds are
/// inclusive.
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub product_code: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub min_stock: Option<i32>,
    pub max_stock: Option<i32>,
    pub is_active: Option<bool>,
}

/// Database row for product with supplier info
#[derive(Debug, Clone, FromRow)]
struct ProductRow {
    id: Uuid,
    product_code: String,
    name: String,
    description: String,
    supplier_id: Option<Uuid>,
    supplier_name: Option<String>,
    cost_price: Decimal,
    recommended_price: Decimal,
    negotiation_margin: Decimal,
    stock: i32,
    is_active: bool,
    video_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Product with derived pricing for API responses
///
/// Selling prices are computed from the current fee configuration at
/// read time; nothing here is cached.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithPricing {
    pub id: Uuid,
    pub product_code: String,
    pub name: String,
    pub description: String,
    pub supplier_id: Option<Uuid>,
    pub supplier_name: Option<String>,
    pub cost_price: Decimal,
    pub recommended_price: Decimal,
    pub negotiation_margin: Decimal,
    pub min_price_allowed: Decimal,
    pub physical_price: Option<Decimal>,
    pub marketplace_price: Option<Decimal>,
    pub stock: i32,
    pub is_active: bool,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductWithPricing {
    fn from_row(row: ProductRow, fees: Option<&FeeConfig>) -> Self {
        let pricing = ProductPricing::derive(
            row.cost_price,
            row.recommended_price,
            row.negotiation_margin,
            fees,
        );

        Self {
            id: row.id,
            product_code: row.product_code,
            name: row.name,
            description: row.description,
            supplier_id: row.supplier_id,
            supplier_name: row.supplier_name,
            cost_price: row.cost_price,
            recommended_price: row.recommended_price,
            negotiation_margin: row.negotiation_margin,
            min_price_allowed: pricing.min_price_allowed,
            physical_price: pricing.physical_price,
            marketplace_price: pricing.marketplace_price,
            stock: row.stock,
            is_active: row.is_active,
            video_url: row.video_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Product detail with images for API responses
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub id: Uuid,
    pub product_code: String,
    pub name: String,
    pub description: String,
    pub supplier_id: Option<Uuid>,
    pub supplier_name: Option<String>,
    pub cost_price: Decimal,
    pub recommended_price: Decimal,
    pub negotiation_margin: Decimal,
    pub min_price_allowed: Decimal,
    pub physical_price: Option<Decimal>,
    pub marketplace_price: Option<Decimal>,
    pub stock: i32,
    pub is_active: bool,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub images: Vec<ProductImage>,
}

impl ProductDetail {
    fn new(product: ProductWithPricing, images: Vec<ProductImage>) -> Self {
        Self {
            id: product.id,
            product_code: product.product_code,
            name: product.name,
            description: product.description,
            supplier_id: product.supplier_id,
            supplier_name: product.supplier_name,
            cost_price: product.cost_price,
            recommended_price: product.recommended_price,
            negotiation_margin: product.negotiation_margin,
            min_price_allowed: product.min_price_allowed,
            physical_price: product.physical_price,
            marketplace_price: product.marketplace_price,
            stock: product.stock,
            is_active: product.is_active,
            video_url: product.video_url,
            created_at: product.created_at,
            updated_at: product.updated_at,
            images,
        }
    }
}

/// CSV row for product export
#[derive(Debug, Serialize)]
struct ProductCsvRow {
    id: Uuid,
    product_code: String,
    name: String,
    description: String,
    supplier_name: Option<String>,
    cost_price: Decimal,
    recommended_price: Decimal,
    negotiation_margin: Decimal,
    stock: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// CSV record for product import
///
/// Only product_code, name, and recommended_price are required; other
/// columns fall back to existing values (or defaults for new products).
#[derive(Debug, Deserialize)]
struct ProductCsvRecord {
    product_code: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    supplier_name: Option<String>,
    #[serde(default)]
    cost_price: Option<Decimal>,
    recommended_price: Decimal,
    #[serde(default)]
    negotiation_margin: Option<Decimal>,
    #[serde(default)]
    stock: Option<i32>,
    #[serde(default)]
    is_active: Option<bool>,
}

/// Summary of a CSV import run
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
}

const PRODUCT_COLUMNS: &str = r#"
    p.id, p.product_code, p.name, p.description, p.supplier_id,
    s.name AS supplier_name, p.cost_price, p.recommended_price,
    p.negotiation_margin, p.stock, p.is_active, p.video_url,
    p.created_at, p.updated_at
"#;

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ========================================================================
    // Catalog CRUD
    // ========================================================================

    /// List products with derived pricing, optionally filtered
    pub async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<ProductWithPricing>> {
        let fees = FeeConfigService::new(self.db.clone()).get().await?;

        let query = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products p
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            WHERE ($1::TEXT IS NULL OR p.name ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR p.product_code ILIKE '%' || $2 || '%')
              AND ($3::UUID IS NULL OR p.supplier_id = $3)
              AND ($4::INT IS NULL OR p.stock >= $4)
              AND ($5::INT IS NULL OR p.stock <= $5)
              AND ($6::BOOLEAN IS NULL OR p.is_active = $6)
            ORDER BY p.name ASC
            "#
        );

        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .bind(&filter.name)
            .bind(&filter.product_code)
            .bind(filter.supplier_id)
            .bind(filter.min_stock)
            .bind(filter.max_stock)
            .bind(filter.is_active)
            .fetch_all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ProductWithPricing::from_row(row, fees.as_ref()))
            .collect())
    }

    /// Get a product with pricing and images
    pub async fn get(&self, product_id: Uuid) -> AppResult<ProductDetail> {
        let product = self.fetch_with_pricing(product_id).await?;

        let images = sqlx::query_as::<_, ProductImage>(
            r#"
            SELECT id, product_id, image_url, alt_text, position, created_at
            FROM product_images
            WHERE product_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ProductDetail::new(product, images))
    }

    /// Create a product
    ///
    /// An initial stock greater than zero is recorded in the ledger as an
    /// initial_stock entry, in the same transaction.
    pub async fn create(&self, input: CreateProductInput) -> AppResult<ProductWithPricing> {
        if input.product_code.trim().is_empty() {
            return Err(AppError::Validation {
                field: "product_code".to_string(),
                message: "Product code is required".to_string(),
                message_pt: "O código do produto é obrigatório".to_string(),
            });
        }

        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_pt: "O nome é obrigatório".to_string(),
            });
        }

        let cost_price = input.cost_price.unwrap_or(Decimal::ZERO);
        let negotiation_margin = input.negotiation_margin.unwrap_or(Decimal::ZERO);
        let description = input.description.unwrap_or_default();
        let stock = input.stock.unwrap_or(0);
        let is_active = input.is_active.unwrap_or(true);

        Self::validate_prices(cost_price, input.recommended_price, negotiation_margin)?;

        if let Some(size) = input.video_size_bytes {
            validate_video_size(size).map_err(|msg| AppError::Validation {
                field: "video_url".to_string(),
                message: msg.to_string(),
                message_pt: "Vídeo muito grande. O tamanho máximo é 50 MB".to_string(),
            })?;
        }

        let code_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE product_code = $1)",
        )
        .bind(&input.product_code)
        .fetch_one(&self.db)
        .await?;

        if code_taken {
            return Err(AppError::DuplicateEntry("product_code".to_string()));
        }

        if let Some(supplier_id) = input.supplier_id {
            self.ensure_supplier_exists(supplier_id).await?;
        }

        let mut tx = self.db.begin().await?;

        let product_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO products (
                product_code, name, description, supplier_id, cost_price,
                recommended_price, negotiation_margin, stock, is_active, video_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&input.product_code)
        .bind(&input.name)
        .bind(&description)
        .bind(input.supplier_id)
        .bind(cost_price)
        .bind(input.recommended_price)
        .bind(negotiation_margin)
        .bind(stock)
        .bind(is_active)
        .bind(&input.video_url)
        .fetch_one(&mut *tx)
        .await?;

        if stock > 0 {
            sqlx::query(
                "INSERT INTO stock_history (product_id, change, reason) VALUES ($1, $2, $3)",
            )
            .bind(product_id)
            .bind(stock)
            .bind(StockReason::InitialStock)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.fetch_with_pricing(product_id).await
    }

    /// Update a product; absent fields are left unchanged
    ///
    /// A changed stock value is recorded in the ledger as one
    /// manual_adjustment entry, in the same transaction. An unchanged
    /// stock value produces no ledger entry.
    pub async fn update(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<ProductWithPricing> {
        let mut tx = self.db.begin().await?;

        let existing = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT p.id, p.product_code, p.name, p.description, p.supplier_id,
                   NULL::TEXT AS supplier_name, p.cost_price, p.recommended_price,
                   p.negotiation_margin, p.stock, p.is_active, p.video_url,
                   p.created_at, p.updated_at
            FROM products p
            WHERE p.id = $1
            FOR UPDATE OF p
            "#,
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let product_code = input.product_code.unwrap_or(existing.product_code);
        let name = input.name.unwrap_or(existing.name);
        let description = input.description.unwrap_or(existing.description);
        let supplier_id = input.supplier_id.or(existing.supplier_id);
        let cost_price = input.cost_price.unwrap_or(existing.cost_price);
        let recommended_price = input.recommended_price.unwrap_or(existing.recommended_price);
        let negotiation_margin = input
            .negotiation_margin
            .unwrap_or(existing.negotiation_margin);
        let new_stock = input.stock.unwrap_or(existing.stock);
        let is_active = input.is_active.unwrap_or(existing.is_active);
        let video_url = input.video_url.or(existing.video_url);

        if product_code.trim().is_empty() {
            return Err(AppError::Validation {
                field: "product_code".to_string(),
                message: "Product code is required".to_string(),
                message_pt: "O código do produto é obrigatório".to_string(),
            });
        }

        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_pt: "O nome é obrigatório".to_string(),
            });
        }

        Self::validate_prices(cost_price, recommended_price, negotiation_margin)?;

        if let Some(size) = input.video_size_bytes {
            validate_video_size(size).map_err(|msg| AppError::Validation {
                field: "video_url".to_string(),
                message: msg.to_string(),
                message_pt: "Vídeo muito grande. O tamanho máximo é 50 MB".to_string(),
            })?;
        }

        let code_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE product_code = $1 AND id <> $2)",
        )
        .bind(&product_code)
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

        if code_taken {
            return Err(AppError::DuplicateEntry("product_code".to_string()));
        }

        if let Some(supplier_id) = input.supplier_id {
            let supplier_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)",
            )
            .bind(supplier_id)
            .fetch_one(&mut *tx)
            .await?;

            if !supplier_exists {
                return Err(AppError::NotFound("Supplier".to_string()));
            }
        }

        sqlx::query(
            r#"
            UPDATE products
            SET product_code = $1, name = $2, description = $3, supplier_id = $4,
                cost_price = $5, recommended_price = $6, negotiation_margin = $7,
                stock = $8, is_active = $9, video_url = $10, updated_at = NOW()
            WHERE id = $11
            "#,
        )
        .bind(&product_code)
        .bind(&name)
        .bind(&description)
        .bind(supplier_id)
        .bind(cost_price)
        .bind(recommended_price)
        .bind(negotiation_margin)
        .bind(new_stock)
        .bind(is_active)
        .bind(&video_url)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        if new_stock != existing.stock {
            sqlx::query(
                "INSERT INTO stock_history (product_id, change, reason) VALUES ($1, $2, $3)",
            )
            .bind(product_id)
            .bind(new_stock - existing.stock)
            .bind(StockReason::ManualAdjustment)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.fetch_with_pricing(product_id).await
    }

    /// Delete a product along with its images, sales, and ledger entries
    pub async fn delete(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    // ========================================================================
    // Stock Ledger
    // ========================================================================

    /// Set a product's stock to a target level
    ///
    /// Records the signed delta in the ledger. Setting the current level
    /// again is a no-op: no ledger entry, no update.
    pub async fn adjust_stock(
        &self,
        product_id: Uuid,
        input: AdjustStockInput,
    ) -> AppResult<ProductWithPricing> {
        let reason = input.reason.unwrap_or(StockReason::ManualAdjustment);

        if matches!(reason, StockReason::Sale | StockReason::InitialStock) {
            return Err(AppError::Validation {
                field: "reason".to_string(),
                message: "Reason must be new_stock or manual_adjustment".to_string(),
                message_pt: "O motivo deve ser new_stock ou manual_adjustment".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let old_stock =
            sqlx::query_scalar::<_, i32>("SELECT stock FROM products WHERE id = $1 FOR UPDATE")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        if input.stock != old_stock {
            sqlx::query("UPDATE products SET stock = $1, updated_at = NOW() WHERE id = $2")
                .bind(input.stock)
                .bind(product_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                "INSERT INTO stock_history (product_id, change, reason) VALUES ($1, $2, $3)",
            )
            .bind(product_id)
            .bind(input.stock - old_stock)
            .bind(reason)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.fetch_with_pricing(product_id).await
    }

    /// Get the stock ledger for a product, newest first
    pub async fn stock_history(&self, product_id: Uuid) -> AppResult<Vec<StockHistoryEntry>> {
        self.ensure_product_exists(product_id).await?;

        let entries = sqlx::query_as::<_, StockHistoryEntry>(
            r#"
            SELECT id, product_id, change, reason, timestamp
            FROM stock_history
            WHERE product_id = $1
            ORDER BY timestamp DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    // ========================================================================
    // CSV Import / Export
    // ========================================================================

    /// Export the product catalog as CSV
    pub async fn export_csv(&self) -> AppResult<String> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT p.id, p.product_code, p.name, p.description, p.supplier_id,
                   s.name AS supplier_name, p.cost_price, p.recommended_price,
                   p.negotiation_margin, p.stock, p.is_active, p.video_url,
                   p.created_at, p.updated_at
            FROM products p
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            ORDER BY p.product_code ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut wtr = csv::Writer::from_writer(vec![]);
        for row in rows {
            wtr.serialize(ProductCsvRow {
                id: row.id,
                product_code: row.product_code,
                name: row.name,
                description: row.description,
                supplier_name: row.supplier_name,
                cost_price: row.cost_price,
                recommended_price: row.recommended_price,
                negotiation_margin: row.negotiation_margin,
                stock: row.stock,
                is_active: row.is_active,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })?;
        }

        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;

        Ok(csv_data)
    }

    /// Import products from CSV, matching existing products by code
    ///
    /// Suppliers named in the file are created on first sight. Stock
    /// changes flow through the ledger like any other mutation. The whole
    /// file is applied in one transaction.
    pub async fn import_csv(&self, data: &str) -> AppResult<ImportSummary> {
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let mut tx = self.db.begin().await?;

        let mut created = 0;
        let mut updated = 0;

        for result in reader.deserialize::<ProductCsvRecord>() {
            let record = result?;

            if record.product_code.trim().is_empty() || record.name.trim().is_empty() {
                return Err(AppError::Validation {
                    field: "product_code".to_string(),
                    message: "Every row needs a product code and a name".to_string(),
                    message_pt: "Cada linha precisa de um código de produto e um nome".to_string(),
                });
            }

            if let Some(margin) = record.negotiation_margin {
                validate_negotiation_margin(margin).map_err(|msg| AppError::Validation {
                    field: "negotiation_margin".to_string(),
                    message: msg.to_string(),
                    message_pt: "A margem de negociação deve estar entre 0 e 100".to_string(),
                })?;
            }

            let supplier_id = match &record.supplier_name {
                Some(name) if !name.trim().is_empty() => {
                    Some(Self::get_or_create_supplier(&mut tx, name).await?)
                }
                _ => None,
            };

            let existing = sqlx::query_as::<_, (Uuid, i32)>(
                "SELECT id, stock FROM products WHERE product_code = $1 FOR UPDATE",
            )
            .bind(&record.product_code)
            .fetch_optional(&mut *tx)
            .await?;

            match existing {
                Some((id, old_stock)) => {
                    sqlx::query(
                        r#"
                        UPDATE products
                        SET name = $2,
                            description = COALESCE($3, description),
                            supplier_id = COALESCE($4, supplier_id),
                            cost_price = COALESCE($5, cost_price),
                            recommended_price = $6,
                            negotiation_margin = COALESCE($7, negotiation_margin),
                            stock = COALESCE($8, stock),
                            is_active = COALESCE($9, is_active),
                            updated_at = NOW()
                        WHERE id = $1
                        "#,
                    )
                    .bind(id)
                    .bind(&record.name)
                    .bind(&record.description)
                    .bind(supplier_id)
                    .bind(record.cost_price)
                    .bind(record.recommended_price)
                    .bind(record.negotiation_margin)
                    .bind(record.stock)
                    .bind(record.is_active)
                    .execute(&mut *tx)
                    .await?;

                    if let Some(new_stock) = record.stock {
                        if new_stock != old_stock {
                            sqlx::query(
                                "INSERT INTO stock_history (product_id, change, reason) VALUES ($1, $2, $3)",
                            )
                            .bind(id)
                            .bind(new_stock - old_stock)
                            .bind(StockReason::ManualAdjustment)
                            .execute(&mut *tx)
                            .await?;
                        }
                    }

                    updated += 1;
                }
                None => {
                    let stock = record.stock.unwrap_or(0);

                    let id = sqlx::query_scalar::<_, Uuid>(
                        r#"
                        INSERT INTO products (
                            product_code, name, description, supplier_id, cost_price,
                            recommended_price, negotiation_margin, stock, is_active
                        )
                        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                        RETURNING id
                        "#,
                    )
                    .bind(&record.product_code)
                    .bind(&record.name)
                    .bind(record.description.clone().unwrap_or_default())
                    .bind(supplier_id)
                    .bind(record.cost_price.unwrap_or(Decimal::ZERO))
                    .bind(record.recommended_price)
                    .bind(record.negotiation_margin.unwrap_or(Decimal::ZERO))
                    .bind(stock)
                    .bind(record.is_active.unwrap_or(true))
                    .fetch_one(&mut *tx)
                    .await?;

                    if stock > 0 {
                        sqlx::query(
                            "INSERT INTO stock_history (product_id, change, reason) VALUES ($1, $2, $3)",
                        )
                        .bind(id)
                        .bind(stock)
                        .bind(StockReason::InitialStock)
                        .execute(&mut *tx)
                        .await?;
                    }

                    created += 1;
                }
            }
        }

        tx.commit().await?;

        Ok(ImportSummary { created, updated })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn fetch_with_pricing(&self, product_id: Uuid) -> AppResult<ProductWithPricing> {
        let fees = FeeConfigService::new(self.db.clone()).get().await?;

        let query = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products p
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            WHERE p.id = $1
            "#
        );

        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(product_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(ProductWithPricing::from_row(row, fees.as_ref()))
    }

    async fn ensure_product_exists(&self, product_id: Uuid) -> AppResult<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    async fn ensure_supplier_exists(&self, supplier_id: Uuid) -> AppResult<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(supplier_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }

    async fn get_or_create_supplier(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        name: &str,
    ) -> AppResult<Uuid> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM suppliers WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut **tx)
            .await?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let id = sqlx::query_scalar::<_, Uuid>("INSERT INTO suppliers (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&mut **tx)
            .await?;

        Ok(id)
    }

    fn validate_prices(
        cost_price: Decimal,
        recommended_price: Decimal,
        negotiation_margin: Decimal,
    ) -> AppResult<()> {
        validate_non_negative_price(cost_price).map_err(|msg| AppError::Validation {
            field: "cost_price".to_string(),
            message: msg.to_string(),
            message_pt: "O preço de custo não pode ser negativo".to_string(),
        })?;

        validate_non_negative_price(recommended_price).map_err(|msg| AppError::Validation {
            field: "recommended_price".to_string(),
            message: msg.to_string(),
            message_pt: "O preço recomendado não pode ser negativo".to_string(),
        })?;

        validate_negotiation_margin(negotiation_margin).map_err(|msg| AppError::Validation {
            field: "negotiation_margin".to_string(),
            message: msg.to_string(),
            message_pt: "A margem de negociação deve estar entre 0 e 100".to_string(),
        })?;

        Ok(())
    }
}
