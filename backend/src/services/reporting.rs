//! Reporting service for dashboards and sales analytics
//!
//! Everything is aggregated on read; nothing is cached or precomputed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::SaleChannel;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Report filter parameters
#[derive(Debug, Default, Deserialize)]
pub struct ReportFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// "day" or "month"; defaults to day
    pub group_by: Option<String>,
    pub limit: Option<i64>,
}

/// Compact product line for dashboard lists
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DashboardProduct {
    pub id: Uuid,
    pub product_code: String,
    pub name: String,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product count per supplier
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SupplierProductCount {
    pub supplier_name: String,
    pub product_count: i64,
}

/// Dashboard overview metrics
#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    pub product_count: i64,
    pub supplier_count: i64,
    pub vendor_count: i64,
    pub sale_count: i64,
    pub units_sold: i64,
    pub total_revenue: Decimal,
    pub recent_products: Vec<DashboardProduct>,
    pub low_stock_products: Vec<DashboardProduct>,
    pub most_active_products: Vec<DashboardProduct>,
    pub least_active_products: Vec<DashboardProduct>,
    pub top_stock_products: Vec<DashboardProduct>,
    pub products_by_supplier: Vec<SupplierProductCount>,
}

/// Sales aggregate for one period
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SalesOverTimePoint {
    pub period: String,
    pub sale_count: i64,
    pub units_sold: i64,
    pub total_revenue: Decimal,
}

/// Top product by revenue
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TopProductEntry {
    pub product_id: Uuid,
    pub product_code: String,
    pub product_name: String,
    pub units_sold: i64,
    pub total_revenue: Decimal,
}

/// Sales aggregate for one vendor
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct VendorSalesEntry {
    pub vendor_id: Option<Uuid>,
    pub vendor_name: String,
    pub sale_count: i64,
    pub units_sold: i64,
    pub total_revenue: Decimal,
}

/// Sales aggregate for one channel
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ChannelSalesEntry {
    pub channel: SaleChannel,
    pub sale_count: i64,
    pub units_sold: i64,
    pub total_revenue: Decimal,
}

/// Recent sale line for the vendor dashboard
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct VendorRecentSale {
    pub id: Uuid,
    pub product_code: String,
    pub product_name: String,
    pub quantity: i32,
    pub total_price: Decimal,
    pub channel: SaleChannel,
    pub sale_date: DateTime<Utc>,
}

/// Per-vendor dashboard
#[derive(Debug, Serialize)]
pub struct VendorDashboard {
    pub vendor_id: Uuid,
    pub vendor_name: String,
    pub phone: Option<String>,
    pub sale_count: i64,
    pub units_sold: i64,
    pub total_revenue: Decimal,
    pub recent_sales: Vec<VendorRecentSale>,
}

/// Per-supplier dashboard
#[derive(Debug, Serialize)]
pub struct SupplierDashboard {
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub product_count: i64,
    pub total_stock_units: i64,
    pub total_revenue: Decimal,
    pub low_stock_products: Vec<DashboardProduct>,
}

const DASHBOARD_PRODUCT_COLUMNS: &str = "id, product_code, name, stock, created_at, updated_at";

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the dashboard overview
    ///
    /// `low_stock_threshold` is the exclusive upper bound for the
    /// low-stock list.
    pub async fn get_overview(&self, low_stock_threshold: i32) -> AppResult<DashboardOverview> {
        let (product_count, supplier_count, vendor_count): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT (SELECT COUNT(*) FROM products),
                   (SELECT COUNT(*) FROM suppliers),
                   (SELECT COUNT(*) FROM vendors)
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let (sale_count, units_sold, total_revenue): (i64, i64, Decimal) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(quantity), 0),
                   COALESCE(SUM(total_price), 0)
            FROM sales
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let recent_products = self
            .product_list("ORDER BY created_at DESC LIMIT 5")
            .await?;
        let most_active_products = self
            .product_list("ORDER BY updated_at DESC LIMIT 5")
            .await?;
        let least_active_products = self
            .product_list("ORDER BY updated_at ASC LIMIT 5")
            .await?;
        let top_stock_products = self.product_list("ORDER BY stock DESC LIMIT 5").await?;

        let low_stock_query = format!(
            r#"
            SELECT {DASHBOARD_PRODUCT_COLUMNS}
            FROM products
            WHERE stock < $1
            ORDER BY stock ASC
            "#
        );

        let low_stock_products = sqlx::query_as::<_, DashboardProduct>(&low_stock_query)
            .bind(low_stock_threshold)
            .fetch_all(&self.db)
            .await?;

        let products_by_supplier = sqlx::query_as::<_, SupplierProductCount>(
            r#"
            SELECT COALESCE(s.name, 'Sem Fornecedor') AS supplier_name,
                   COUNT(*) AS product_count
            FROM products p
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            GROUP BY s.name
            ORDER BY product_count DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(DashboardOverview {
            product_count,
            supplier_count,
            vendor_count,
            sale_count,
            units_sold,
            total_revenue,
            recent_products,
            low_stock_products,
            most_active_products,
            least_active_products,
            top_stock_products,
            products_by_supplier,
        })
    }

    /// Get sales aggregated by day or month
    pub async fn get_sales_over_time(
        &self,
        filter: &ReportFilter,
    ) -> AppResult<Vec<SalesOverTimePoint>> {
        let (date_trunc, period_format) = match filter.group_by.as_deref() {
            Some("month") => ("month", "YYYY-MM"),
            _ => ("day", "YYYY-MM-DD"),
        };

        let query = format!(
            r#"
            SELECT TO_CHAR(DATE_TRUNC('{}', sale_date), '{}') AS period,
                   COUNT(*) AS sale_count,
                   COALESCE(SUM(quantity), 0) AS units_sold,
                   COALESCE(SUM(total_price), 0) AS total_revenue
            FROM sales
            WHERE ($1::TIMESTAMPTZ IS NULL OR sale_date >= $1)
              AND ($2::TIMESTAMPTZ IS NULL OR sale_date <= $2)
            GROUP BY DATE_TRUNC('{}', sale_date)
            ORDER BY period ASC
            "#,
            date_trunc, period_format, date_trunc
        );

        let points = sqlx::query_as::<_, SalesOverTimePoint>(&query)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .fetch_all(&self.db)
            .await?;

        Ok(points)
    }

    /// Get the top products by revenue
    pub async fn get_top_products(&self, filter: &ReportFilter) -> AppResult<Vec<TopProductEntry>> {
        let limit = filter.limit.unwrap_or(5);

        let entries = sqlx::query_as::<_, TopProductEntry>(
            r#"
            SELECT p.id AS product_id, p.product_code, p.name AS product_name,
                   COALESCE(SUM(s.quantity), 0) AS units_sold,
                   COALESCE(SUM(s.total_price), 0) AS total_revenue
            FROM sales s
            JOIN products p ON p.id = s.product_id
            WHERE ($1::TIMESTAMPTZ IS NULL OR s.sale_date >= $1)
              AND ($2::TIMESTAMPTZ IS NULL OR s.sale_date <= $2)
            GROUP BY p.id, p.product_code, p.name
            ORDER BY total_revenue DESC
            LIMIT $3
            "#,
        )
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// Get sales aggregated by vendor
    pub async fn get_sales_by_vendor(
        &self,
        filter: &ReportFilter,
    ) -> AppResult<Vec<VendorSalesEntry>> {
        let entries = sqlx::query_as::<_, VendorSalesEntry>(
            r#"
            SELECT s.vendor_id, COALESCE(v.name, 'Sem Vendedor') AS vendor_name,
                   COUNT(*) AS sale_count,
                   COALESCE(SUM(s.quantity), 0) AS units_sold,
                   COALESCE(SUM(s.total_price), 0) AS total_revenue
            FROM sales s
            LEFT JOIN vendors v ON v.id = s.vendor_id
            WHERE ($1::TIMESTAMPTZ IS NULL OR s.sale_date >= $1)
              AND ($2::TIMESTAMPTZ IS NULL OR s.sale_date <= $2)
            GROUP BY s.vendor_id, v.name
            ORDER BY total_revenue DESC
            "#,
        )
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// Get sales aggregated by channel
    pub async fn get_sales_by_channel(
        &self,
        filter: &ReportFilter,
    ) -> AppResult<Vec<ChannelSalesEntry>> {
        let entries = sqlx::query_as::<_, ChannelSalesEntry>(
            r#"
            SELECT channel,
                   COUNT(*) AS sale_count,
                   COALESCE(SUM(quantity), 0) AS units_sold,
                   COALESCE(SUM(total_price), 0) AS total_revenue
            FROM sales
            WHERE ($1::TIMESTAMPTZ IS NULL OR sale_date >= $1)
              AND ($2::TIMESTAMPTZ IS NULL OR sale_date <= $2)
            GROUP BY channel
            ORDER BY total_revenue DESC
            "#,
        )
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// Get the dashboard for one vendor
    pub async fn get_vendor_dashboard(&self, vendor_id: Uuid) -> AppResult<VendorDashboard> {
        let vendor = sqlx::query_as::<_, (String, Option<String>)>(
            "SELECT name, phone FROM vendors WHERE id = $1",
        )
        .bind(vendor_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor".to_string()))?;

        let (sale_count, units_sold, total_revenue): (i64, i64, Decimal) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(quantity), 0),
                   COALESCE(SUM(total_price), 0)
            FROM sales
            WHERE vendor_id = $1
            "#,
        )
        .bind(vendor_id)
        .fetch_one(&self.db)
        .await?;

        let recent_sales = sqlx::query_as::<_, VendorRecentSale>(
            r#"
            SELECT s.id, p.product_code, p.name AS product_name,
                   s.quantity, s.total_price, s.channel, s.sale_date
            FROM sales s
            JOIN products p ON p.id = s.product_id
            WHERE s.vendor_id = $1
            ORDER BY s.sale_date DESC
            LIMIT 5
            "#,
        )
        .bind(vendor_id)
        .fetch_all(&self.db)
        .await?;

        Ok(VendorDashboard {
            vendor_id,
            vendor_name: vendor.0,
            phone: vendor.1,
            sale_count,
            units_sold,
            total_revenue,
            recent_sales,
        })
    }

    /// Get the dashboard for one supplier
    pub async fn get_supplier_dashboard(
        &self,
        supplier_id: Uuid,
        low_stock_threshold: i32,
    ) -> AppResult<SupplierDashboard> {
        let supplier_name =
            sqlx::query_scalar::<_, String>("SELECT name FROM suppliers WHERE id = $1")
                .bind(supplier_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        let (product_count, total_stock_units): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(stock), 0)
            FROM products
            WHERE supplier_id = $1
            "#,
        )
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        let total_revenue: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(s.total_price), 0)
            FROM sales s
            JOIN products p ON p.id = s.product_id
            WHERE p.supplier_id = $1
            "#,
        )
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        let low_stock_query = format!(
            r#"
            SELECT {DASHBOARD_PRODUCT_COLUMNS}
            FROM products
            WHERE supplier_id = $1 AND stock < $2
            ORDER BY stock ASC
            "#
        );

        let low_stock_products = sqlx::query_as::<_, DashboardProduct>(&low_stock_query)
            .bind(supplier_id)
            .bind(low_stock_threshold)
            .fetch_all(&self.db)
            .await?;

        Ok(SupplierDashboard {
            supplier_id,
            supplier_name,
            product_count,
            total_stock_units,
            total_revenue,
            low_stock_products,
        })
    }

    async fn product_list(&self, order_clause: &str) -> AppResult<Vec<DashboardProduct>> {
        let query = format!(
            "SELECT {DASHBOARD_PRODUCT_COLUMNS} FROM products {}",
            order_clause
        );

        let products = sqlx::query_as::<_, DashboardProduct>(&query)
            .fetch_all(&self.db)
            .await?;

        Ok(products)
    }
}
