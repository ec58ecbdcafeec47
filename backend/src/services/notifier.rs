//! Low-stock alert service
//!
//! Posts a webhook message when a product's stock falls below the
//! configured threshold. Callers spawn the check after their transaction
//! commits, so a failing alert never rolls back a sale or adjustment.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::AppState;

/// Service for low-stock webhook alerts
#[derive(Clone)]
pub struct StockAlertService {
    db: PgPool,
    client: Option<StockWebhookClient>,
    threshold: i32,
}

/// Webhook client for stock alerts
#[derive(Clone)]
pub struct StockWebhookClient {
    webhook_url: String,
    http_client: reqwest::Client,
}

/// Webhook message payload
#[derive(Debug, Serialize)]
struct WebhookPayload {
    text: String,
}

impl StockWebhookClient {
    /// Create a new webhook client
    pub fn new(webhook_url: String) -> Self {
        Self {
            webhook_url,
            http_client: reqwest::Client::new(),
        }
    }

    /// Post an alert message to the webhook
    pub async fn send_alert(&self, message: &str) -> Result<(), String> {
        let response = self
            .http_client
            .post(&self.webhook_url)
            .json(&WebhookPayload {
                text: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| format!("Failed to reach stock alert webhook: {}", e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!(
                "Stock alert webhook returned {}",
                response.status()
            ))
        }
    }
}

/// Spawn a background low-stock check for a product
///
/// Used by handlers after a stock-changing request has committed.
pub fn spawn_low_stock_check(state: &AppState, product_id: Uuid) {
    let service = StockAlertService::new(state.db.clone(), &state.config);
    tokio::spawn(async move {
        if let Err(e) = service.check_product(product_id).await {
            tracing::error!("Low stock check failed for product {}: {}", product_id, e);
        }
    });
}

/// Build the low-stock alert message
pub fn low_stock_message(name: &str, product_code: &str, stock: i32) -> String {
    format!(
        "Alerta de Estoque Baixo: {}\n\
         O produto \"{}\" (Código: {}) está com estoque baixo.\n\
         Estoque atual: {}\n\
         Por favor, reponha o estoque.",
        name, name, product_code, stock
    )
}

impl StockAlertService {
    /// Create a new StockAlertService from the application config
    ///
    /// Without a configured webhook URL, checks still log but send
    /// nothing.
    pub fn new(db: PgPool, config: &Config) -> Self {
        let client = if config.alerts.webhook_url.is_empty() {
            None
        } else {
            Some(StockWebhookClient::new(config.alerts.webhook_url.clone()))
        };

        Self {
            db,
            client,
            threshold: config.alerts.low_stock_threshold,
        }
    }

    /// Alert when a product's stock is below the threshold
    ///
    /// Returns whether an alert was posted.
    pub async fn check_product(&self, product_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query_as::<_, (String, String, i32)>(
            "SELECT name, product_code, stock FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?;

        let (name, product_code, stock) = match row {
            Some(row) => row,
            None => return Ok(false),
        };

        if stock >= self.threshold {
            return Ok(false);
        }

        tracing::warn!(
            "Low stock for product {} ({}): {} units left",
            name,
            product_code,
            stock
        );

        if let Some(client) = &self.client {
            let message = low_stock_message(&name, &product_code, stock);
            client
                .send_alert(&message)
                .await
                .map_err(AppError::ExternalService)?;
            return Ok(true);
        }

        Ok(false)
    }
}
