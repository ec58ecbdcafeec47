//! Product image gallery service
//!
//! Each product holds at most five images in slots 0 through 4. Slot
//! allocation happens under a row lock on the product so concurrent
//! uploads cannot claim the same slot.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{AddProductImageInput, ProductImage};
use shared::validation::{
    lowest_free_slot, validate_image_position, validate_image_size, MAX_IMAGES_PER_PRODUCT,
};

/// Service for managing product image galleries
#[derive(Clone)]
pub struct ProductImageService {
    db: PgPool,
}

impl ProductImageService {
    /// Create a new ProductImageService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List a product's images in slot order
    pub async fn list(&self, product_id: Uuid) -> AppResult<Vec<ProductImage>> {
        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

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

        Ok(images)
    }

    /// Add an image to a product
    ///
    /// The image lands in the requested slot when that slot is free, and
    /// in the lowest free slot otherwise. A sixth image is rejected.
    pub async fn add(
        &self,
        product_id: Uuid,
        input: AddProductImageInput,
    ) -> AppResult<ProductImage> {
        if input.image_url.trim().is_empty() {
            return Err(AppError::Validation {
                field: "image_url".to_string(),
                message: "Image URL is required".to_string(),
                message_pt: "A URL da imagem é obrigatória".to_string(),
            });
        }

        if let Some(size) = input.file_size_bytes {
            validate_image_size(size).map_err(|msg| AppError::Validation {
                field: "image_url".to_string(),
                message: msg.to_string(),
                message_pt: "Imagem muito grande. O tamanho máximo é 5 MB".to_string(),
            })?;
        }

        if let Some(position) = input.position {
            validate_image_position(position).map_err(|msg| AppError::Validation {
                field: "position".to_string(),
                message: msg.to_string(),
                message_pt: "A posição da imagem deve estar entre 0 e 4".to_string(),
            })?;
        }

        let mut tx = self.db.begin().await?;

        // Lock the product row to serialize slot allocation
        let product_exists =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM products WHERE id = $1 FOR UPDATE")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?;

        if product_exists.is_none() {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let occupied = sqlx::query_scalar::<_, i16>(
            "SELECT position FROM product_images WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_all(&mut *tx)
        .await?;

        if occupied.len() >= MAX_IMAGES_PER_PRODUCT {
            return Err(AppError::Validation {
                field: "images".to_string(),
                message: "A product can have at most 5 images".to_string(),
                message_pt: "Um produto pode ter no máximo 5 imagens".to_string(),
            });
        }

        let position = match input.position {
            Some(requested) if !occupied.contains(&requested) => requested,
            _ => lowest_free_slot(&occupied).ok_or_else(|| AppError::Validation {
                field: "images".to_string(),
                message: "A product can have at most 5 images".to_string(),
                message_pt: "Um produto pode ter no máximo 5 imagens".to_string(),
            })?,
        };

        let image = sqlx::query_as::<_, ProductImage>(
            r#"
            INSERT INTO product_images (product_id, image_url, alt_text, position)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, image_url, alt_text, position, created_at
            "#,
        )
        .bind(product_id)
        .bind(&input.image_url)
        .bind(input.alt_text.clone().unwrap_or_default())
        .bind(position)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(image)
    }

    /// Delete an image; its slot becomes free for reuse
    pub async fn delete(&self, product_id: Uuid, image_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM product_images WHERE id = $1 AND product_id = $2")
            .bind(image_id)
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Image".to_string()));
        }

        Ok(())
    }
}
