//! Validation utilities for the Mercado Ops platform
//!
//! Pure checks shared by the request-handling services and the test
//! suites. Services map the error strings into their HTTP error type.

use rust_decimal::Decimal;

/// Maximum number of images per product
pub const MAX_IMAGES_PER_PRODUCT: usize = 5;

/// Highest image slot; valid positions are 0..=MAX_IMAGE_POSITION
pub const MAX_IMAGE_POSITION: i16 = 4;

/// Maximum declared image upload size (5 MB)
pub const MAX_IMAGE_SIZE_BYTES: i64 = 5 * 1024 * 1024;

/// Maximum declared video upload size (50 MB)
pub const MAX_VIDEO_SIZE_BYTES: i64 = 50 * 1024 * 1024;

// ============================================================================
// Sale Validations
// ============================================================================

/// Validate that a sale quantity is a positive number of units
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be at least 1");
    }
    Ok(())
}

/// Validate that a sale total is positive
pub fn validate_total_price(total_price: Decimal) -> Result<(), &'static str> {
    if total_price <= Decimal::ZERO {
        return Err("Total price must be greater than zero");
    }
    Ok(())
}

// ============================================================================
// Product Validations
// ============================================================================

/// Validate that a price field is not negative
pub fn validate_non_negative_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Validate that a negotiation margin is a percentage between 0 and 100
pub fn validate_negotiation_margin(margin: Decimal) -> Result<(), &'static str> {
    if margin < Decimal::ZERO || margin > Decimal::from(100) {
        return Err("Negotiation margin must be between 0 and 100");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

// ============================================================================
// Media Validations
// ============================================================================

/// Validate a declared image upload size
pub fn validate_image_size(size_bytes: i64) -> Result<(), &'static str> {
    if size_bytes > MAX_IMAGE_SIZE_BYTES {
        return Err("Image too large. Maximum is 5 MB");
    }
    Ok(())
}

/// Validate a declared video upload size
pub fn validate_video_size(size_bytes: i64) -> Result<(), &'static str> {
    if size_bytes > MAX_VIDEO_SIZE_BYTES {
        return Err("Video too large. Maximum is 50 MB");
    }
    Ok(())
}

/// Validate an explicitly requested image slot
pub fn validate_image_position(position: i16) -> Result<(), &'static str> {
    if position < 0 || position > MAX_IMAGE_POSITION {
        return Err("Image position must be between 0 and 4");
    }
    Ok(())
}

/// Find the lowest free image slot in 0..=MAX_IMAGE_POSITION
///
/// Returns None when all slots are taken.
pub fn lowest_free_slot(occupied: &[i16]) -> Option<i16> {
    (0..=MAX_IMAGE_POSITION).find(|slot| !occupied.contains(slot))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Sale Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(250).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_total_price() {
        assert!(validate_total_price(Decimal::new(1, 2)).is_ok()); // 0.01
        assert!(validate_total_price(Decimal::from(100)).is_ok());
        assert!(validate_total_price(Decimal::ZERO).is_err());
        assert!(validate_total_price(Decimal::from(-5)).is_err());
    }

    // ========================================================================
    // Product Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_non_negative_price() {
        assert!(validate_non_negative_price(Decimal::ZERO).is_ok());
        assert!(validate_non_negative_price(Decimal::from(49)).is_ok());
        assert!(validate_non_negative_price(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_negotiation_margin() {
        assert!(validate_negotiation_margin(Decimal::ZERO).is_ok());
        assert!(validate_negotiation_margin(Decimal::from(100)).is_ok());
        assert!(validate_negotiation_margin(Decimal::from(25)).is_ok());
        assert!(validate_negotiation_margin(Decimal::from(-1)).is_err());
        assert!(validate_negotiation_margin(Decimal::from(101)).is_err());
    }

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("contato@fornecedor.com.br").is_ok());
        assert!(validate_email("a@b.co").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    // ========================================================================
    // Media Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_image_size() {
        assert!(validate_image_size(1024).is_ok());
        assert!(validate_image_size(MAX_IMAGE_SIZE_BYTES).is_ok());
        assert!(validate_image_size(MAX_IMAGE_SIZE_BYTES + 1).is_err());
    }

    #[test]
    fn test_validate_video_size() {
        assert!(validate_video_size(MAX_VIDEO_SIZE_BYTES).is_ok());
        assert!(validate_video_size(MAX_VIDEO_SIZE_BYTES + 1).is_err());
    }

    #[test]
    fn test_validate_image_position() {
        assert!(validate_image_position(0).is_ok());
        assert!(validate_image_position(4).is_ok());
        assert!(validate_image_position(5).is_err());
        assert!(validate_image_position(-1).is_err());
    }

    #[test]
    fn test_lowest_free_slot_empty() {
        assert_eq!(lowest_free_slot(&[]), Some(0));
    }

    #[test]
    fn test_lowest_free_slot_skips_occupied() {
        assert_eq!(lowest_free_slot(&[0, 1]), Some(2));
        assert_eq!(lowest_free_slot(&[0, 2, 3]), Some(1));
        assert_eq!(lowest_free_slot(&[1, 2, 3, 4]), Some(0));
    }

    #[test]
    fn test_lowest_free_slot_full() {
        assert_eq!(lowest_free_slot(&[0, 1, 2, 3, 4]), None);
    }

    #[test]
    fn test_lowest_free_slot_ignores_order() {
        assert_eq!(lowest_free_slot(&[4, 0, 2]), Some(1));
    }
}
