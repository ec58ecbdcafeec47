//! Sale recording tests
//!
//! Tests for sale input validation and channel handling:
//! - Quantity and total price bounds
//! - Channel wire representation and defaults
//! - The stock decrement a sale implies

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::models::SaleChannel;
use shared::validation::{validate_quantity, validate_total_price};
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test that quantities start at one
    #[test]
    fn test_quantity_minimum() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
    }

    /// Test the omitted-quantity default
    #[test]
    fn test_quantity_default_is_one() {
        let quantity: Option<i32> = None;
        assert_eq!(quantity.unwrap_or(1), 1);
        assert!(validate_quantity(quantity.unwrap_or(1)).is_ok());
    }

    /// Test that the total price must be positive
    #[test]
    fn test_total_price_must_be_positive() {
        assert!(validate_total_price(dec("0.01")).is_ok());
        assert!(validate_total_price(dec("150.00")).is_ok());
        assert!(validate_total_price(Decimal::ZERO).is_err());
        assert!(validate_total_price(dec("-10.00")).is_err());
    }

    /// Test the channel wire representation
    #[test]
    fn test_channel_representation() {
        assert_eq!(
            serde_json::to_value(SaleChannel::PhysicalStore).unwrap(),
            "physical_store"
        );
        assert_eq!(
            serde_json::to_value(SaleChannel::Marketplace).unwrap(),
            "marketplace"
        );
        assert_eq!(serde_json::to_value(SaleChannel::Other).unwrap(), "other");
    }

    /// Test that as_str matches the serialized form
    #[test]
    fn test_channel_as_str_matches_serde() {
        for channel in [
            SaleChannel::PhysicalStore,
            SaleChannel::Marketplace,
            SaleChannel::Other,
        ] {
            assert_eq!(serde_json::to_value(channel).unwrap(), channel.as_str());
        }
    }

    /// Test the default sale channel
    #[test]
    fn test_channel_default() {
        assert_eq!(SaleChannel::default(), SaleChannel::PhysicalStore);
    }

    /// Test channel parsing from the wire
    #[test]
    fn test_channel_parsing() {
        let channel: SaleChannel = serde_json::from_str("\"marketplace\"").unwrap();
        assert_eq!(channel, SaleChannel::Marketplace);

        let invalid: Result<SaleChannel, _> = serde_json::from_str("\"mail_order\"");
        assert!(invalid.is_err());
    }

    /// Test the stock decrement a sale implies
    #[test]
    fn test_sale_decrements_stock() {
        let stock = 10;
        let quantity = 3;
        assert_eq!(stock - quantity, 7);
    }

    /// Test that overselling is recorded rather than rejected
    #[test]
    fn test_oversell_recorded() {
        let stock = 1;
        let quantity = 2;
        assert_eq!(stock - quantity, -1);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating valid total prices (0.01 to 100000.00)
    fn total_price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every positive quantity is accepted
        #[test]
        fn prop_positive_quantity_accepted(quantity in 1i32..=100_000) {
            prop_assert!(validate_quantity(quantity).is_ok());
        }

        /// Zero and negative quantities are rejected
        #[test]
        fn prop_non_positive_quantity_rejected(quantity in -100_000i32..=0) {
            prop_assert!(validate_quantity(quantity).is_err());
        }

        /// Every positive total price is accepted
        #[test]
        fn prop_positive_total_price_accepted(total in total_price_strategy()) {
            prop_assert!(validate_total_price(total).is_ok());
        }

        /// Non-positive total prices are rejected
        #[test]
        fn prop_non_positive_total_price_rejected(cents in 0i64..=10_000_000) {
            let total = Decimal::new(-cents, 2);
            prop_assert!(validate_total_price(total).is_err());
        }

        /// The stock decrement always equals the quantity sold
        #[test]
        fn prop_decrement_equals_quantity(
            stock in -1000i32..=10_000,
            quantity in 1i32..=1000
        ) {
            let after = stock - quantity;
            prop_assert_eq!(stock - after, quantity);
        }
    }
}
