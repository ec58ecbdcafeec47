//! Price derivation for catalog products
//!
//! All selling prices are derived on read from the product's own pricing
//! fields and the current global [`FeeConfig`]. Nothing here is persisted;
//! editing the fee configuration changes the derived prices of every
//! product at once.
//!
//! All results are rounded half-up to two decimal places.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::FeeConfig;

/// Derived selling prices for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPricing {
    /// Floor price a vendor may negotiate down to
    pub min_price_allowed: Decimal,
    /// Physical store price; absent while no fee configuration exists
    pub physical_price: Option<Decimal>,
    /// Marketplace price; absent while no fee configuration exists
    pub marketplace_price: Option<Decimal>,
}

impl ProductPricing {
    /// Derive all selling prices for one product
    pub fn derive(
        cost_price: Decimal,
        recommended_price: Decimal,
        negotiation_margin: Decimal,
        fees: Option<&FeeConfig>,
    ) -> Self {
        Self {
            min_price_allowed: min_price_allowed(recommended_price, negotiation_margin),
            physical_price: fees.map(|f| physical_price(cost_price, f)),
            marketplace_price: fees.map(|f| marketplace_price(cost_price, f)),
        }
    }
}

/// Lowest price a vendor may close a deal at
///
/// `recommended_price * (1 - negotiation_margin / 100)`, rounded half-up.
pub fn min_price_allowed(recommended_price: Decimal, negotiation_margin: Decimal) -> Decimal {
    let margin_fraction = negotiation_margin / Decimal::from(100);
    round_currency(recommended_price * (Decimal::ONE - margin_fraction))
}

/// Physical store selling price
///
/// `(cost_price + cost_fixed) * (1 + physical_margin / 100)`, rounded half-up.
pub fn physical_price(cost_price: Decimal, fees: &FeeConfig) -> Decimal {
    let total_cost = cost_price + fees.cost_fixed;
    round_currency(total_cost * (Decimal::ONE + fees.physical_margin / Decimal::from(100)))
}

/// Marketplace selling price
///
/// The fixed per-order fee is added to the cost base, then the commission,
/// free shipping fee, and (when active) the highlight fee are applied as a
/// combined percentage surcharge.
pub fn marketplace_price(cost_price: Decimal, fees: &FeeConfig) -> Decimal {
    let total_cost = cost_price + fees.cost_fixed;
    let surcharge = fees.marketplace_commission
        + fees.free_shipping_fee
        + if fees.highlight_active {
            fees.highlight_fee
        } else {
            Decimal::ZERO
        };

    round_currency((total_cost + fees.fixed_fee) * (Decimal::ONE + surcharge / Decimal::from(100)))
}

fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn fees() -> FeeConfig {
        FeeConfig {
            id: Uuid::new_v4(),
            cost_fixed: dec("4.00"),
            physical_margin: dec("30.00"),
            marketplace_commission: dec("14.00"),
            free_shipping_fee: dec("6.00"),
            fixed_fee: dec("4.00"),
            highlight_active: false,
            highlight_fee: dec("3.00"),
        }
    }

    #[test]
    fn physical_price_reference_case() {
        // (100 + 4) * 1.30 = 135.20
        assert_eq!(physical_price(dec("100.00"), &fees()), dec("135.20"));
    }

    #[test]
    fn marketplace_price_reference_case() {
        // (100 + 4 + 4) * 1.20 = 129.60
        assert_eq!(marketplace_price(dec("100.00"), &fees()), dec("129.60"));
    }

    #[test]
    fn marketplace_price_includes_highlight_fee_when_active() {
        let mut config = fees();
        config.highlight_active = true;
        // (100 + 4 + 4) * 1.23 = 132.84
        assert_eq!(marketplace_price(dec("100.00"), &config), dec("132.84"));
    }

    #[test]
    fn min_price_reference_case() {
        // 200 * (1 - 0.25) = 150.00
        assert_eq!(min_price_allowed(dec("200.00"), dec("25.00")), dec("150.00"));
    }

    #[test]
    fn min_price_zero_margin_returns_recommended() {
        assert_eq!(min_price_allowed(dec("59.90"), Decimal::ZERO), dec("59.90"));
    }

    #[test]
    fn min_price_rounds_half_up() {
        // 10 * (1 - 0.125) = 8.75; 9.99 * 0.85 = 8.4915 -> 8.49
        assert_eq!(min_price_allowed(dec("10.00"), dec("12.50")), dec("8.75"));
        assert_eq!(min_price_allowed(dec("9.99"), dec("15.00")), dec("8.49"));
        // 0.125 midpoint rounds away from zero: 5 * 0.975 = 4.875 -> 4.88
        assert_eq!(min_price_allowed(dec("5.00"), dec("2.50")), dec("4.88"));
    }

    #[test]
    fn derive_without_config_leaves_channel_prices_absent() {
        let pricing = ProductPricing::derive(dec("100.00"), dec("200.00"), dec("25.00"), None);
        assert_eq!(pricing.min_price_allowed, dec("150.00"));
        assert_eq!(pricing.physical_price, None);
        assert_eq!(pricing.marketplace_price, None);
    }

    #[test]
    fn derive_with_config_fills_all_prices() {
        let config = fees();
        let pricing =
            ProductPricing::derive(dec("100.00"), dec("200.00"), dec("25.00"), Some(&config));
        assert_eq!(pricing.min_price_allowed, dec("150.00"));
        assert_eq!(pricing.physical_price, Some(dec("135.20")));
        assert_eq!(pricing.marketplace_price, Some(dec("129.60")));
    }
}
