//! Stock ledger tests
//!
//! Tests for the stock history invariants:
//! - Every stock mutation is mirrored by one signed ledger entry
//! - The sum of all entries for a product reconstructs its stock
//! - Sales decrement, adjustments record the delta to the target level

use proptest::prelude::*;
use shared::models::StockReason;

// ============================================================================
// Ledger Logic (mirrors the service rules)
// ============================================================================

/// A stock-changing operation as the API accepts it
#[derive(Debug, Clone, Copy)]
enum StockOperation {
    /// A sale of n units, always decrements
    Sale(i32),
    /// A manual adjustment to an absolute target level
    SetTo(i32),
}

/// The signed ledger entry an operation produces, if any
fn ledger_entry(current_stock: i32, op: StockOperation) -> Option<i32> {
    match op {
        StockOperation::Sale(quantity) => Some(-quantity),
        StockOperation::SetTo(target) => {
            let delta = target - current_stock;
            // Setting stock to its current value writes nothing
            if delta == 0 {
                None
            } else {
                Some(delta)
            }
        }
    }
}

/// Stock level after applying an operation
fn apply(current_stock: i32, op: StockOperation) -> i32 {
    current_stock + ledger_entry(current_stock, op).unwrap_or(0)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test that a sale writes a negative entry of the sold quantity
    #[test]
    fn test_sale_entry_is_negative_quantity() {
        assert_eq!(ledger_entry(10, StockOperation::Sale(3)), Some(-3));
        assert_eq!(apply(10, StockOperation::Sale(3)), 7);
    }

    /// Test that an adjustment records the delta to the target
    #[test]
    fn test_adjustment_entry_is_delta() {
        // 10 -> 4 writes -6
        assert_eq!(ledger_entry(10, StockOperation::SetTo(4)), Some(-6));
        // 4 -> 25 writes +21
        assert_eq!(ledger_entry(4, StockOperation::SetTo(25)), Some(21));
    }

    /// Test that adjusting to the current level writes nothing
    #[test]
    fn test_adjustment_to_same_level_writes_nothing() {
        assert_eq!(ledger_entry(7, StockOperation::SetTo(7)), None);
        assert_eq!(apply(7, StockOperation::SetTo(7)), 7);
    }

    /// Test that overselling is recorded, not blocked
    #[test]
    fn test_oversell_goes_negative() {
        assert_eq!(apply(1, StockOperation::Sale(3)), -2);
    }

    /// Test that back-to-back sales each write their own entry
    #[test]
    fn test_back_to_back_sales_each_write_an_entry() {
        // Two sales of 3 against a stock of 5
        let mut stock = 5;
        let mut entries = vec![stock];

        for _ in 0..2 {
            entries.push(ledger_entry(stock, StockOperation::Sale(3)).unwrap());
            stock = apply(stock, StockOperation::Sale(3));
        }

        assert_eq!(stock, -1);
        assert_eq!(entries, vec![5, -3, -3]);
        assert_eq!(entries.iter().sum::<i32>(), stock);
    }

    /// Test recovering from negative stock through an adjustment
    #[test]
    fn test_adjustment_recovers_negative_stock() {
        let stock = apply(1, StockOperation::Sale(3));
        assert_eq!(stock, -2);

        assert_eq!(ledger_entry(stock, StockOperation::SetTo(10)), Some(12));
        assert_eq!(apply(stock, StockOperation::SetTo(10)), 10);
    }

    /// Test that an initial stock entry equals the starting level
    #[test]
    fn test_initial_stock_entry() {
        // A product created with stock n starts its ledger with +n
        let initial_stock = 15;
        let entries = vec![initial_stock];
        assert_eq!(entries.iter().sum::<i32>(), initial_stock);
    }

    /// Test the wire representation of ledger reasons
    #[test]
    fn test_reason_representation() {
        assert_eq!(
            serde_json::to_value(StockReason::NewStock).unwrap(),
            "new_stock"
        );
        assert_eq!(serde_json::to_value(StockReason::Sale).unwrap(), "sale");
        assert_eq!(
            serde_json::to_value(StockReason::ManualAdjustment).unwrap(),
            "manual_adjustment"
        );
        assert_eq!(
            serde_json::to_value(StockReason::InitialStock).unwrap(),
            "initial_stock"
        );
    }

    /// Test that as_str matches the serialized form
    #[test]
    fn test_reason_as_str_matches_serde() {
        for reason in [
            StockReason::NewStock,
            StockReason::Sale,
            StockReason::ManualAdjustment,
            StockReason::InitialStock,
        ] {
            assert_eq!(serde_json::to_value(reason).unwrap(), reason.as_str());
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating sale quantities
    fn quantity_strategy() -> impl Strategy<Value = i32> {
        1i32..=1000
    }

    /// Strategy for generating stock-changing operations
    fn operation_strategy() -> impl Strategy<Value = StockOperation> {
        prop_oneof![
            quantity_strategy().prop_map(StockOperation::Sale),
            (0i32..=5000).prop_map(StockOperation::SetTo),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The ledger reconstructs the stock level after any operation mix
        #[test]
        fn prop_ledger_sum_reconstructs_stock(
            initial_stock in 0i32..=5000,
            operations in prop::collection::vec(operation_strategy(), 0..30)
        ) {
            let mut stock = initial_stock;
            // Ledger opens with the initial stock entry
            let mut entries = vec![initial_stock];

            for op in operations {
                if let Some(change) = ledger_entry(stock, op) {
                    entries.push(change);
                }
                stock = apply(stock, op);
            }

            prop_assert_eq!(entries.iter().sum::<i32>(), stock);
        }

        /// Applying the adjustment delta always lands on the target
        #[test]
        fn prop_adjustment_lands_on_target(
            current in -1000i32..=5000,
            target in 0i32..=5000
        ) {
            prop_assert_eq!(apply(current, StockOperation::SetTo(target)), target);
        }

        /// Sale entries are always negative
        #[test]
        fn prop_sale_entries_negative(
            current in -1000i32..=5000,
            quantity in quantity_strategy()
        ) {
            let entry = ledger_entry(current, StockOperation::Sale(quantity));
            prop_assert!(entry.is_some());
            prop_assert!(entry.unwrap() < 0);
        }

        /// A sale always decrements by exactly the quantity sold
        #[test]
        fn prop_sale_decrements_by_quantity(
            current in -1000i32..=5000,
            quantity in quantity_strategy()
        ) {
            prop_assert_eq!(apply(current, StockOperation::Sale(quantity)), current - quantity);
        }

        /// An entry is written if and only if the stock level changed
        #[test]
        fn prop_entry_iff_stock_changed(
            current in 0i32..=5000,
            op in operation_strategy()
        ) {
            let after = apply(current, op);
            let entry = ledger_entry(current, op);

            prop_assert_eq!(entry.is_some(), after != current);
            if let Some(change) = entry {
                prop_assert_eq!(current + change, after);
            }
        }
    }
}
