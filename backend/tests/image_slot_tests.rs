//! Product image slot tests
//!
//! Tests for the five-slot image gallery:
//! - Lowest-free-slot allocation
//! - Position bounds and per-product capacity
//! - Upload size limits

use proptest::prelude::*;
use shared::validation::{
    lowest_free_slot, validate_image_position, validate_image_size, MAX_IMAGES_PER_PRODUCT,
    MAX_IMAGE_POSITION, MAX_IMAGE_SIZE_BYTES,
};

// ============================================================================
// Slot Resolution (mirrors the service rule)
// ============================================================================

/// The slot an upload lands in: the requested slot when it is free, the
/// lowest free slot otherwise
fn resolve_slot(requested: Option<i16>, occupied: &[i16]) -> Option<i16> {
    match requested {
        Some(slot) if !occupied.contains(&slot) => Some(slot),
        _ => lowest_free_slot(occupied),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test that an empty gallery allocates slot zero
    #[test]
    fn test_empty_gallery_gets_slot_zero() {
        assert_eq!(lowest_free_slot(&[]), Some(0));
    }

    /// Test sequential allocation
    #[test]
    fn test_sequential_allocation() {
        assert_eq!(lowest_free_slot(&[0]), Some(1));
        assert_eq!(lowest_free_slot(&[0, 1]), Some(2));
        assert_eq!(lowest_free_slot(&[0, 1, 2, 3]), Some(4));
    }

    /// Test that gaps are filled before appending
    #[test]
    fn test_gaps_filled_first() {
        assert_eq!(lowest_free_slot(&[0, 2]), Some(1));
        assert_eq!(lowest_free_slot(&[1, 2, 3, 4]), Some(0));
        assert_eq!(lowest_free_slot(&[0, 1, 3]), Some(2));
    }

    /// Test that the occupied list order does not matter
    #[test]
    fn test_occupied_order_irrelevant() {
        assert_eq!(lowest_free_slot(&[4, 0, 2]), Some(1));
        assert_eq!(lowest_free_slot(&[3, 1, 0]), Some(2));
    }

    /// Test that a full gallery has no free slot
    #[test]
    fn test_full_gallery_has_no_slot() {
        assert_eq!(lowest_free_slot(&[0, 1, 2, 3, 4]), None);
        assert_eq!(lowest_free_slot(&[4, 3, 2, 1, 0]), None);
    }

    /// Test that a free requested slot is honored
    #[test]
    fn test_requested_free_slot_honored() {
        assert_eq!(resolve_slot(Some(3), &[0, 1]), Some(3));
        assert_eq!(resolve_slot(Some(4), &[]), Some(4));
    }

    /// Test that an occupied requested slot falls back to the lowest free
    #[test]
    fn test_requested_occupied_slot_reassigned() {
        // Slot 2 is taken, so the upload lands in slot 1
        assert_eq!(resolve_slot(Some(2), &[0, 2]), Some(1));
        assert_eq!(resolve_slot(Some(0), &[0, 1]), Some(2));
    }

    /// Test that uploads without a requested slot take the lowest free
    #[test]
    fn test_no_request_takes_lowest_free() {
        assert_eq!(resolve_slot(None, &[0, 2]), Some(1));
        assert_eq!(resolve_slot(None, &[]), Some(0));
    }

    /// Test position bounds
    #[test]
    fn test_position_bounds() {
        for position in 0..=MAX_IMAGE_POSITION {
            assert!(validate_image_position(position).is_ok());
        }
        assert!(validate_image_position(5).is_err());
        assert!(validate_image_position(-1).is_err());
    }

    /// Test the gallery capacity constant
    #[test]
    fn test_capacity_matches_positions() {
        // Slots 0..=4 hold exactly the capacity
        assert_eq!(MAX_IMAGES_PER_PRODUCT, (MAX_IMAGE_POSITION as usize) + 1);
    }

    /// Test the image size limit
    #[test]
    fn test_image_size_limit() {
        assert!(validate_image_size(1024).is_ok());
        assert!(validate_image_size(MAX_IMAGE_SIZE_BYTES).is_ok());
        assert!(validate_image_size(MAX_IMAGE_SIZE_BYTES + 1).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating sets of occupied slots
    fn occupied_strategy() -> impl Strategy<Value = Vec<i16>> {
        prop::collection::hash_set(0i16..=MAX_IMAGE_POSITION, 0..=MAX_IMAGES_PER_PRODUCT)
            .prop_map(|set| set.into_iter().collect())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The allocated slot is never already occupied
        #[test]
        fn prop_allocated_slot_is_free(occupied in occupied_strategy()) {
            if let Some(slot) = lowest_free_slot(&occupied) {
                prop_assert!(!occupied.contains(&slot));
            }
        }

        /// The allocated slot is always within bounds
        #[test]
        fn prop_allocated_slot_in_bounds(occupied in occupied_strategy()) {
            if let Some(slot) = lowest_free_slot(&occupied) {
                prop_assert!((0..=MAX_IMAGE_POSITION).contains(&slot));
            }
        }

        /// Every slot below the allocated one is occupied
        #[test]
        fn prop_allocated_slot_is_lowest(occupied in occupied_strategy()) {
            if let Some(slot) = lowest_free_slot(&occupied) {
                for lower in 0..slot {
                    prop_assert!(occupied.contains(&lower));
                }
            }
        }

        /// Allocation fails exactly when the gallery is full
        #[test]
        fn prop_no_slot_iff_full(occupied in occupied_strategy()) {
            let full = occupied.len() >= MAX_IMAGES_PER_PRODUCT;
            prop_assert_eq!(lowest_free_slot(&occupied).is_none(), full);
        }

        /// Filling the returned slot eventually fills the gallery
        #[test]
        fn prop_repeated_allocation_terminates(mut occupied in occupied_strategy()) {
            let mut allocations = 0;
            while let Some(slot) = lowest_free_slot(&occupied) {
                occupied.push(slot);
                allocations += 1;
                prop_assert!(allocations <= MAX_IMAGES_PER_PRODUCT);
            }
            prop_assert_eq!(occupied.len(), MAX_IMAGES_PER_PRODUCT);
        }

        /// The resolved slot is never occupied, requested or not
        #[test]
        fn prop_resolved_slot_is_free(
            requested in prop::option::of(0i16..=MAX_IMAGE_POSITION),
            occupied in occupied_strategy()
        ) {
            if let Some(slot) = resolve_slot(requested, &occupied) {
                prop_assert!(!occupied.contains(&slot));
            }
        }

        /// A request for a free slot is always honored
        #[test]
        fn prop_free_request_honored(
            requested in 0i16..=MAX_IMAGE_POSITION,
            occupied in occupied_strategy()
        ) {
            let occupied: Vec<i16> =
                occupied.into_iter().filter(|&slot| slot != requested).collect();
            prop_assert_eq!(resolve_slot(Some(requested), &occupied), Some(requested));
        }
    }
}
