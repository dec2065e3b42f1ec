//! # Low-Stock Rules
//!
//! The reorder-band rule and the per-product alert latch.
//!
//! ## The Reorder Band
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Low-Stock Decision                                  │
//! │                                                                         │
//! │  quantity                                                               │
//! │     │                                                                   │
//! │     │   quantity > reorder_point      → healthy, no alert              │
//! │  ───┼── reorder_point ──────────────────────────────────────────        │
//! │     │   0 < quantity <= reorder_point → reorder band, ALERT            │
//! │  ───┼── 0 ──────────────────────────────────────────────────────        │
//! │     │   quantity == 0                 → out of stock, NO alert         │
//! │                                                                         │
//! │  Out-of-stock is a distinct condition from "time to reorder":          │
//! │  only the band above zero fires the alert.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Latching
//! [`check_low_stock`] is a pure threshold comparison: called twice on the
//! same low-stock product it reports the alert twice. [`LowStockTracker`]
//! adds the per-product latch so repeated updates inside the band emit one
//! alert, re-arming only when the quantity climbs back above the threshold.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Product;

// =============================================================================
// Alert
// =============================================================================

/// A low-stock condition on one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LowStockAlert {
    pub product_id: String,
    pub title: String,
    pub quantity: i64,
    pub reorder_point: i64,
}

impl LowStockAlert {
    /// The notification body shown to the user.
    pub fn message(&self) -> String {
        format!(
            "{} has {} items remaining (threshold: {})",
            self.title, self.quantity, self.reorder_point
        )
    }
}

// =============================================================================
// Pure Check
// =============================================================================

/// True iff the product sits in the reorder band: `reorder_point` set and
/// `0 < quantity <= reorder_point`.
pub fn is_low_stock(product: &Product) -> bool {
    match product.reorder_point {
        Some(threshold) => product.quantity > 0 && product.quantity <= threshold,
        None => false,
    }
}

/// Evaluates the reorder band for a product.
///
/// Returns the alert when the product is in the band, `None` otherwise.
/// No latch state: re-evaluating an unchanged low-stock product reports the
/// alert again.
pub fn check_low_stock(product: &Product) -> Option<LowStockAlert> {
    if !is_low_stock(product) {
        return None;
    }
    let threshold = product.reorder_point?;
    Some(LowStockAlert {
        product_id: product.id.clone(),
        title: product.title.clone(),
        quantity: product.quantity,
        reorder_point: threshold,
    })
}

// =============================================================================
// Latching Tracker
// =============================================================================

/// Per-product alert latch.
///
/// ## Invariants
/// - A product id is latched iff its last observed state was in the band.
/// - `observe` returns an alert only on a fresh crossing into the band.
/// - Leaving the band (quantity above threshold, threshold cleared, or
///   quantity zero) re-arms the latch.
#[derive(Debug, Clone, Default)]
pub struct LowStockTracker {
    latched: HashSet<String>,
}

impl LowStockTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        LowStockTracker::default()
    }

    /// Observes a product after an update.
    ///
    /// ## Behavior
    /// - In the band and not latched: latches, returns the alert.
    /// - In the band and already latched: returns `None`.
    /// - Out of the band: re-arms, returns `None`.
    pub fn observe(&mut self, product: &Product) -> Option<LowStockAlert> {
        match check_low_stock(product) {
            Some(alert) => {
                if self.latched.insert(product.id.clone()) {
                    Some(alert)
                } else {
                    None
                }
            }
            None => {
                self.latched.remove(&product.id);
                None
            }
        }
    }

    /// Drops latch state for a removed product.
    pub fn forget(&mut self, product_id: &str) {
        self.latched.remove(product_id);
    }

    /// Clears all latch state (owner switch, full refetch).
    pub fn reset(&mut self) {
        self.latched.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(quantity: i64, reorder_point: Option<i64>) -> Product {
        Product {
            id: "p-1".to_string(),
            owner_id: "owner-1".to_string(),
            title: "Blue Mug".to_string(),
            price_cents: 1250,
            quantity,
            category: None,
            sku: None,
            image_url: None,
            reorder_point,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_alert_without_reorder_point() {
        assert_eq!(check_low_stock(&product(1, None)), None);
    }

    #[test]
    fn test_no_alert_at_zero_quantity() {
        // Out-of-stock is excluded from the reorder alert.
        assert_eq!(check_low_stock(&product(0, Some(5))), None);
    }

    #[test]
    fn test_no_alert_above_threshold() {
        assert_eq!(check_low_stock(&product(6, Some(5))), None);
    }

    #[test]
    fn test_alert_inside_band() {
        let alert = check_low_stock(&product(5, Some(5))).unwrap();
        assert_eq!(alert.quantity, 5);
        assert_eq!(alert.reorder_point, 5);
        assert_eq!(
            alert.message(),
            "Blue Mug has 5 items remaining (threshold: 5)"
        );

        assert!(check_low_stock(&product(1, Some(5))).is_some());
    }

    #[test]
    fn test_pure_check_has_no_memory() {
        let p = product(3, Some(5));
        assert!(check_low_stock(&p).is_some());
        assert!(check_low_stock(&p).is_some());
    }

    #[test]
    fn test_tracker_fires_once_per_crossing() {
        let mut tracker = LowStockTracker::new();

        // First crossing into the band fires.
        assert!(tracker.observe(&product(5, Some(10))).is_some());
        // Further updates inside the band stay quiet.
        assert!(tracker.observe(&product(4, Some(10))).is_none());
        assert!(tracker.observe(&product(2, Some(10))).is_none());

        // Restock above the threshold re-arms the latch.
        assert!(tracker.observe(&product(11, Some(10))).is_none());
        // Next crossing fires again.
        assert!(tracker.observe(&product(9, Some(10))).is_some());
    }

    #[test]
    fn test_tracker_zero_quantity_rearms_without_firing() {
        let mut tracker = LowStockTracker::new();

        assert!(tracker.observe(&product(2, Some(5))).is_some());
        // Final unit sold: no alert, latch released.
        assert!(tracker.observe(&product(0, Some(5))).is_none());
        // Restock straight into the band fires again.
        assert!(tracker.observe(&product(3, Some(5))).is_some());
    }

    #[test]
    fn test_tracker_forget_and_reset() {
        let mut tracker = LowStockTracker::new();
        assert!(tracker.observe(&product(2, Some(5))).is_some());

        tracker.forget("p-1");
        assert!(tracker.observe(&product(2, Some(5))).is_some());

        tracker.reset();
        assert!(tracker.observe(&product(2, Some(5))).is_some());
    }
}
