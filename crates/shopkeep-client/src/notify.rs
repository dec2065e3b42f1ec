//! # Notification Sink
//!
//! The fire-and-forget alert channel and the low-stock watcher.
//!
//! ## Delivery Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Low-Stock Notification Path                           │
//! │                                                                         │
//! │  update_product / sale decrement succeeds                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LowStockWatcher::observe(updated product)                             │
//! │       │                                                                 │
//! │       ├── outside the reorder band → re-arm latch, done                │
//! │       ├── in band, already latched → done (no duplicate alert)         │
//! │       │                                                                 │
//! │       ▼ fresh crossing                                                  │
//! │  Notifier::notify("Low Stock Alert", "<title> has <n> items ...")      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LogNotifier (tracing) / push transport / BufferNotifier (tests)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, info};

use shopkeep_core::stock::LowStockTracker;
use shopkeep_core::types::Product;

/// Title used for every low-stock alert.
pub const LOW_STOCK_TITLE: &str = "Low Stock Alert";

// =============================================================================
// Notifier
// =============================================================================

/// Fire-and-forget alert sink.
///
/// Delivery is best-effort by contract: implementations swallow transport
/// failures, callers never wait on delivery outcome.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Schedules an alert with the given title and body.
    async fn notify(&self, title: &str, body: &str);
}

/// Notifier that writes alerts to the log. Default wiring when no push
/// transport is attached.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, title: &str, body: &str) {
        info!(title = %title, body = %body, "Notification");
    }
}

/// Notifier that records alerts in memory for assertions.
#[derive(Debug, Default)]
pub struct BufferNotifier {
    messages: Mutex<Vec<(String, String)>>,
}

impl BufferNotifier {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        BufferNotifier::default()
    }

    /// Returns a copy of all recorded (title, body) pairs.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().expect("notifier lock poisoned").clone()
    }

    /// Number of recorded alerts.
    pub fn len(&self) -> usize {
        self.messages.lock().expect("notifier lock poisoned").len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Notifier for BufferNotifier {
    async fn notify(&self, title: &str, body: &str) {
        self.messages
            .lock()
            .expect("notifier lock poisoned")
            .push((title.to_string(), body.to_string()));
    }
}

// =============================================================================
// Low-Stock Watcher
// =============================================================================

/// Glue between the latching tracker and the notifier.
///
/// Shared by the inventory store and the sale recorder so a product latched
/// by one path stays latched for the other.
pub struct LowStockWatcher {
    tracker: Mutex<LowStockTracker>,
    notifier: Arc<dyn Notifier>,
}

impl LowStockWatcher {
    /// Creates a watcher emitting into `notifier`.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        LowStockWatcher {
            tracker: Mutex::new(LowStockTracker::new()),
            notifier,
        }
    }

    /// Observes a product after a successful update and emits the alert on
    /// a fresh crossing into the reorder band.
    pub async fn observe(&self, product: &Product) {
        let alert = {
            let mut tracker = self.tracker.lock().expect("tracker lock poisoned");
            tracker.observe(product)
        };

        if let Some(alert) = alert {
            debug!(
                product_id = %alert.product_id,
                quantity = alert.quantity,
                threshold = alert.reorder_point,
                "Low stock crossing"
            );
            self.notifier.notify(LOW_STOCK_TITLE, &alert.message()).await;
        }
    }

    /// Drops latch state for a removed product.
    pub fn forget(&self, product_id: &str) {
        self.tracker
            .lock()
            .expect("tracker lock poisoned")
            .forget(product_id);
    }

    /// Clears all latch state (owner switch).
    pub fn reset(&self) {
        self.tracker
            .lock()
            .expect("tracker lock poisoned")
            .reset();
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

    #[tokio::test]
    async fn test_watcher_emits_once_per_crossing() {
        let buffer = Arc::new(BufferNotifier::new());
        let watcher = LowStockWatcher::new(buffer.clone());

        watcher.observe(&product(3, Some(5))).await;
        watcher.observe(&product(2, Some(5))).await;
        assert_eq!(buffer.len(), 1);

        let (title, body) = buffer.messages()[0].clone();
        assert_eq!(title, LOW_STOCK_TITLE);
        assert_eq!(body, "Blue Mug has 3 items remaining (threshold: 5)");

        // Restock re-arms, next crossing emits again.
        watcher.observe(&product(9, Some(5))).await;
        watcher.observe(&product(4, Some(5))).await;
        assert_eq!(buffer.len(), 2);
    }

    #[tokio::test]
    async fn test_watcher_ignores_healthy_and_zero_stock() {
        let buffer = Arc::new(BufferNotifier::new());
        let watcher = LowStockWatcher::new(buffer.clone());

        watcher.observe(&product(10, Some(5))).await;
        watcher.observe(&product(0, Some(5))).await;
        watcher.observe(&product(3, None)).await;
        assert!(buffer.is_empty());
    }
}
