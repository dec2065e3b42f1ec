//! # Sale Recording
//!
//! The compound sale operation: ledger insert, then stock decrement.
//!
//! ## Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     record_sale (per line)                              │
//! │                                                                         │
//! │  1. Resolve the product from the inventory snapshot                    │
//! │     └── price and stock are read from the local cache                  │
//! │  2. Guard: requested <= quantity in stock                              │
//! │  3. INSERT the Sale (price = unit price × quantity)                    │
//! │  4. update_product(quantity - sold) through the InventoryStore         │
//! │     └── which runs the low-stock watcher on the result                 │
//! │                                                                         │
//! │  There is no compensating rollback across the two collections: when    │
//! │  step 4 fails after step 3 landed, the error is PartialSale carrying   │
//! │  the recorded sale id, and the caller decides how to reconcile.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use shopkeep_core::error::ValidationError;
use shopkeep_core::types::{NewSale, ProductPatch, Sale};
use shopkeep_core::validation::validate_sale_quantity;
use shopkeep_store::RemoteStore;

use crate::config::{retry_read, write_once, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::inventory::InventoryStore;
use crate::session::Session;

/// One line of a sale: a product and how many units were sold.
#[derive(Debug, Clone)]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: i64,
}

impl SaleLine {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        SaleLine {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Records sales against the ledger and decrements stock through the
/// inventory store.
pub struct SaleRecorder {
    store: Arc<dyn RemoteStore>,
    inventory: Arc<InventoryStore>,
    session: Session,
    config: ClientConfig,
}

impl SaleRecorder {
    /// Creates a recorder with the default timeout policy.
    pub fn new(
        store: Arc<dyn RemoteStore>,
        inventory: Arc<InventoryStore>,
        session: Session,
    ) -> Self {
        SaleRecorder::with_config(store, inventory, session, ClientConfig::default())
    }

    /// Creates a recorder with an explicit policy.
    pub fn with_config(
        store: Arc<dyn RemoteStore>,
        inventory: Arc<InventoryStore>,
        session: Session,
        config: ClientConfig,
    ) -> Self {
        SaleRecorder {
            store,
            inventory,
            session,
            config,
        }
    }

    /// Records one sale per line, decrementing each product's stock.
    ///
    /// Lines are processed in order; the first failure aborts the rest.
    /// Prices are locked from the cached product at recording time.
    pub async fn record_sale(
        &self,
        lines: &[SaleLine],
        sale_date: DateTime<Utc>,
        notes: Option<String>,
    ) -> ClientResult<Vec<Sale>> {
        let owner = self
            .session
            .current_owner()
            .ok_or(ClientError::NotAuthenticated)?;

        if lines.is_empty() {
            return Err(ValidationError::Required {
                field: "sale lines".to_string(),
            }
            .into());
        }

        let mut recorded = Vec::with_capacity(lines.len());
        for line in lines {
            let sale = self
                .record_line(&owner, line, sale_date, notes.clone())
                .await?;
            recorded.push(sale);
        }

        info!(count = recorded.len(), "Sale recorded");
        Ok(recorded)
    }

    async fn record_line(
        &self,
        owner: &str,
        line: &SaleLine,
        sale_date: DateTime<Utc>,
        notes: Option<String>,
    ) -> ClientResult<Sale> {
        validate_sale_quantity(line.quantity)?;

        // Price and stock come from the local cache, like the product list
        // the seller just picked from.
        let product = self
            .inventory
            .products()
            .into_iter()
            .find(|p| p.id == line.product_id)
            .ok_or_else(|| ClientError::NotFound {
                entity: "Product".to_string(),
                id: line.product_id.clone(),
            })?;

        if !product.can_sell(line.quantity) {
            return Err(ClientError::InsufficientStock {
                title: product.title.clone(),
                available: product.quantity,
                requested: line.quantity,
            });
        }

        let new_sale = NewSale {
            product_id: product.id.clone(),
            quantity_sold: line.quantity,
            sale_price_cents: product.price_cents * line.quantity,
            sale_date,
            notes,
        };

        let sale = write_once(&self.config, self.store.insert_sale(owner, new_sale)).await?;

        // Decrement stock through the inventory store so the cache updates
        // and the low-stock watcher runs.
        let new_quantity = product.quantity - line.quantity;
        if let Err(e) = self
            .inventory
            .update_product(&product.id, ProductPatch::quantity(new_quantity))
            .await
        {
            warn!(
                sale_id = %sale.id,
                product_id = %product.id,
                error = %e,
                "Sale recorded but stock decrement failed"
            );
            return Err(ClientError::PartialSale {
                sale_id: sale.id,
                source: Box::new(e),
            });
        }

        Ok(sale)
    }

    /// Lists the owner's sales, most recent first.
    pub async fn list_sales(&self) -> ClientResult<Vec<Sale>> {
        let owner = self
            .session
            .current_owner()
            .ok_or(ClientError::NotAuthenticated)?;

        retry_read(&self.config, || self.store.select_sales(&owner)).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
