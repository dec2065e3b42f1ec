//! # Tier Resolver
//!
//! Maps an owner to a subscription tier, with a defined failure policy.
//!
//! ## Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Tier Resolution                                     │
//! │                                                                         │
//! │  current_tier(owner)                                                   │
//! │       │                                                                 │
//! │       ├── record found        → that tier                              │
//! │       ├── no record           → Basic                                  │
//! │       └── lookup failed       → Basic (warn, error absorbed)           │
//! │                                                                         │
//! │  set_tier(owner, tier)                                                 │
//! │       ├── upsert succeeded    → true                                   │
//! │       └── upsert failed       → false (warn, error absorbed); the      │
//! │                                 previous record stays intact           │
//! │                                                                         │
//! │  An unreachable tier service degrades to the most storage-constrained  │
//! │  but still functional tier — it never blocks the rest of the app and   │
//! │  never fails open to an unbounded tier.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use shopkeep_core::tier::Tier;
use shopkeep_core::types::TierRecord;
use shopkeep_store::RemoteStore;

use crate::config::{retry_read, write_once, ClientConfig};

/// Thin mapping from owner id to subscription tier.
///
/// ## Usage
/// ```rust,ignore
/// let tiers = TierResolver::new(store.clone());
///
/// let tier = tiers.current_tier("owner-1").await; // never fails
/// let ok = tiers.set_tier("owner-1", Tier::Premium).await;
/// ```
pub struct TierResolver {
    store: Arc<dyn RemoteStore>,
    config: ClientConfig,
}

impl TierResolver {
    /// Creates a resolver with the default timeout/retry policy.
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        TierResolver::with_config(store, ClientConfig::default())
    }

    /// Creates a resolver with an explicit policy.
    pub fn with_config(store: Arc<dyn RemoteStore>, config: ClientConfig) -> Self {
        TierResolver { store, config }
    }

    /// Resolves the owner's tier.
    ///
    /// Infallible by contract: a missing record or any lookup failure folds
    /// to [`Tier::Basic`]. The lookup is idempotent and runs under the
    /// read retry policy.
    pub async fn current_tier(&self, owner_id: &str) -> Tier {
        let lookup = retry_read(&self.config, || self.store.get_tier(owner_id)).await;

        match lookup {
            Ok(Some(record)) => record.tier,
            Ok(None) => {
                debug!(owner_id = %owner_id, "No tier record, defaulting to Basic");
                Tier::Basic
            }
            Err(e) => {
                warn!(owner_id = %owner_id, error = %e, "Tier lookup failed, defaulting to Basic");
                Tier::Basic
            }
        }
    }

    /// Upserts the owner's tier record with a fresh timestamp.
    ///
    /// Best-effort by contract: returns `true` on success, `false` on any
    /// failure (absorbed and logged, never thrown). A failed upsert leaves
    /// the previous record untouched. Writes are not auto-retried.
    pub async fn set_tier(&self, owner_id: &str, tier: Tier) -> bool {
        let record = TierRecord {
            owner_id: owner_id.to_string(),
            tier,
            updated_at: Utc::now(),
        };

        match write_once(&self.config, self.store.upsert_tier(record)).await {
            Ok(_) => {
                info!(owner_id = %owner_id, tier = %tier, "Tier updated");
                true
            }
            Err(e) => {
                warn!(owner_id = %owner_id, tier = %tier, error = %e, "Tier update failed");
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
