//! # Inventory Store
//!
//! The owner-scoped product cache and its mutation vocabulary.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Store Operations                           │
//! │                                                                         │
//! │  Frontend Action         Operation              Cache Change            │
//! │  ───────────────         ─────────              ────────────            │
//! │                                                                         │
//! │  Open products  ───────► fetch_products() ────► SetProducts(list)      │
//! │                                                                         │
//! │  Add product    ───────► add_product()    ────► AddProduct (prepend)   │
//! │                           │                                             │
//! │                           ├── tier cap check against the remote count  │
//! │                           └── LimitExceeded stops before the insert    │
//! │                                                                         │
//! │  Edit / sell    ───────► update_product() ────► UpdateProduct (by id)  │
//! │                           └── low-stock watcher runs on the result     │
//! │                                                                         │
//! │  Remove         ───────► delete_product() ────► DeleteProduct(id)      │
//! │                                                                         │
//! │  NOTE: the cache mutates only after the remote call succeeds; a        │
//! │  failure records the error string and leaves the list untouched.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization of Mutations
//! The tier cap check is check-then-act: two concurrent adds could both
//! pass the count before either insert lands. All mutating operations
//! therefore queue on one async lock per store — the sole client-side
//! writer for the owner. Fetches stay concurrent; a fetch that loses the
//! race to a newer one is discarded by generation instead.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info};

use shopkeep_core::types::{NewProduct, Product, ProductPatch};
use shopkeep_core::validation::{validate_new_product, validate_product_patch};
use shopkeep_store::RemoteStore;

use crate::config::{retry_read, write_once, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::notify::{LowStockWatcher, Notifier};
use crate::session::Session;
use crate::tier::TierResolver;

// =============================================================================
// State & Commands
// =============================================================================

/// The state snapshot handed to the presentation layer.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryState {
    /// The owner's products, newest first.
    pub products: Vec<Product>,
    /// True while an operation is in flight.
    pub is_loading: bool,
    /// Last operation failure, for the error banner. Cleared on success.
    pub error: Option<String>,
}

/// The mutation vocabulary applied to [`InventoryState`].
///
/// Exactly one reducer function interprets these; nothing else touches the
/// state.
#[derive(Debug, Clone)]
pub enum InventoryCommand {
    /// Replace the whole list (fetch result).
    SetProducts(Vec<Product>),
    /// Prepend a newly created product (newest-first order preserved).
    AddProduct(Product),
    /// Replace the entry with the same id.
    UpdateProduct(Product),
    /// Remove the entry with this id.
    DeleteProduct(String),
    /// Flip the loading flag.
    SetLoading(bool),
    /// Record an operation failure.
    SetError(String),
    /// Clear a previously recorded failure.
    ClearError,
}

/// Applies one command to the state.
fn reduce(state: &mut InventoryState, command: InventoryCommand) {
    match command {
        InventoryCommand::SetProducts(products) => state.products = products,
        InventoryCommand::AddProduct(product) => state.products.insert(0, product),
        InventoryCommand::UpdateProduct(product) => {
            if let Some(slot) = state.products.iter_mut().find(|p| p.id == product.id) {
                *slot = product;
            }
        }
        InventoryCommand::DeleteProduct(id) => state.products.retain(|p| p.id != id),
        InventoryCommand::SetLoading(loading) => state.is_loading = loading,
        InventoryCommand::SetError(message) => state.error = Some(message),
        InventoryCommand::ClearError => state.error = None,
    }
}

// =============================================================================
// Inventory Store
// =============================================================================

/// Owner-scoped product cache, synchronized with the remote store.
///
/// ## Usage
/// ```rust,ignore
/// let inventory = InventoryStore::new(store, session, Arc::new(LogNotifier));
///
/// inventory.fetch_products().await?;
/// inventory.add_product(NewProduct::new("Blue Mug", 1250, 10)).await?;
/// let snapshot = inventory.state();
/// ```
pub struct InventoryStore {
    store: Arc<dyn RemoteStore>,
    tiers: TierResolver,
    session: Session,
    watcher: LowStockWatcher,
    config: ClientConfig,

    state: Mutex<InventoryState>,
    /// Owner the cache was built for; a mismatch with the session resets it.
    cached_owner: Mutex<Option<String>>,
    /// Serializes mutating operations (the per-owner mutation queue).
    op_lock: tokio::sync::Mutex<()>,
    /// Generation counter keying in-flight fetches.
    fetch_seq: AtomicU64,
}

impl InventoryStore {
    /// Creates a store with the default timeout/retry policy.
    pub fn new(store: Arc<dyn RemoteStore>, session: Session, notifier: Arc<dyn Notifier>) -> Self {
        InventoryStore::with_config(store, session, notifier, ClientConfig::default())
    }

    /// Creates a store with an explicit policy.
    pub fn with_config(
        store: Arc<dyn RemoteStore>,
        session: Session,
        notifier: Arc<dyn Notifier>,
        config: ClientConfig,
    ) -> Self {
        InventoryStore {
            tiers: TierResolver::with_config(store.clone(), config.clone()),
            store,
            session,
            watcher: LowStockWatcher::new(notifier),
            config,
            state: Mutex::new(InventoryState::default()),
            cached_owner: Mutex::new(None),
            op_lock: tokio::sync::Mutex::new(()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// A snapshot of the current state. Never blocks on in-flight remote
    /// calls.
    pub fn state(&self) -> InventoryState {
        self.state.lock().expect("inventory state lock poisoned").clone()
    }

    /// The cached product list, newest first.
    pub fn products(&self) -> Vec<Product> {
        self.state().products
    }

    fn apply(&self, command: InventoryCommand) {
        let mut state = self.state.lock().expect("inventory state lock poisoned");
        reduce(&mut state, command);
    }

    /// Resolves the current owner, or fails when signed out.
    fn require_owner(&self) -> ClientResult<String> {
        self.session
            .current_owner()
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Resets cache and latch state when the owner changed since the last
    /// operation (login/logout transition).
    fn sync_owner(&self, owner_id: &str) {
        let mut cached = self.cached_owner.lock().expect("owner lock poisoned");
        if cached.as_deref() == Some(owner_id) {
            return;
        }

        info!(owner_id = %owner_id, "Owner changed, resetting inventory cache");
        *cached = Some(owner_id.to_string());
        drop(cached);

        let mut state = self.state.lock().expect("inventory state lock poisoned");
        *state = InventoryState::default();
        drop(state);

        self.watcher.reset();
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Fetches the owner's products, newest first, replacing the local list.
    ///
    /// ## Failure Semantics
    /// - Runs under the read retry policy (idempotent).
    /// - On failure the error string is recorded and the previous list is
    ///   kept: the UI shows stale data with an error banner, it never goes
    ///   blank.
    /// - `is_loading` clears on every exit path.
    /// - A completion superseded by a newer fetch is discarded; the fetched
    ///   list is still returned to the caller.
    pub async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
        let owner = self.require_owner()?;
        self.sync_owner(&owner);

        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(InventoryCommand::SetLoading(true));

        let result = retry_read(&self.config, || self.store.select_products(&owner)).await;

        match result {
            Ok(products) => {
                if self.fetch_seq.load(Ordering::SeqCst) == seq {
                    debug!(count = products.len(), "Fetched products");
                    self.apply(InventoryCommand::SetProducts(products.clone()));
                    self.apply(InventoryCommand::ClearError);
                } else {
                    debug!(seq, "Discarding stale fetch completion");
                }
                self.apply(InventoryCommand::SetLoading(false));
                Ok(products)
            }
            Err(e) => {
                self.apply(InventoryCommand::SetError(e.to_string()));
                self.apply(InventoryCommand::SetLoading(false));
                Err(e)
            }
        }
    }

    /// Creates a product after enforcing the tier cap.
    ///
    /// ## Algorithm
    /// 1. Resolve the owner's tier (fail-open to Basic).
    /// 2. Ask the remote store for the authoritative product count — not
    ///    the cache length, which can be stale across devices.
    /// 3. At or over the cap: fail with [`ClientError::LimitExceeded`]
    ///    without attempting the insert.
    /// 4. Insert, then prepend to the cache.
    ///
    /// Count or insert failures record the error and leave everything
    /// unapplied. The whole sequence holds the mutation lock, so two rapid
    /// adds cannot both pass the count check.
    pub async fn add_product(&self, new: NewProduct) -> ClientResult<Product> {
        let owner = self.require_owner()?;
        self.sync_owner(&owner);
        validate_new_product(&new)?;

        let _guard = self.op_lock.lock().await;
        self.apply(InventoryCommand::SetLoading(true));

        let result = self.add_product_inner(&owner, new).await;

        match &result {
            Ok(product) => {
                info!(id = %product.id, title = %product.title, "Product added");
                self.apply(InventoryCommand::AddProduct(product.clone()));
                self.apply(InventoryCommand::ClearError);
            }
            Err(e) => {
                self.apply(InventoryCommand::SetError(e.to_string()));
            }
        }
        self.apply(InventoryCommand::SetLoading(false));

        result
    }

    async fn add_product_inner(&self, owner: &str, new: NewProduct) -> ClientResult<Product> {
        let tier = self.tiers.current_tier(owner).await;
        let count = write_once(&self.config, self.store.count_products(owner)).await?;

        if let Some(limit) = tier.max_products() {
            if count >= limit as i64 {
                debug!(count, limit, %tier, "Product cap reached");
                return Err(ClientError::LimitExceeded { tier, limit });
            }
        }

        write_once(&self.config, self.store.insert_product(owner, new)).await
    }

    /// Applies a partial update, owner-scoped.
    ///
    /// On success the cache entry is replaced by id and the low-stock
    /// watcher observes the updated record. An id the owner does not hold
    /// resolves to [`ClientError::NotFound`] — zero rows are touched
    /// remotely.
    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> ClientResult<Product> {
        let owner = self.require_owner()?;
        self.sync_owner(&owner);
        validate_product_patch(&patch)?;

        let _guard = self.op_lock.lock().await;
        self.apply(InventoryCommand::SetLoading(true));

        let result = write_once(&self.config, self.store.update_product(&owner, id, patch)).await;

        match &result {
            Ok(product) => {
                debug!(id = %product.id, quantity = product.quantity, "Product updated");
                self.apply(InventoryCommand::UpdateProduct(product.clone()));
                self.apply(InventoryCommand::ClearError);
            }
            Err(e) => {
                self.apply(InventoryCommand::SetError(e.to_string()));
            }
        }
        self.apply(InventoryCommand::SetLoading(false));

        if let Ok(product) = &result {
            self.watcher.observe(product).await;
        }

        result
    }

    /// Deletes a product, owner-scoped, then drops it from the cache.
    pub async fn delete_product(&self, id: &str) -> ClientResult<()> {
        let owner = self.require_owner()?;
        self.sync_owner(&owner);

        let _guard = self.op_lock.lock().await;
        self.apply(InventoryCommand::SetLoading(true));

        let result = write_once(&self.config, self.store.delete_product(&owner, id)).await;

        match &result {
            Ok(()) => {
                info!(id = %id, "Product deleted");
                self.apply(InventoryCommand::DeleteProduct(id.to_string()));
                self.apply(InventoryCommand::ClearError);
                self.watcher.forget(id);
            }
            Err(e) => {
                self.apply(InventoryCommand::SetError(e.to_string()));
            }
        }
        self.apply(InventoryCommand::SetLoading(false));

        result
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shopkeep_core::tier::Tier;
    use shopkeep_core::types::TierRecord;
    use shopkeep_store::{MemoryStore, StoreError};

    use crate::notify::BufferNotifier;

    use chrono::Utc;

    const OWNER: &str = "owner-1";
    const OTHER: &str = "owner-2";

    struct Fixture {
        store: Arc<MemoryStore>,
        session: Session,
        buffer: Arc<BufferNotifier>,
        inventory: InventoryStore,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let session = Session::signed_in(OWNER);
        let buffer = Arc::new(BufferNotifier::new());
        let inventory = InventoryStore::with_config(
            store.clone(),
            session.clone(),
            buffer.clone(),
            ClientConfig::fail_fast(),
        );
        Fixture {
            store,
            session,
            buffer,
            inventory,
        }
    }

    async fn set_tier(store: &MemoryStore, owner: &str, tier: Tier) {
        store
            .upsert_tier(TierRecord {
                owner_id: owner.to_string(),
                tier,
                updated_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    async fn seed_products(store: &MemoryStore, owner: &str, count: usize) {
        for i in 0..count {
            store
                .insert_product(owner, NewProduct::new(format!("Seed {}", i), 100, 1))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_operations_require_sign_in() {
        let f = fixture();
        f.session.sign_out();

        let err = f.inventory.fetch_products().await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));

        let err = f
            .inventory
            .add_product(NewProduct::new("Blue Mug", 1250, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_fetch_is_newest_first_and_idempotent() {
        let f = fixture();
        seed_products(&f.store, OWNER, 3).await;

        let first = f.inventory.fetch_products().await.unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].title, "Seed 2"); // newest first
        assert_eq!(first[2].title, "Seed 0");

        let second = f.inventory.fetch_products().await.unwrap();
        assert_eq!(first, second);

        let state = f.inventory.state();
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_stale_list() {
        let f = fixture();
        seed_products(&f.store, OWNER, 2).await;
        f.inventory.fetch_products().await.unwrap();

        f.store.set_failing(true);
        let err = f.inventory.fetch_products().await.unwrap_err();
        assert!(matches!(err, ClientError::Store(StoreError::Unavailable)));

        let state = f.inventory.state();
        assert_eq!(state.products.len(), 2); // stale but present
        assert!(state.error.is_some());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_add_product_prepends() {
        let f = fixture();
        seed_products(&f.store, OWNER, 2).await;
        f.inventory.fetch_products().await.unwrap();

        let product = f
            .inventory
            .add_product(NewProduct::new("Blue Mug", 1250, 10))
            .await
            .unwrap();

        let state = f.inventory.state();
        assert_eq!(state.products.len(), 3);
        assert_eq!(state.products[0].id, product.id);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_add_product_under_basic_cap_succeeds() {
        // Tier=Basic, count=49: the add lands and the count becomes 50.
        let f = fixture();
        set_tier(&f.store, OWNER, Tier::Basic).await;
        seed_products(&f.store, OWNER, 49).await;

        f.inventory
            .add_product(NewProduct::new("Fiftieth", 100, 1))
            .await
            .unwrap();

        assert_eq!(f.store.count_products(OWNER).await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_add_product_at_basic_cap_fails_without_insert() {
        // Tier=Basic, count=50: LimitExceeded, and the insert never ran.
        let f = fixture();
        set_tier(&f.store, OWNER, Tier::Basic).await;
        seed_products(&f.store, OWNER, 50).await;
        f.inventory.fetch_products().await.unwrap();

        let inserts_before = f
            .store
            .product_inserts
            .load(std::sync::atomic::Ordering::SeqCst);

        let err = f
            .inventory
            .add_product(NewProduct::new("One too many", 100, 1))
            .await
            .unwrap_err();

        match err {
            ClientError::LimitExceeded { tier, limit } => {
                assert_eq!(tier, Tier::Basic);
                assert_eq!(limit, 50);
            }
            other => panic!("expected LimitExceeded, got {:?}", other),
        }

        assert_eq!(
            f.store
                .product_inserts
                .load(std::sync::atomic::Ordering::SeqCst),
            inserts_before
        );
        // Local list unchanged.
        assert_eq!(f.inventory.products().len(), 50);
        assert!(f.inventory.state().error.is_some());
    }

    #[tokio::test]
    async fn test_missing_tier_record_caps_at_basic() {
        // No tier record at all: the fail-open default still enforces 50.
        let f = fixture();
        seed_products(&f.store, OWNER, 50).await;

        let err = f
            .inventory
            .add_product(NewProduct::new("Blocked", 100, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::LimitExceeded { .. }));
    }

    #[tokio::test]
    async fn test_enterprise_tier_is_unbounded() {
        let f = fixture();
        set_tier(&f.store, OWNER, Tier::Enterprise).await;
        seed_products(&f.store, OWNER, 150).await;

        f.inventory
            .add_product(NewProduct::new("No cap", 100, 1))
            .await
            .unwrap();
        assert_eq!(f.store.count_products(OWNER).await.unwrap(), 151);
    }

    #[tokio::test]
    async fn test_add_product_rejects_invalid_input_before_any_call() {
        let f = fixture();

        let err = f
            .inventory
            .add_product(NewProduct::new("", 100, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));

        assert_eq!(
            f.store
                .product_inserts
                .load(std::sync::atomic::Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn test_update_crossing_reorder_point_notifies_once() {
        // quantity 5, reorder_point 10: the product already sits below the
        // threshold, but alerts fire on observed updates, not on fetch.
        let f = fixture();
        let product = f
            .store
            .insert_product(
                OWNER,
                NewProduct::new("Blue Mug", 1250, 5).reorder_point(10),
            )
            .await
            .unwrap();
        f.inventory.fetch_products().await.unwrap();

        let updated = f
            .inventory
            .update_product(&product.id, ProductPatch::quantity(10))
            .await
            .unwrap();
        assert_eq!(updated.quantity, 10);

        let messages = f.buffer.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, "Low Stock Alert");
        assert_eq!(
            messages[0].1,
            "Blue Mug has 10 items remaining (threshold: 10)"
        );

        // Cache reflects the update.
        assert_eq!(f.inventory.products()[0].quantity, 10);
    }

    #[tokio::test]
    async fn test_update_to_zero_quantity_does_not_notify() {
        // The final unit sold: out-of-stock is excluded from the alert.
        let f = fixture();
        let product = f
            .store
            .insert_product(OWNER, NewProduct::new("Blue Mug", 1250, 1).reorder_point(5))
            .await
            .unwrap();
        f.inventory.fetch_products().await.unwrap();

        f.inventory
            .update_product(&product.id, ProductPatch::quantity(0))
            .await
            .unwrap();

        assert!(f.buffer.is_empty());
    }

    #[tokio::test]
    async fn test_repeat_updates_in_band_notify_once() {
        let f = fixture();
        let product = f
            .store
            .insert_product(
                OWNER,
                NewProduct::new("Blue Mug", 1250, 20).reorder_point(10),
            )
            .await
            .unwrap();

        f.inventory
            .update_product(&product.id, ProductPatch::quantity(8))
            .await
            .unwrap();
        f.inventory
            .update_product(&product.id, ProductPatch::quantity(6))
            .await
            .unwrap();
        assert_eq!(f.buffer.len(), 1);

        // Restock above the threshold re-arms; the next crossing fires.
        f.inventory
            .update_product(&product.id, ProductPatch::quantity(15))
            .await
            .unwrap();
        f.inventory
            .update_product(&product.id, ProductPatch::quantity(9))
            .await
            .unwrap();
        assert_eq!(f.buffer.len(), 2);
    }

    #[tokio::test]
    async fn test_update_foreign_product_affects_nothing() {
        let f = fixture();
        let foreign = f
            .store
            .insert_product(OTHER, NewProduct::new("Foreign", 100, 10))
            .await
            .unwrap();

        let err = f
            .inventory
            .update_product(&foreign.id, ProductPatch::quantity(0))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound { .. }));

        // The other owner's record is intact.
        let products = f.store.select_products(OTHER).await.unwrap();
        assert_eq!(products[0].quantity, 10);
    }

    #[tokio::test]
    async fn test_delete_product_removes_from_cache() {
        let f = fixture();
        let product = f
            .store
            .insert_product(OWNER, NewProduct::new("Blue Mug", 1250, 10))
            .await
            .unwrap();
        f.inventory.fetch_products().await.unwrap();

        f.inventory.delete_product(&product.id).await.unwrap();
        assert!(f.inventory.products().is_empty());

        let err = f.inventory.delete_product(&product.id).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_owner_switch_resets_cache() {
        let f = fixture();
        seed_products(&f.store, OWNER, 2).await;
        seed_products(&f.store, OTHER, 1).await;

        f.inventory.fetch_products().await.unwrap();
        assert_eq!(f.inventory.products().len(), 2);

        f.session.sign_in(OTHER);
        let products = f.inventory.fetch_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(f.inventory.products().len(), 1);
        assert_eq!(f.inventory.products()[0].title, "Seed 0");
    }

    #[tokio::test]
    async fn test_reducer_update_ignores_unknown_id() {
        let mut state = InventoryState::default();
        let product = Product {
            id: "p-1".to_string(),
            owner_id: OWNER.to_string(),
            title: "Blue Mug".to_string(),
            price_cents: 1250,
            quantity: 10,
            category: None,
            sku: None,
            image_url: None,
            reorder_point: None,
            is_active: true,
            created_at: Utc::now(),
        };

        reduce(&mut state, InventoryCommand::UpdateProduct(product.clone()));
        assert!(state.products.is_empty());

        reduce(&mut state, InventoryCommand::AddProduct(product));
        reduce(&mut state, InventoryCommand::DeleteProduct("p-1".to_string()));
        assert!(state.products.is_empty());
    }
}
