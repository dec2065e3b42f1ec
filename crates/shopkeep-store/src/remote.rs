//! # Remote Store Interface
//!
//! The generic request/response surface the rest of Shopkeep consumes.
//!
//! ## Interface Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       RemoteStore                                       │
//! │                                                                         │
//! │  Collection     select  insert  update  delete  count  upsert          │
//! │  ──────────     ──────  ──────  ──────  ──────  ─────  ──────          │
//! │  products         ✓       ✓       ✓       ✓       ✓                   │
//! │  sales            ✓       ✓                                            │
//! │  expenses         ✓       ✓               ✓                            │
//! │  budgets          ✓       ✓     (spend)   ✓                            │
//! │  user_tiers     (get)                                      ✓           │
//! │                                                                         │
//! │  Every call is scoped to one owner. The backend behind this trait is   │
//! │  opaque: SQLite here, a hosted service in production.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Contract
//! Mutations against a record the owner does not hold MUST affect zero rows
//! and resolve to [`StoreError::NotFound`](crate::error::StoreError) —
//! never touch another owner's data, never silently succeed.

use async_trait::async_trait;

use shopkeep_core::types::{
    Budget, Expense, NewBudget, NewExpense, NewProduct, NewSale, Product, ProductPatch, Sale,
    TierRecord,
};

use crate::error::StoreResult;

/// The owner-scoped CRUD interface over the remote collections.
///
/// ## Usage
/// ```rust,ignore
/// let store: Arc<dyn RemoteStore> = Arc::new(SqliteStore::connect(config).await?);
///
/// let products = store.select_products("owner-1").await?;
/// let count = store.count_products("owner-1").await?;
/// ```
#[async_trait]
pub trait RemoteStore: Send + Sync {
    // =========================================================================
    // Products
    // =========================================================================

    /// Lists the owner's products, newest first.
    async fn select_products(&self, owner_id: &str) -> StoreResult<Vec<Product>>;

    /// Inserts a product, stamping id, owner and creation time.
    async fn insert_product(&self, owner_id: &str, new: NewProduct) -> StoreResult<Product>;

    /// Applies a partial update to the owner's product and returns the
    /// updated record.
    async fn update_product(
        &self,
        owner_id: &str,
        id: &str,
        patch: ProductPatch,
    ) -> StoreResult<Product>;

    /// Deletes the owner's product.
    async fn delete_product(&self, owner_id: &str, id: &str) -> StoreResult<()>;

    /// Authoritative count of the owner's products.
    ///
    /// The tier cap check uses this, not the local cache length: the cache
    /// can be stale while other sessions insert.
    async fn count_products(&self, owner_id: &str) -> StoreResult<i64>;

    // =========================================================================
    // Sales
    // =========================================================================

    /// Inserts a sale record, stamping id, owner and creation time.
    async fn insert_sale(&self, owner_id: &str, new: NewSale) -> StoreResult<Sale>;

    /// Lists the owner's sales, most recent sale date first.
    async fn select_sales(&self, owner_id: &str) -> StoreResult<Vec<Sale>>;

    // =========================================================================
    // Expenses
    // =========================================================================

    /// Inserts an expense, stamping id, owner and creation time.
    async fn insert_expense(&self, owner_id: &str, new: NewExpense) -> StoreResult<Expense>;

    /// Lists the owner's expenses, most recent date first.
    async fn select_expenses(&self, owner_id: &str) -> StoreResult<Vec<Expense>>;

    /// Deletes the owner's expense.
    async fn delete_expense(&self, owner_id: &str, id: &str) -> StoreResult<()>;

    // =========================================================================
    // Budgets
    // =========================================================================

    /// Lists the owner's budgets.
    async fn select_budgets(&self, owner_id: &str) -> StoreResult<Vec<Budget>>;

    /// Creates a budget with zero spend. Category is unique per owner;
    /// duplicates resolve to [`StoreError::Conflict`](crate::error::StoreError).
    async fn insert_budget(&self, owner_id: &str, new: NewBudget) -> StoreResult<Budget>;

    /// Adds `amount_cents` to the spend of the owner's budget for
    /// `category`. Returns the updated budget, or `None` when no budget
    /// tracks that category (a no-op, not an error).
    async fn add_budget_spend(
        &self,
        owner_id: &str,
        category: &str,
        amount_cents: i64,
    ) -> StoreResult<Option<Budget>>;

    /// Deletes the owner's budget.
    async fn delete_budget(&self, owner_id: &str, id: &str) -> StoreResult<()>;

    // =========================================================================
    // User Tiers
    // =========================================================================

    /// Reads the tier record for an owner, if one exists.
    async fn get_tier(&self, owner_id: &str) -> StoreResult<Option<TierRecord>>;

    /// Inserts or replaces the tier record, keyed by owner id.
    async fn upsert_tier(&self, record: TierRecord) -> StoreResult<TierRecord>;
}
