//! # In-Memory Store
//!
//! HashMap-backed [`RemoteStore`] double for tests and offline development.
//!
//! ## Test Hooks
//! - `set_failing(true)` makes every call return [`StoreError::Unavailable`],
//!   for exercising failure paths.
//! - Atomic call counters (`product_inserts`, `product_counts`,
//!   `tier_upserts`) let tests assert which remote verbs actually ran —
//!   e.g. "limit reached ⇒ the insert was never attempted".

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use shopkeep_core::types::{
    Budget, Expense, NewBudget, NewExpense, NewProduct, NewSale, Product, ProductPatch, Sale,
    TierRecord,
};

use crate::error::{StoreError, StoreResult};
use crate::remote::RemoteStore;

#[derive(Debug, Default)]
struct Collections {
    // Insertion order; listings iterate in reverse for newest-first.
    products: Vec<Product>,
    sales: Vec<Sale>,
    expenses: Vec<Expense>,
    budgets: Vec<Budget>,
    tiers: Vec<TierRecord>,
}

/// In-memory [`RemoteStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
    failing: AtomicBool,
    /// Number of `insert_product` calls that reached the store.
    pub product_inserts: AtomicU64,
    /// Number of `count_products` calls that reached the store.
    pub product_counts: AtomicU64,
    /// Number of `upsert_tier` calls that reached the store.
    pub tier_upserts: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Toggles fault injection: while on, every call returns
    /// [`StoreError::Unavailable`] without touching any collection.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    // =========================================================================
    // Products
    // =========================================================================

    async fn select_products(&self, owner_id: &str) -> StoreResult<Vec<Product>> {
        self.check_available()?;
        let collections = self.collections.lock().await;
        Ok(collections
            .products
            .iter()
            .rev()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert_product(&self, owner_id: &str, new: NewProduct) -> StoreResult<Product> {
        self.check_available()?;
        self.product_inserts.fetch_add(1, Ordering::SeqCst);

        let product = Product {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            title: new.title,
            price_cents: new.price_cents,
            quantity: new.quantity,
            category: new.category,
            sku: new.sku,
            image_url: new.image_url,
            reorder_point: new.reorder_point,
            is_active: new.is_active,
            created_at: Utc::now(),
        };

        let mut collections = self.collections.lock().await;
        collections.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        owner_id: &str,
        id: &str,
        patch: ProductPatch,
    ) -> StoreResult<Product> {
        self.check_available()?;
        let mut collections = self.collections.lock().await;

        let slot = collections
            .products
            .iter_mut()
            .find(|p| p.id == id && p.owner_id == owner_id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        let updated = patch.apply_to(slot);
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete_product(&self, owner_id: &str, id: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut collections = self.collections.lock().await;

        let before = collections.products.len();
        collections
            .products
            .retain(|p| !(p.id == id && p.owner_id == owner_id));

        if collections.products.len() == before {
            return Err(StoreError::not_found("Product", id));
        }
        Ok(())
    }

    async fn count_products(&self, owner_id: &str) -> StoreResult<i64> {
        self.check_available()?;
        self.product_counts.fetch_add(1, Ordering::SeqCst);

        let collections = self.collections.lock().await;
        Ok(collections
            .products
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .count() as i64)
    }

    // =========================================================================
    // Sales
    // =========================================================================

    async fn insert_sale(&self, owner_id: &str, new: NewSale) -> StoreResult<Sale> {
        self.check_available()?;

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            product_id: new.product_id,
            quantity_sold: new.quantity_sold,
            sale_price_cents: new.sale_price_cents,
            sale_date: new.sale_date,
            notes: new.notes,
            created_at: Utc::now(),
        };

        let mut collections = self.collections.lock().await;
        collections.sales.push(sale.clone());
        Ok(sale)
    }

    async fn select_sales(&self, owner_id: &str) -> StoreResult<Vec<Sale>> {
        self.check_available()?;
        let collections = self.collections.lock().await;

        let mut sales: Vec<Sale> = collections
            .sales
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.sale_date.cmp(&a.sale_date));
        Ok(sales)
    }

    // =========================================================================
    // Expenses
    // =========================================================================

    async fn insert_expense(&self, owner_id: &str, new: NewExpense) -> StoreResult<Expense> {
        self.check_available()?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            description: new.description,
            amount_cents: new.amount_cents,
            category: new.category,
            date: new.date,
            notes: new.notes,
            created_at: Utc::now(),
        };

        let mut collections = self.collections.lock().await;
        collections.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn select_expenses(&self, owner_id: &str) -> StoreResult<Vec<Expense>> {
        self.check_available()?;
        let collections = self.collections.lock().await;

        let mut expenses: Vec<Expense> = collections
            .expenses
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    async fn delete_expense(&self, owner_id: &str, id: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut collections = self.collections.lock().await;

        let before = collections.expenses.len();
        collections
            .expenses
            .retain(|e| !(e.id == id && e.owner_id == owner_id));

        if collections.expenses.len() == before {
            return Err(StoreError::not_found("Expense", id));
        }
        Ok(())
    }

    // =========================================================================
    // Budgets
    // =========================================================================

    async fn select_budgets(&self, owner_id: &str) -> StoreResult<Vec<Budget>> {
        self.check_available()?;
        let collections = self.collections.lock().await;

        let mut budgets: Vec<Budget> = collections
            .budgets
            .iter()
            .filter(|b| b.owner_id == owner_id)
            .cloned()
            .collect();
        budgets.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(budgets)
    }

    async fn insert_budget(&self, owner_id: &str, new: NewBudget) -> StoreResult<Budget> {
        self.check_available()?;
        let mut collections = self.collections.lock().await;

        if collections
            .budgets
            .iter()
            .any(|b| b.owner_id == owner_id && b.category == new.category)
        {
            return Err(StoreError::conflict("category", &new.category));
        }

        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            category: new.category,
            limit_cents: new.limit_cents,
            spent_cents: 0,
            period: new.period,
            notifications: new.notifications,
            notes: new.notes,
            created_at: Utc::now(),
        };
        collections.budgets.push(budget.clone());
        Ok(budget)
    }

    async fn add_budget_spend(
        &self,
        owner_id: &str,
        category: &str,
        amount_cents: i64,
    ) -> StoreResult<Option<Budget>> {
        self.check_available()?;
        let mut collections = self.collections.lock().await;

        match collections
            .budgets
            .iter_mut()
            .find(|b| b.owner_id == owner_id && b.category == category)
        {
            Some(budget) => {
                budget.spent_cents += amount_cents;
                Ok(Some(budget.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_budget(&self, owner_id: &str, id: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut collections = self.collections.lock().await;

        let before = collections.budgets.len();
        collections
            .budgets
            .retain(|b| !(b.id == id && b.owner_id == owner_id));

        if collections.budgets.len() == before {
            return Err(StoreError::not_found("Budget", id));
        }
        Ok(())
    }

    // =========================================================================
    // User Tiers
    // =========================================================================

    async fn get_tier(&self, owner_id: &str) -> StoreResult<Option<TierRecord>> {
        self.check_available()?;
        let collections = self.collections.lock().await;
        Ok(collections
            .tiers
            .iter()
            .find(|t| t.owner_id == owner_id)
            .cloned())
    }

    async fn upsert_tier(&self, record: TierRecord) -> StoreResult<TierRecord> {
        self.check_available()?;
        self.tier_upserts.fetch_add(1, Ordering::SeqCst);

        let mut collections = self.collections.lock().await;
        collections.tiers.retain(|t| t.owner_id != record.owner_id);
        collections.tiers.push(record.clone());
        Ok(record)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shopkeep_core::tier::Tier;

    const OWNER: &str = "owner-1";
    const OTHER: &str = "owner-2";

    #[tokio::test]
    async fn test_products_newest_first_and_owner_scoped() {
        let store = MemoryStore::new();

        let first = store
            .insert_product(OWNER, NewProduct::new("First", 100, 5))
            .await
            .unwrap();
        let second = store
            .insert_product(OWNER, NewProduct::new("Second", 200, 5))
            .await
            .unwrap();
        store
            .insert_product(OTHER, NewProduct::new("Foreign", 300, 5))
            .await
            .unwrap();

        let products = store.select_products(OWNER).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, second.id);
        assert_eq!(products[1].id, first.id);
        assert_eq!(store.count_products(OWNER).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_foreign_owner_mutations_affect_zero_records() {
        let store = MemoryStore::new();
        let product = store
            .insert_product(OWNER, NewProduct::new("Blue Mug", 1250, 10))
            .await
            .unwrap();

        let err = store
            .update_product(OTHER, &product.id, ProductPatch::quantity(0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        let err = store.delete_product(OTHER, &product.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        let products = store.select_products(OWNER).await.unwrap();
        assert_eq!(products[0].quantity, 10);
    }

    #[tokio::test]
    async fn test_fault_injection() {
        let store = MemoryStore::new();
        store.set_failing(true);

        let err = store.select_products(OWNER).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable));
        let err = store
            .insert_product(OWNER, NewProduct::new("Blue Mug", 1250, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable));

        // Nothing reached the collections, and the insert counter is clean:
        // the call failed before the store touched it.
        assert_eq!(store.product_inserts.load(Ordering::SeqCst), 0);

        store.set_failing(false);
        assert!(store.select_products(OWNER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tier_upsert_replaces() {
        let store = MemoryStore::new();

        store
            .upsert_tier(TierRecord {
                owner_id: OWNER.to_string(),
                tier: Tier::Basic,
                updated_at: Utc::now(),
            })
            .await
            .unwrap();
        store
            .upsert_tier(TierRecord {
                owner_id: OWNER.to_string(),
                tier: Tier::Enterprise,
                updated_at: Utc::now(),
            })
            .await
            .unwrap();

        let record = store.get_tier(OWNER).await.unwrap().unwrap();
        assert_eq!(record.tier, Tier::Enterprise);
        assert_eq!(store.tier_upserts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_budget_conflict_and_spend() {
        let store = MemoryStore::new();
        let new = NewBudget {
            category: "Supplies".to_string(),
            limit_cents: 10_000,
            period: Default::default(),
            notifications: true,
            notes: None,
        };

        store.insert_budget(OWNER, new.clone()).await.unwrap();
        let err = store.insert_budget(OWNER, new).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        let budget = store
            .add_budget_spend(OWNER, "Supplies", 750)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(budget.spent_cents, 750);
        assert!(store
            .add_budget_spend(OWNER, "Travel", 100)
            .await
            .unwrap()
            .is_none());
    }
}
