//! # SQLite Reference Backend
//!
//! Pooled SQLite implementation of [`RemoteStore`].
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SQLite Backend                                     │
//! │                                                                         │
//! │  StoreConfig::new(path) ← Configure pool settings                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStore::connect(config).await ← Create pool + run migrations     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                   │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │  (max_connections)        │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │                           │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │                                                                         │
//! │  Every query carries `owner_id` in its WHERE clause. Mutations check   │
//! │  rows_affected: zero rows on an owner-scoped update/delete resolves    │
//! │  to NotFound, never to touching a foreign row.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Better crash recovery

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use shopkeep_core::types::{
    Budget, Expense, NewBudget, NewExpense, NewProduct, NewSale, Product, ProductPatch, Sale,
    TierRecord,
};

use crate::error::{StoreError, StoreResult};
use crate::remote::RemoteStore;

/// Embedded migrations from the `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

const PRODUCT_COLUMNS: &str = "id, owner_id, title, price_cents, quantity, category, sku, \
     image_url, reorder_point, is_active, created_at";

const SALE_COLUMNS: &str =
    "id, owner_id, product_id, quantity_sold, sale_price_cents, sale_date, notes, created_at";

const EXPENSE_COLUMNS: &str =
    "id, owner_id, description, amount_cents, category, date, notes, created_at";

const BUDGET_COLUMNS: &str = "id, owner_id, category, limit_cents, spent_cents, period, \
     notifications, notes, created_at";

// =============================================================================
// Configuration
// =============================================================================

/// Backend configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/shopkeep.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a single-user client)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a new configuration with the given path.
    /// The file is created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let store = SqliteStore::connect(StoreConfig::in_memory()).await?;
    /// // Store is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// SqliteStore
// =============================================================================

/// SQLite-backed [`RemoteStore`].
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the database and prepares it for use.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite: WAL mode, NORMAL synchronous, foreign keys on
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing store connection"
        );

        // sqlite://path with mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Store pool created"
        );

        let store = SqliteStore { pool };

        if config.run_migrations {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Runs pending migrations. Idempotent.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        info!("Running store migrations");
        MIGRATOR.run(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool for advanced queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks if the store is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        info!("Closing store connection pool");
        self.pool.close().await;
    }
}

#[async_trait]
impl RemoteStore for SqliteStore {
    // =========================================================================
    // Products
    // =========================================================================

    async fn select_products(&self, owner_id: &str) -> StoreResult<Vec<Product>> {
        debug!(owner_id = %owner_id, "Selecting products");

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE owner_id = ?1 \
             ORDER BY created_at DESC, rowid DESC"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Select returned products");
        Ok(products)
    }

    async fn insert_product(&self, owner_id: &str, new: NewProduct) -> StoreResult<Product> {
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

        debug!(id = %product.id, title = %product.title, "Inserting product");

        sqlx::query(
            "INSERT INTO products ( \
                id, owner_id, title, price_cents, quantity, category, sku, \
                image_url, reorder_point, is_active, created_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(&product.id)
        .bind(&product.owner_id)
        .bind(&product.title)
        .bind(product.price_cents)
        .bind(product.quantity)
        .bind(&product.category)
        .bind(&product.sku)
        .bind(&product.image_url)
        .bind(product.reorder_point)
        .bind(product.is_active)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    async fn update_product(
        &self,
        owner_id: &str,
        id: &str,
        patch: ProductPatch,
    ) -> StoreResult<Product> {
        debug!(id = %id, "Updating product");

        // Read-modify-write inside a transaction: the owner-scoped SELECT
        // both enforces visibility and supplies the values the patch leaves
        // untouched.
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1 AND owner_id = ?2"
        );
        let existing = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        let updated = patch.apply_to(&existing);

        let result = sqlx::query(
            "UPDATE products SET \
                title = ?1, price_cents = ?2, quantity = ?3, category = ?4, \
                sku = ?5, image_url = ?6, reorder_point = ?7 \
             WHERE id = ?8 AND owner_id = ?9",
        )
        .bind(&updated.title)
        .bind(updated.price_cents)
        .bind(updated.quantity)
        .bind(&updated.category)
        .bind(&updated.sku)
        .bind(&updated.image_url)
        .bind(updated.reorder_point)
        .bind(id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", id));
        }

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete_product(&self, owner_id: &str, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1 AND owner_id = ?2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", id));
        }

        Ok(())
    }

    async fn count_products(&self, owner_id: &str) -> StoreResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE owner_id = ?1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    // =========================================================================
    // Sales
    // =========================================================================

    async fn insert_sale(&self, owner_id: &str, new: NewSale) -> StoreResult<Sale> {
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

        debug!(id = %sale.id, product_id = %sale.product_id, "Inserting sale");

        sqlx::query(
            "INSERT INTO sales ( \
                id, owner_id, product_id, quantity_sold, sale_price_cents, \
                sale_date, notes, created_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&sale.id)
        .bind(&sale.owner_id)
        .bind(&sale.product_id)
        .bind(sale.quantity_sold)
        .bind(sale.sale_price_cents)
        .bind(sale.sale_date)
        .bind(&sale.notes)
        .bind(sale.created_at)
        .execute(&self.pool)
        .await?;

        Ok(sale)
    }

    async fn select_sales(&self, owner_id: &str) -> StoreResult<Vec<Sale>> {
        let sql = format!(
            "SELECT {SALE_COLUMNS} FROM sales \
             WHERE owner_id = ?1 \
             ORDER BY sale_date DESC, rowid DESC"
        );
        let sales = sqlx::query_as::<_, Sale>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    // =========================================================================
    // Expenses
    // =========================================================================

    async fn insert_expense(&self, owner_id: &str, new: NewExpense) -> StoreResult<Expense> {
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

        debug!(id = %expense.id, "Inserting expense");

        sqlx::query(
            "INSERT INTO expenses ( \
                id, owner_id, description, amount_cents, category, date, notes, created_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&expense.id)
        .bind(&expense.owner_id)
        .bind(&expense.description)
        .bind(expense.amount_cents)
        .bind(&expense.category)
        .bind(expense.date)
        .bind(&expense.notes)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        Ok(expense)
    }

    async fn select_expenses(&self, owner_id: &str) -> StoreResult<Vec<Expense>> {
        let sql = format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses \
             WHERE owner_id = ?1 \
             ORDER BY date DESC, rowid DESC"
        );
        let expenses = sqlx::query_as::<_, Expense>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(expenses)
    }

    async fn delete_expense(&self, owner_id: &str, id: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?1 AND owner_id = ?2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Expense", id));
        }

        Ok(())
    }

    // =========================================================================
    // Budgets
    // =========================================================================

    async fn select_budgets(&self, owner_id: &str) -> StoreResult<Vec<Budget>> {
        let sql = format!(
            "SELECT {BUDGET_COLUMNS} FROM budgets \
             WHERE owner_id = ?1 \
             ORDER BY category ASC"
        );
        let budgets = sqlx::query_as::<_, Budget>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(budgets)
    }

    async fn insert_budget(&self, owner_id: &str, new: NewBudget) -> StoreResult<Budget> {
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

        debug!(id = %budget.id, category = %budget.category, "Inserting budget");

        let result = sqlx::query(
            "INSERT INTO budgets ( \
                id, owner_id, category, limit_cents, spent_cents, period, \
                notifications, notes, created_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&budget.id)
        .bind(&budget.owner_id)
        .bind(&budget.category)
        .bind(budget.limit_cents)
        .bind(budget.spent_cents)
        .bind(budget.period)
        .bind(budget.notifications)
        .bind(&budget.notes)
        .bind(budget.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(budget),
            Err(e) => match StoreError::from(e) {
                StoreError::Conflict { .. } => {
                    Err(StoreError::conflict("category", &budget.category))
                }
                other => Err(other),
            },
        }
    }

    async fn add_budget_spend(
        &self,
        owner_id: &str,
        category: &str,
        amount_cents: i64,
    ) -> StoreResult<Option<Budget>> {
        let result = sqlx::query(
            "UPDATE budgets SET spent_cents = spent_cents + ?1 \
             WHERE owner_id = ?2 AND category = ?3",
        )
        .bind(amount_cents)
        .bind(owner_id)
        .bind(category)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // No budget tracks this category: a no-op, not an error.
            return Ok(None);
        }

        let sql = format!(
            "SELECT {BUDGET_COLUMNS} FROM budgets WHERE owner_id = ?1 AND category = ?2"
        );
        let budget = sqlx::query_as::<_, Budget>(&sql)
            .bind(owner_id)
            .bind(category)
            .fetch_one(&self.pool)
            .await?;

        Ok(Some(budget))
    }

    async fn delete_budget(&self, owner_id: &str, id: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = ?1 AND owner_id = ?2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Budget", id));
        }

        Ok(())
    }

    // =========================================================================
    // User Tiers
    // =========================================================================

    async fn get_tier(&self, owner_id: &str) -> StoreResult<Option<TierRecord>> {
        let record = sqlx::query_as::<_, TierRecord>(
            "SELECT owner_id, tier, updated_at FROM user_tiers WHERE owner_id = ?1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn upsert_tier(&self, record: TierRecord) -> StoreResult<TierRecord> {
        debug!(owner_id = %record.owner_id, tier = %record.tier, "Upserting tier");

        sqlx::query(
            "INSERT INTO user_tiers (owner_id, tier, updated_at) \
             VALUES (?1, ?2, ?3) \
             ON CONFLICT (owner_id) DO UPDATE SET \
                tier = excluded.tier, \
                updated_at = excluded.updated_at",
        )
        .bind(&record.owner_id)
        .bind(record.tier)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

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
    use shopkeep_core::types::BudgetPeriod;

    const OWNER: &str = "owner-1";
    const OTHER: &str = "owner-2";

    async fn store() -> SqliteStore {
        SqliteStore::connect(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_connect_and_health_check() {
        let store = store().await;
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = StoreConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
    }

    #[tokio::test]
    async fn test_products_are_owner_scoped_and_newest_first() {
        let store = store().await;

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
        assert_eq!(store.count_products(OTHER).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_product_applies_patch() {
        let store = store().await;
        let product = store
            .insert_product(OWNER, NewProduct::new("Blue Mug", 1250, 10).sku("MUG-01"))
            .await
            .unwrap();

        let updated = store
            .update_product(OWNER, &product.id, ProductPatch::quantity(3))
            .await
            .unwrap();
        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.title, "Blue Mug");
        assert_eq!(updated.sku.as_deref(), Some("MUG-01"));

        let reread = store.select_products(OWNER).await.unwrap();
        assert_eq!(reread[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_update_foreign_product_is_not_found() {
        let store = store().await;
        let product = store
            .insert_product(OWNER, NewProduct::new("Blue Mug", 1250, 10))
            .await
            .unwrap();

        let err = store
            .update_product(OTHER, &product.id, ProductPatch::quantity(0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        // The owner's row is untouched.
        let products = store.select_products(OWNER).await.unwrap();
        assert_eq!(products[0].quantity, 10);
    }

    #[tokio::test]
    async fn test_delete_is_owner_scoped() {
        let store = store().await;
        let product = store
            .insert_product(OWNER, NewProduct::new("Blue Mug", 1250, 10))
            .await
            .unwrap();

        let err = store.delete_product(OTHER, &product.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(store.count_products(OWNER).await.unwrap(), 1);

        store.delete_product(OWNER, &product.id).await.unwrap();
        assert_eq!(store.count_products(OWNER).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sales_round_trip() {
        let store = store().await;
        let product = store
            .insert_product(OWNER, NewProduct::new("Blue Mug", 1250, 10))
            .await
            .unwrap();

        let sale = store
            .insert_sale(
                OWNER,
                NewSale {
                    product_id: product.id.clone(),
                    quantity_sold: 2,
                    sale_price_cents: 2500,
                    sale_date: Utc::now(),
                    notes: Some("walk-in".to_string()),
                },
            )
            .await
            .unwrap();

        let sales = store.select_sales(OWNER).await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].id, sale.id);
        assert_eq!(sales[0].quantity_sold, 2);
        assert_eq!(sales[0].sale_price_cents, 2500);
        assert_eq!(sales[0].notes.as_deref(), Some("walk-in"));
        assert!(store.select_sales(OTHER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expenses_round_trip() {
        let store = store().await;

        let expense = store
            .insert_expense(
                OWNER,
                NewExpense {
                    description: "Printer paper".to_string(),
                    amount_cents: 1599,
                    category: "Supplies".to_string(),
                    date: Utc::now(),
                    notes: None,
                },
            )
            .await
            .unwrap();

        let expenses = store.select_expenses(OWNER).await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, expense.id);
        assert_eq!(expenses[0].amount_cents, 1599);

        store.delete_expense(OWNER, &expense.id).await.unwrap();
        assert!(store.select_expenses(OWNER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_budget_category_is_unique_per_owner() {
        let store = store().await;
        let new = NewBudget {
            category: "Supplies".to_string(),
            limit_cents: 10_000,
            period: BudgetPeriod::Monthly,
            notifications: true,
            notes: None,
        };

        store.insert_budget(OWNER, new.clone()).await.unwrap();
        // A different owner can reuse the category.
        store.insert_budget(OTHER, new.clone()).await.unwrap();

        let err = store.insert_budget(OWNER, new).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_budget_spend_accumulates() {
        let store = store().await;
        store
            .insert_budget(
                OWNER,
                NewBudget {
                    category: "Supplies".to_string(),
                    limit_cents: 10_000,
                    period: BudgetPeriod::Monthly,
                    notifications: true,
                    notes: None,
                },
            )
            .await
            .unwrap();

        let budget = store
            .add_budget_spend(OWNER, "Supplies", 1500)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(budget.spent_cents, 1500);

        let budget = store
            .add_budget_spend(OWNER, "Supplies", 500)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(budget.spent_cents, 2000);

        // Untracked category is a no-op.
        let missing = store.add_budget_spend(OWNER, "Travel", 500).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_tier_upsert_replaces() {
        let store = store().await;

        assert!(store.get_tier(OWNER).await.unwrap().is_none());

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
                tier: Tier::Premium,
                updated_at: Utc::now(),
            })
            .await
            .unwrap();

        let record = store.get_tier(OWNER).await.unwrap().unwrap();
        assert_eq!(record.tier, Tier::Premium);
    }
}
