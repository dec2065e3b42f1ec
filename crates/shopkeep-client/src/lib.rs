//! # shopkeep-client: Stateful Client Layer for Shopkeep
//!
//! The layer the mobile frontend talks to. Holds the per-owner product
//! cache, enforces the subscription tier cap, fires low-stock alerts, and
//! records sales/expenses/budgets against the remote store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopkeep Client Layer                            │
//! │                                                                         │
//! │  Session ──── owner id ────┐                                            │
//! │                            ▼                                            │
//! │  ┌──────────────┐   ┌──────────────────┐   ┌──────────────────┐        │
//! │  │ TierResolver │◄──│  InventoryStore  │──►│ LowStockWatcher  │        │
//! │  │ (fail-open   │   │  (reducer cache, │   │ (latch + emit)   │        │
//! │  │  to Basic)   │   │   mutation lock) │   └────────┬─────────┘        │
//! │  └──────┬───────┘   └────────┬─────────┘            ▼                  │
//! │         │                    │              Notifier (push/log)        │
//! │         │           ┌────────┴─────────┐                               │
//! │         │           │   SaleRecorder   │  sale insert → stock          │
//! │         │           └────────┬─────────┘  decrement → low-stock        │
//! │         ▼                    ▼                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              RemoteStore (shopkeep-store)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ExpenseBook / BudgetBook sit beside the inventory path and share      │
//! │  the same session handle and store.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`] - The authenticated-owner handle (explicit injection)
//! - [`tier`] - Tier resolution with the fail-open-to-Basic policy
//! - [`inventory`] - The reducer-based product cache (the core)
//! - [`notify`] - Notifier sink and the low-stock watcher
//! - [`sales`] - Compound sale recording
//! - [`expenses`] / [`budgets`] - Expense log and budget book
//! - [`config`] - Timeout and retry policy
//! - [`error`] - The client error taxonomy
//!
//! ## Wiring Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopkeep_client::{InventoryStore, LogNotifier, SaleRecorder, Session, TierResolver};
//! use shopkeep_store::{RemoteStore, SqliteStore, StoreConfig};
//!
//! let store: Arc<dyn RemoteStore> =
//!     Arc::new(SqliteStore::connect(StoreConfig::new("shopkeep.db")).await?);
//! let session = Session::new();
//! session.sign_in("owner-1");
//!
//! let inventory = Arc::new(InventoryStore::new(
//!     store.clone(),
//!     session.clone(),
//!     Arc::new(LogNotifier),
//! ));
//! let sales = SaleRecorder::new(store.clone(), inventory.clone(), session.clone());
//!
//! inventory.fetch_products().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod budgets;
pub mod config;
pub mod error;
pub mod expenses;
pub mod inventory;
pub mod notify;
pub mod sales;
pub mod session;
pub mod tier;

// =============================================================================
// Re-exports
// =============================================================================

pub use budgets::BudgetBook;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use expenses::ExpenseBook;
pub use inventory::{InventoryCommand, InventoryState, InventoryStore};
pub use notify::{BufferNotifier, LogNotifier, LowStockWatcher, Notifier, LOW_STOCK_TITLE};
pub use sales::{SaleLine, SaleRecorder};
pub use session::Session;
pub use tier::TierResolver;
