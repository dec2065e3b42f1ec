//! # shopkeep-store: Remote Store Layer for Shopkeep
//!
//! This crate owns all remote-store access. Everything persistent — the
//! product catalog, the sale ledger, expenses, budgets, tier records — sits
//! behind one owner-scoped trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopkeep Data Flow                               │
//! │                                                                         │
//! │  shopkeep-client (InventoryStore, TierResolver, ...)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shopkeep-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  RemoteStore  │    │  SqliteStore  │    │ MemoryStore  │  │   │
//! │  │   │  (remote.rs)  │◄───│  (sqlite.rs)  │    │ (memory.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ owner-scoped  │◄───│ pool + WAL +  │    │ test double, │  │   │
//! │  │   │ CRUD trait    │    │ migrations    │    │ fault inject │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (reference backend) — a hosted service in production      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`remote`] - The `RemoteStore` trait (the generic CRUD surface)
//! - [`sqlite`] - Pooled SQLite reference backend + `StoreConfig`
//! - [`memory`] - In-memory test double with fault injection
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopkeep_store::{RemoteStore, SqliteStore, StoreConfig};
//!
//! let store = SqliteStore::connect(StoreConfig::new("shopkeep.db")).await?;
//! let products = store.select_products("owner-1").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod remote;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use sqlite::{SqliteStore, StoreConfig};
