//! # shopkeep-core: Pure Business Logic for Shopkeep
//!
//! This crate is the **heart** of Shopkeep. It contains all business logic
//! as pure functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopkeep Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mobile Frontend (TypeScript)                    │   │
//! │  │    Products ──► Sales ──► Expenses ──► Budgets ──► Upgrade     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shopkeep-client                              │   │
//! │  │    InventoryStore, TierResolver, SaleRecorder, ...             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopkeep-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   tier    │  │   stock   │  │ validation│  │   │
//! │  │   │  Product  │  │   Tier    │  │ LowStock  │  │   rules   │  │   │
//! │  │   │   Sale    │  │  Feature  │  │  Tracker  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                shopkeep-store (Remote Store Layer)              │   │
//! │  │          RemoteStore trait, SQLite backend, test double         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Expense, Budget, TierRecord)
//! - [`tier`] - Subscription tiers, product caps and feature gates
//! - [`stock`] - Low-stock rules and the alert latch
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use shopkeep_core::tier::Tier;
//!
//! // The Basic tier caps the catalog at 50 products.
//! assert_eq!(Tier::Basic.max_products(), Some(50));
//! assert!(Tier::Basic.allows_product_count(49));
//! assert!(!Tier::Basic.allows_product_count(50));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod stock;
pub mod tier;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shopkeep_core::Product` instead of
// `use shopkeep_core::types::Product`

pub use error::ValidationError;
pub use stock::{check_low_stock, is_low_stock, LowStockAlert, LowStockTracker};
pub use tier::{Feature, Tier, BASIC_MAX_PRODUCTS, PREMIUM_MAX_PRODUCTS};
pub use types::*;
