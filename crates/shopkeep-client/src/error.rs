//! # Client Error Type
//!
//! Unified error type for client-layer operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopkeep                               │
//! │                                                                         │
//! │  Frontend                     Client Layer                              │
//! │  ────────                     ────────────                              │
//! │                                                                         │
//! │  add_product(...)                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  InventoryStore operation                                        │  │
//! │  │  Result<T, ClientError>                                          │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store error?  ──── StoreError::NotFound ───────┐               │  │
//! │  │         │                                       │               │  │
//! │  │         ▼                                       ▼               │  │
//! │  │  Tier cap hit? ──── LimitExceeded ───────── ClientError ───────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  LimitExceeded   → upgrade prompt                                      │
//! │  Store/Timeout   → retry affordance, stale data stays visible          │
//! │  NotFound        → record vanished (or belongs to someone else)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Expected failures resolve to these variants and are mirrored into the
//! store's `error` state for the presentation layer; they never panic past
//! the client boundary.

use std::time::Duration;

use thiserror::Error;

use shopkeep_core::error::ValidationError;
use shopkeep_core::tier::Tier;
use shopkeep_store::StoreError;

/// Errors surfaced by client-layer operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No authenticated owner in the session.
    ///
    /// ## When This Occurs
    /// - An operation ran after sign-out or before sign-in
    #[error("Not signed in")]
    NotAuthenticated,

    /// The subscription tier's product cap is reached.
    ///
    /// Distinguishable so the presentation layer can route to the upgrade
    /// prompt instead of a generic error banner.
    #[error("Product limit reached for {tier} tier ({limit} products)")]
    LimitExceeded { tier: Tier, limit: u32 },

    /// Record not found, or owned by a different user (an owner-scoped
    /// mutation matched zero rows).
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation (e.g. duplicate budget category).
    #[error("Duplicate {field}: '{value}' already exists")]
    Conflict { field: String, value: String },

    /// Not enough stock to cover a sale line.
    #[error("Insufficient stock for {title}: available {available}, requested {requested}")]
    InsufficientStock {
        title: String,
        available: i64,
        requested: i64,
    },

    /// The sale record landed but the stock decrement did not.
    ///
    /// ## When This Occurs
    /// - `record_sale` inserted the Sale, then the product update failed
    ///
    /// There is no compensating rollback across the two collections; the
    /// sale id is carried so the caller can reconcile.
    #[error("Sale {sale_id} recorded but stock update failed: {source}")]
    PartialSale {
        sale_id: String,
        #[source]
        source: Box<ClientError>,
    },

    /// A remote call exceeded the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Input validation failed before any remote call.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Any other remote store failure (transient network/backend errors).
    #[error(transparent)]
    Store(StoreError),
}

/// Converts store errors, lifting the variants the presentation layer
/// distinguishes.
impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ClientError::NotFound { entity, id },
            StoreError::Conflict { field, value } => ClientError::Conflict { field, value },
            other => ClientError::Store(other),
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_exceeded_message() {
        let err = ClientError::LimitExceeded {
            tier: Tier::Basic,
            limit: 50,
        };
        assert_eq!(
            err.to_string(),
            "Product limit reached for Basic tier (50 products)"
        );
    }

    #[test]
    fn test_store_not_found_is_lifted() {
        let err: ClientError = StoreError::not_found("Product", "p-1").into();
        assert!(matches!(err, ClientError::NotFound { .. }));

        let err: ClientError = StoreError::Unavailable.into();
        assert!(matches!(err, ClientError::Store(StoreError::Unavailable)));
    }
}
