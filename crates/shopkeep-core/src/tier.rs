//! # Subscription Tiers
//!
//! Tier rules for Shopkeep subscriptions.
//!
//! ## Tier Ladder
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Subscription Tiers                                 │
//! │                                                                         │
//! │   Tier        Max Products    Features                                  │
//! │   ──────      ────────────    ────────────────────────────────────      │
//! │   Basic       50              —                                         │
//! │   Premium     150             reports, advanced analytics               │
//! │   Enterprise  unbounded       reports, advanced analytics,              │
//! │                               custom alerts                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fail-Open Default
//! Everywhere a tier cannot be determined (missing record, unreachable
//! store) the application falls back to `Basic` — the most
//! storage-constrained but still fully functional tier, never an unbounded
//! or crashing state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Product cap for the Basic tier.
pub const BASIC_MAX_PRODUCTS: u32 = 50;

/// Product cap for the Premium tier.
pub const PREMIUM_MAX_PRODUCTS: u32 = 150;

// =============================================================================
// Tier
// =============================================================================

/// A subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
#[ts(export)]
pub enum Tier {
    /// Entry tier, 50 products.
    Basic,
    /// Paid tier, 150 products plus reporting features.
    Premium,
    /// Top tier, unbounded products and all features.
    Enterprise,
}

impl Tier {
    /// Maximum number of products an owner on this tier may hold.
    ///
    /// `None` means unbounded.
    pub const fn max_products(&self) -> Option<u32> {
        match self {
            Tier::Basic => Some(BASIC_MAX_PRODUCTS),
            Tier::Premium => Some(PREMIUM_MAX_PRODUCTS),
            Tier::Enterprise => None,
        }
    }

    /// Whether `count` existing products leave room for one more.
    pub fn allows_product_count(&self, count: i64) -> bool {
        match self.max_products() {
            Some(limit) => count < limit as i64,
            None => true,
        }
    }

    /// Whether this tier includes the given feature.
    pub const fn allows(&self, feature: Feature) -> bool {
        match (self, feature) {
            (Tier::Basic, _) => false,
            (Tier::Premium, Feature::CustomAlerts) => false,
            (Tier::Premium, _) => true,
            (Tier::Enterprise, _) => true,
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Basic
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tier::Basic => "Basic",
            Tier::Premium => "Premium",
            Tier::Enterprise => "Enterprise",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Basic" => Ok(Tier::Basic),
            "Premium" => Ok(Tier::Premium),
            "Enterprise" => Ok(Tier::Enterprise),
            other => Err(format!("unknown tier: {}", other)),
        }
    }
}

// =============================================================================
// Gated Features
// =============================================================================

/// Features gated behind paid tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Exporting sales/expense reports.
    ReportGeneration,
    /// Charts beyond the basic dashboard.
    AdvancedAnalytics,
    /// User-defined alert rules.
    CustomAlerts,
}

// =============================================================================
// Unit Tests
// =============================================================================
