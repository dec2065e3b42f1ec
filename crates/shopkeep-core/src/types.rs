//! # Domain Types
//!
//! Core domain types used throughout Shopkeep.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Expense      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  owner_id       │   │  product_id     │   │  owner_id       │       │
//! │  │  title          │   │  quantity_sold  │   │  description    │       │
//! │  │  price_cents    │   │  sale_price     │   │  amount_cents   │       │
//! │  │  quantity       │   │  sale_date      │   │  category       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Budget       │   │   TierRecord    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  category       │   │  owner_id (key) │                             │
//! │  │  limit_cents    │   │  tier           │                             │
//! │  │  spent_cents    │   │  updated_at     │                             │
//! │  │  period         │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Every record carries the `owner_id` of the authenticated user who created
//! it. The owner is immutable after creation, and every store query is
//! filtered by it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A product in the owner's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4), assigned by the store on insert.
    pub id: String,

    /// The authenticated user this product belongs to. Immutable.
    pub owner_id: String,

    /// Display name. Never empty.
    pub title: String,

    /// Unit price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Units currently in stock. Never negative.
    pub quantity: i64,

    /// Optional category label ("Beverages", "Office", ...).
    pub category: Option<String>,

    /// Optional stock-keeping code.
    pub sku: Option<String>,

    /// Optional image reference (URI).
    pub image_url: Option<String>,

    /// Quantity threshold at or below which a low-stock alert fires.
    pub reorder_point: Option<i64>,

    /// Whether the product is active (soft delete).
    pub is_active: bool,

    /// When the product was created, stamped by the store.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether `requested` units can be sold from current stock.
    pub fn can_sell(&self, requested: i64) -> bool {
        requested > 0 && self.quantity >= requested
    }
}

/// Fields for creating a product. Id, owner and timestamp are stamped by the
/// store on insert.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub title: String,
    pub price_cents: i64,
    pub quantity: i64,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub image_url: Option<String>,
    pub reorder_point: Option<i64>,
    pub is_active: bool,
}

impl NewProduct {
    /// Creates a minimal active product with the given title, price and stock.
    pub fn new(title: impl Into<String>, price_cents: i64, quantity: i64) -> Self {
        NewProduct {
            title: title.into(),
            price_cents,
            quantity,
            category: None,
            sku: None,
            image_url: None,
            reorder_point: None,
            is_active: true,
        }
    }

    /// Sets the category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the stock-keeping code.
    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Sets the reorder point.
    pub fn reorder_point(mut self, threshold: i64) -> Self {
        self.reorder_point = Some(threshold);
        self
    }
}

/// A partial update for a product.
///
/// ## Semantics
/// `None` leaves the field untouched; `Some` replaces it. Optional columns
/// use a double `Option`: `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub price_cents: Option<i64>,
    pub quantity: Option<i64>,
    pub category: Option<Option<String>>,
    pub sku: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub reorder_point: Option<Option<i64>>,
}

impl ProductPatch {
    /// A patch that only changes the stock quantity.
    pub fn quantity(quantity: i64) -> Self {
        ProductPatch {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    /// True when no field is set (applying it would be a no-op).
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price_cents.is_none()
            && self.quantity.is_none()
            && self.category.is_none()
            && self.sku.is_none()
            && self.image_url.is_none()
            && self.reorder_point.is_none()
    }

    /// Applies the patch to a product, returning the updated copy.
    pub fn apply_to(&self, product: &Product) -> Product {
        let mut updated = product.clone();
        if let Some(title) = &self.title {
            updated.title = title.clone();
        }
        if let Some(price_cents) = self.price_cents {
            updated.price_cents = price_cents;
        }
        if let Some(quantity) = self.quantity {
            updated.quantity = quantity;
        }
        if let Some(category) = &self.category {
            updated.category = category.clone();
        }
        if let Some(sku) = &self.sku {
            updated.sku = sku.clone();
        }
        if let Some(image_url) = &self.image_url {
            updated.image_url = image_url.clone();
        }
        if let Some(reorder_point) = self.reorder_point {
            updated.reorder_point = reorder_point;
        }
        updated
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: String,
    pub owner_id: String,
    /// The product this sale references.
    pub product_id: String,
    /// Units sold. Always positive.
    pub quantity_sold: i64,
    /// Total sale price in cents (unit price × quantity at time of sale).
    pub sale_price_cents: i64,
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Fields for recording a sale. Id, owner and timestamp are store-stamped;
/// the price is computed by the caller from the product snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSale {
    pub product_id: String,
    pub quantity_sold: i64,
    pub sale_price_cents: i64,
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
    pub notes: Option<String>,
}

// =============================================================================
// Expense
// =============================================================================

/// An owner-scoped expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Expense {
    pub id: String,
    pub owner_id: String,
    pub description: String,
    /// Amount in cents. Always positive.
    pub amount_cents: i64,
    pub category: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Fields for logging an expense.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewExpense {
    pub description: String,
    pub amount_cents: i64,
    pub category: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

// =============================================================================
// Budget
// =============================================================================

/// Budgeting period for a category budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl Default for BudgetPeriod {
    fn default() -> Self {
        BudgetPeriod::Monthly
    }
}

/// An owner-scoped spending budget for one expense category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Budget {
    pub id: String,
    pub owner_id: String,
    /// Expense category this budget tracks. Unique per owner.
    pub category: String,
    /// Spending limit in cents.
    pub limit_cents: i64,
    /// Accumulated spend in cents.
    pub spent_cents: i64,
    pub period: BudgetPeriod,
    /// Whether threshold notifications are enabled for this budget.
    pub notifications: bool,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Progress toward the limit as a percentage, clamped to [0, 100].
    ///
    /// A zero limit reads as 0% untouched and 100% once anything is spent.
    pub fn progress_percent(&self) -> f64 {
        if self.limit_cents <= 0 {
            return if self.spent_cents > 0 { 100.0 } else { 0.0 };
        }
        let pct = self.spent_cents as f64 / self.limit_cents as f64 * 100.0;
        pct.clamp(0.0, 100.0)
    }

    /// True once spend has reached or passed the limit.
    pub fn is_exhausted(&self) -> bool {
        self.spent_cents >= self.limit_cents
    }
}

/// Fields for creating a budget. Spend starts at zero.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewBudget {
    pub category: String,
    pub limit_cents: i64,
    pub period: BudgetPeriod,
    pub notifications: bool,
    pub notes: Option<String>,
}

// =============================================================================
// Tier Record
// =============================================================================

/// The stored subscription tier for one owner.
///
/// Upserted keyed by `owner_id`; read with a safe fallback to
/// [`Tier::Basic`](crate::tier::Tier) on any lookup failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TierRecord {
    pub owner_id: String,
    pub tier: crate::tier::Tier,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64) -> Product {
        Product {
            id: "p-1".to_string(),
            owner_id: "owner-1".to_string(),
            title: "Blue Mug".to_string(),
            price_cents: 1250,
            quantity,
            category: None,
            sku: None,
            image_url: None,
            reorder_point: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_sell() {
        let p = product(5);
        assert!(p.can_sell(5));
        assert!(p.can_sell(1));
        assert!(!p.can_sell(6));
        assert!(!p.can_sell(0));
        assert!(!p.can_sell(-1));
    }

    #[test]
    fn test_patch_apply_replaces_set_fields_only() {
        let p = product(5);
        let patch = ProductPatch {
            title: Some("Red Mug".to_string()),
            quantity: Some(2),
            ..Default::default()
        };

        let updated = patch.apply_to(&p);
        assert_eq!(updated.title, "Red Mug");
        assert_eq!(updated.quantity, 2);
        assert_eq!(updated.price_cents, 1250); // untouched
        assert_eq!(updated.id, p.id);
    }

    #[test]
    fn test_patch_clears_optional_field() {
        let mut p = product(5);
        p.sku = Some("MUG-01".to_string());

        let patch = ProductPatch {
            sku: Some(None),
            ..Default::default()
        };
        let updated = patch.apply_to(&p);
        assert_eq!(updated.sku, None);
    }

    #[test]
    fn test_empty_patch() {
        assert!(ProductPatch::default().is_empty());
        assert!(!ProductPatch::quantity(3).is_empty());
    }

    #[test]
    fn test_budget_progress_clamps() {
        let mut b = Budget {
            id: "b-1".to_string(),
            owner_id: "owner-1".to_string(),
            category: "Supplies".to_string(),
            limit_cents: 10_000,
            spent_cents: 2_500,
            period: BudgetPeriod::Monthly,
            notifications: true,
            notes: None,
            created_at: Utc::now(),
        };
        assert!((b.progress_percent() - 25.0).abs() < f64::EPSILON);

        b.spent_cents = 15_000;
        assert!((b.progress_percent() - 100.0).abs() < f64::EPSILON);
        assert!(b.is_exhausted());
    }

    #[test]
    fn test_budget_progress_zero_limit() {
        let mut b = Budget {
            id: "b-1".to_string(),
            owner_id: "owner-1".to_string(),
            category: "Supplies".to_string(),
            limit_cents: 0,
            spent_cents: 0,
            period: BudgetPeriod::Monthly,
            notifications: false,
            notes: None,
            created_at: Utc::now(),
        };
        assert_eq!(b.progress_percent(), 0.0);

        b.spent_cents = 1;
        assert_eq!(b.progress_percent(), 100.0);
    }

    #[test]
    fn test_budget_period_default() {
        assert_eq!(BudgetPeriod::default(), BudgetPeriod::Monthly);
    }
}
