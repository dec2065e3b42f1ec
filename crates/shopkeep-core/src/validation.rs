//! # Validation Module
//!
//! Input validation for Shopkeep records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend forms                                               │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Client operations (Rust)                                     │
//! │  └── THIS MODULE: rules run before any remote call                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote store                                                 │
//! │  └── NOT NULL / UNIQUE constraints                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{NewExpense, NewProduct, ProductPatch};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a stock-keeping code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an expense description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 500,
        });
    }

    Ok(())
}

/// Validates a category label.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if category.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (free items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero means out of stock
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a reorder point.
pub fn validate_reorder_point(threshold: i64) -> ValidationResult<()> {
    if threshold < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "reorder_point".to_string(),
        });
    }

    Ok(())
}

/// Validates an expense or sale amount in cents.
///
/// ## Rules
/// - Must be positive (> 0); a zero expense is meaningless
pub fn validate_amount_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates the number of units in a sale line.
pub fn validate_sale_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity_sold".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates all fields of a product about to be created.
pub fn validate_new_product(new: &NewProduct) -> ValidationResult<()> {
    validate_title(&new.title)?;
    validate_price_cents(new.price_cents)?;
    validate_quantity(new.quantity)?;
    if let Some(sku) = &new.sku {
        validate_sku(sku)?;
    }
    if let Some(category) = &new.category {
        validate_category(category)?;
    }
    if let Some(threshold) = new.reorder_point {
        validate_reorder_point(threshold)?;
    }
    Ok(())
}

/// Validates the set fields of a product patch.
pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(price_cents) = patch.price_cents {
        validate_price_cents(price_cents)?;
    }
    if let Some(quantity) = patch.quantity {
        validate_quantity(quantity)?;
    }
    if let Some(Some(sku)) = &patch.sku {
        validate_sku(sku)?;
    }
    if let Some(Some(category)) = &patch.category {
        validate_category(category)?;
    }
    if let Some(Some(threshold)) = patch.reorder_point {
        validate_reorder_point(threshold)?;
    }
    Ok(())
}

/// Validates all fields of an expense about to be logged.
pub fn validate_new_expense(new: &NewExpense) -> ValidationResult<()> {
    validate_description(&new.description)?;
    validate_amount_cents(new.amount_cents)?;
    validate_category(&new.category)?;
    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a record id.
///
/// ## Rules
/// - Must be a valid UUID: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Blue Mug").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("MUG-01").is_ok());
        assert!(validate_sku("item_2").is_ok());
        assert!(validate_sku("").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_price_and_quantity() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-1).is_err());

        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(10).is_ok());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_amounts() {
        assert!(validate_amount_cents(500).is_ok());
        assert!(validate_amount_cents(0).is_err());
        assert!(validate_amount_cents(-10).is_err());

        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(0).is_err());
    }

    #[test]
    fn test_validate_new_product() {
        let mut new = NewProduct::new("Blue Mug", 1250, 10);
        assert!(validate_new_product(&new).is_ok());

        new.price_cents = -1;
        assert!(validate_new_product(&new).is_err());

        new.price_cents = 1250;
        new.sku = Some("bad sku".to_string());
        assert!(validate_new_product(&new).is_err());
    }

    #[test]
    fn test_validate_product_patch() {
        assert!(validate_product_patch(&ProductPatch::default()).is_ok());
        assert!(validate_product_patch(&ProductPatch::quantity(5)).is_ok());

        let patch = ProductPatch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_product_patch(&patch).is_err());

        let patch = ProductPatch {
            reorder_point: Some(Some(-2)),
            ..Default::default()
        };
        assert!(validate_product_patch(&patch).is_err());
    }

    #[test]
    fn test_validate_new_expense() {
        let new = NewExpense {
            description: "Printer paper".to_string(),
            amount_cents: 1599,
            category: "Supplies".to_string(),
            date: Utc::now(),
            notes: None,
        };
        assert!(validate_new_expense(&new).is_ok());

        let bad = NewExpense {
            amount_cents: 0,
            ..new
        };
        assert!(validate_new_expense(&bad).is_err());
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_id("").is_err());
        assert!(validate_id("not-a-uuid").is_err());
    }
}
