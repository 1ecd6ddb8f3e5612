//! # Validation Module
//!
//! Input validation utilities for Vela Shop.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request layer (external collaborator)                         │
//! │  ├── THIS MODULE: shape checks on ids, names, prices, quantities        │
//! │  └── Rejects bad input before it ever reaches the Store                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store operations                                              │
//! │  ├── Re-checks positive price/quantity (InvalidInput)                   │
//! │  └── Never corrupts state on bad input that slipped through             │
//! │                                                                         │
//! │  Defense in depth: both layers catch different mistakes                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vela_core::money::Money;
//! use vela_core::validation::{validate_item_id, validate_quantity, validate_price};
//!
//! validate_item_id("item1").unwrap();
//! validate_quantity(5).unwrap();
//! validate_price(Money::from_cents(1099)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{
    MAX_DISCOUNT_CODE_LEN, MAX_ITEM_ID_LEN, MAX_ITEM_NAME_LEN, MAX_ITEM_PRICE_CENTS,
    MAX_ITEM_QUANTITY,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a user id.
///
/// ## Rules
/// - Must not be empty (after trimming)
pub fn validate_user_id(user_id: &str) -> ValidationResult<()> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "user_id".to_string(),
        });
    }

    Ok(())
}

/// Validates an item id.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
///
/// ## Example
/// ```rust
/// use vela_core::validation::validate_item_id;
///
/// assert!(validate_item_id("item1").is_ok());
/// assert!(validate_item_id("").is_err());
/// assert!(validate_item_id("A".repeat(200).as_str()).is_err());
/// ```
pub fn validate_item_id(item_id: &str) -> ValidationResult<()> {
    let item_id = item_id.trim();

    if item_id.is_empty() {
        return Err(ValidationError::Required {
            field: "item_id".to_string(),
        });
    }

    if item_id.len() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "item_id".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    Ok(())
}

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a discount code's syntax (not its existence or used state -
/// that is the Store's job, and it deliberately reports both the same way).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Must contain only letters, numbers, and hyphens (`SAVE10-0001`)
pub fn validate_discount_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "discount_code".to_string(),
        });
    }

    if code.len() > MAX_DISCOUNT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "discount_code".to_string(),
            max: MAX_DISCOUNT_CODE_LEN,
        });
    }

    if !code.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "discount_code".to_string(),
            reason: "must contain only letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (1000)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be positive (> 0) - free items are not sold here
/// - Must not exceed $999,999.99
///
/// ## Example
/// ```rust
/// use vela_core::money::Money;
/// use vela_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_ITEM_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 1,
            max: MAX_ITEM_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
