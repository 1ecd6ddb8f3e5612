//! # Error Types
//!
//! Domain-specific error types for vela-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vela-core errors (this file)                                           │
//! │  ├── StoreError       - Business rule violations in Store operations    │
//! │  └── ValidationError  - Input shape failures at the boundary            │
//! │                                                                         │
//! │  vela-store errors (separate crate)                                     │
//! │  └── SnapshotError    - Persistence failures (logged, never surfaced)   │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → transport error → client          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Every StoreError is caller-correctable; none are fatal to the Store

use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// Business rule violations surfaced by Store operations.
///
/// These should be caught by the request layer and translated to
/// transport-level error signaling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Non-positive price or quantity reached the Store.
    ///
    /// ## When This Occurs
    /// - The boundary validation was skipped or bypassed
    /// - The Store rejects the input rather than corrupting cart state
    #[error("{field} must be positive")]
    InvalidInput { field: String },

    /// Checkout attempted with no cart or an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Discount code is unknown or already used.
    ///
    /// The two cases are deliberately NOT distinguished: an attacker probing
    /// for codes learns nothing about whether a code exists.
    #[error("Invalid or already used discount code")]
    InvalidDiscountCode,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Creates an InvalidInput error for a given field.
    pub fn invalid_input(field: impl Into<String>) -> Self {
        StoreError::InvalidInput {
            field: field.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Used for early validation before Store operations run.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed discount code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
