//! # vela-core: Pure Business Logic for Vela Shop
//!
//! This crate is the **heart** of Vela Shop. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vela Shop Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │              Request Layer (external collaborator)              │    │
//! │  │    add item ─► remove item ─► checkout ─► statistics            │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ vela-core (THIS CRATE) ★                        │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│    │    │
//! │  │   │   Cart    │  │   Money   │  │ StoreError│  │   rules   │    │    │
//! │  │   │   Order   │  │  percent  │  │           │  │  checks   │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO FILE SYSTEM • NO NETWORK • PURE FUNCTIONS         │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                  vela-store (Stateful Layer)                    │    │
//! │  │           Store operations, snapshot persistence                │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Cart, Order, DiscountCode, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system and network access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use vela_core::money::Money;
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(1999); // $19.99
//!
//! // 10% loyalty discount, rounded half-up to the cent
//! let discount = subtotal.percent_of(10);
//! assert_eq!(discount.cents(), 200); // $2.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vela_core::Money` instead of
// `use vela_core::money::Money`

pub use error::{StoreError, StoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default discount interval: every 5th order mints a loyalty code.
///
/// Configurable per Store instance; a loaded snapshot's value wins over
/// the configured one so a restarted server keeps its previous cadence.
pub const DEFAULT_DISCOUNT_INTERVAL: u32 = 5;

/// Discount percentage carried by every loyalty code.
///
/// Fixed at 10%: the code format (`SAVE10-`) bakes the rate into the code
/// itself, so changing this means changing the prefix too.
pub const DISCOUNT_PERCENT: u32 = 10;

/// Order id prefix. Ids look like `ORD-000042`.
pub const ORDER_ID_PREFIX: &str = "ORD-";

/// Discount code prefix. Codes look like `SAVE10-0007`.
pub const DISCOUNT_CODE_PREFIX: &str = "SAVE10-";

/// Maximum length of an item id.
pub const MAX_ITEM_ID_LEN: usize = 100;

/// Maximum length of an item name.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Maximum length of a discount code supplied at checkout.
pub const MAX_DISCOUNT_CODE_LEN: usize = 50;

/// Maximum quantity of a single line in a cart.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 1000;

/// Maximum unit price in cents ($999,999.99).
pub const MAX_ITEM_PRICE_CENTS: i64 = 99_999_999;
