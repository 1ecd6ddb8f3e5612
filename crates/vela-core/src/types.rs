//! # Domain Types
//!
//! Core domain types used throughout Vela Shop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    CartItem     │   │      Cart       │   │     Order       │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  item_id        │   │  user_id        │   │  order_id       │        │
//! │  │  name           │   │  items          │   │  items (frozen) │        │
//! │  │  price          │   │  (insertion     │   │  subtotal       │        │
//! │  │  quantity       │   │   order)        │   │  total          │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  DiscountCode   │   │   Statistics    │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  SAVE10-0001    │   │  recomputed     │                              │
//! │  │  used/used_at   │   │  on every call  │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serde Field Names
//! These structs double as the snapshot wire shapes, so the serde field names
//! (`item_id`, `price`, `discount_code`, ...) are load-bearing: the snapshot
//! file must stay field-for-field compatible across versions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::DISCOUNT_PERCENT;

// =============================================================================
// Cart Item
// =============================================================================

/// A line in a shopping cart.
///
/// ## Design Notes
/// - `item_id` is unique within one cart; adding the same id again merges
///   into the existing line by incrementing `quantity`.
/// - `name` and `price` are frozen at first add. Re-adding the same item
///   does NOT update them, so a mid-cart price change never drifts a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Item identifier - unique within a cart.
    pub item_id: String,

    /// Display name at time of adding (frozen).
    pub name: String,

    /// Price per unit at time of adding (frozen).
    pub price: Money,

    /// Quantity in cart.
    pub quantity: i64,
}

impl CartItem {
    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A per-user shopping cart.
///
/// ## Invariants
/// - Lines are unique by `item_id` (adding the same item merges quantities)
/// - Line order is insertion order
/// - An absent cart and an empty cart are equivalent for reads; the Store
///   hands out a consistent empty-cart shape either way
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Owner of this cart.
    pub user_id: String,

    /// Lines in the cart, in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart for a user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Cart {
            user_id: user_id.into(),
            items: Vec::new(),
        }
    }

    /// Adds an item to the cart, merging with an existing line.
    ///
    /// ## Behavior
    /// - If a line with the same `item_id` exists: increments its quantity;
    ///   the existing line's name and price are retained
    /// - Otherwise: appends a new line, preserving insertion order
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(line) = self.items.iter_mut().find(|l| l.item_id == item.item_id) {
            line.quantity += item.quantity;
            return;
        }
        self.items.push(item);
    }

    /// Removes the line with the given item id, if present.
    ///
    /// Removal is idempotent: a missing id is a no-op, never an error.
    pub fn remove_item(&mut self, item_id: &str) {
        self.items.retain(|l| l.item_id != item_id);
    }

    /// Returns the number of unique lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the cart subtotal as an exact sum of line totals.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Order
// =============================================================================

/// A completed order.
///
/// Created once at checkout and immutable thereafter. The `items` are a deep
/// copy of the cart's lines at checkout time, so later cart activity can
/// never retroactively alter a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Order identifier, `ORD-NNNNNN`, zero-padded, 1-based, gapless.
    pub order_id: String,

    /// User who placed the order.
    pub user_id: String,

    /// Line snapshot copied from the cart at checkout time.
    pub items: Vec<CartItem>,

    /// Exact sum of line totals.
    pub subtotal: Money,

    /// Discount code applied at checkout, if any.
    pub discount_code: Option<String>,

    /// Discount amount (10% of subtotal, rounded half-up to the cent).
    pub discount_amount: Money,

    /// `subtotal - discount_amount`.
    pub total: Money,

    /// When the order was placed.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the total quantity of items in this order.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Discount Code
// =============================================================================

/// A single-use loyalty discount code.
///
/// ## Lifecycle
/// Minted unused (automatically every Nth order, or manually by an admin),
/// then consumed at most once: `used` transitions false → true exactly once,
/// at checkout time, together with `used_at`. Never reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountCode {
    /// Code value, `SAVE10-NNNN`, zero-padded, 1-based, gapless.
    pub code: String,

    /// Discount percentage (fixed at 10).
    #[serde(default = "default_discount_percent")]
    pub discount_percent: u32,

    /// When the code was minted.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Whether the code has been consumed by a checkout.
    #[serde(default)]
    pub used: bool,

    /// When the code was consumed, if it has been.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub used_at: Option<DateTime<Utc>>,
}

impl DiscountCode {
    /// Creates a fresh unused code minted now.
    pub fn new(code: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        DiscountCode {
            code: code.into(),
            discount_percent: DISCOUNT_PERCENT,
            created_at,
            used: false,
            used_at: None,
        }
    }
}

fn default_discount_percent() -> u32 {
    DISCOUNT_PERCENT
}

// =============================================================================
// Statistics
// =============================================================================

/// Aggregate store statistics for the admin collaborator.
///
/// Recomputed from the order log on every call - no cached counters, so the
/// numbers can never go stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Statistics {
    /// Sum over all orders, all lines, of quantity.
    pub total_items_purchased: i64,

    /// Sum of order totals.
    pub total_purchase_amount: Money,

    /// Sum of order discount amounts.
    pub total_discount_amount: Money,

    /// Number of completed orders.
    pub total_orders: u64,

    /// Every discount code ever minted, in generation order.
    pub discount_codes: Vec<DiscountCode>,
}

// =============================================================================
// Unit Tests
// =============================================================================
