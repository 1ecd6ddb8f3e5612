//! # Store
//!
//! The single stateful object of the system: owns carts, orders, discount
//! codes, the order counter, and config; enforces checkout invariants; and
//! snapshots its full state after every mutation.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    checkout(user_id, code?)                             │
//! │                                                                         │
//! │  1. VALIDATE (no mutations yet)                                         │
//! │     ├── cart present and non-empty?        → else EmptyCart             │
//! │     └── code supplied? exists AND unused?  → else InvalidDiscountCode   │
//! │                                                                         │
//! │  2. COMMIT (no failure possible from here on)                           │
//! │     ├── mark code used, stamp used_at                                   │
//! │     ├── append Order (deep-copied lines, ORD-NNNNNN)                    │
//! │     ├── order_count += 1                                                │
//! │     ├── order_count % n == 0? → mint SAVE10-NNNN                        │
//! │     ├── remove the cart entry                                           │
//! │     └── persist full state (best-effort)                                │
//! │                                                                         │
//! │  Validate-then-commit in one pass: a failed checkout leaves no          │
//! │  observable trace, without any rollback machinery.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence Contract
//! Every successful mutating operation attempts exactly one snapshot save.
//! A failing save is logged and swallowed: the in-memory state stays
//! authoritative for the process lifetime, at the known cost that an
//! unflushed mutation is lost on crash before the next successful save.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, warn};

use crate::snapshot::{self, Snapshot};
use vela_core::{
    Cart, CartItem, DiscountCode, Money, Order, Statistics, StoreError, StoreResult,
    DEFAULT_DISCOUNT_INTERVAL, DISCOUNT_CODE_PREFIX, ORDER_ID_PREFIX,
};

// =============================================================================
// Store Configuration
// =============================================================================

/// Configuration for a Store instance.
///
/// ## Fields
/// - `discount_interval`: every nth order mints a loyalty code (default 5).
///   A loaded snapshot's interval wins over this value, so a restarted
///   server keeps its previous cadence.
/// - `data_path`: where the snapshot file lives.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Every nth order mints a discount code. Clamped to at least 1.
    pub discount_interval: u32,

    /// Snapshot file location.
    pub data_path: PathBuf,
}

impl StoreConfig {
    /// Creates a config with the default discount interval.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            discount_interval: DEFAULT_DISCOUNT_INTERVAL,
            data_path: data_path.into(),
        }
    }

    /// Overrides the discount interval. Values below 1 are clamped to 1.
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.discount_interval = interval.max(1);
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// The order-processing store.
///
/// ## Ownership
/// One Store owns all mutable state. Construct it once at startup with
/// [`Store::open`] (which loads the snapshot, or starts empty), hand it to
/// the request layer wrapped in a [`SharedStore`], and let it drop at
/// shutdown - the snapshot on disk is already current after every mutation.
#[derive(Debug)]
pub struct Store {
    /// Every nth order mints a discount code. Always >= 1.
    discount_interval: u32,

    /// Number of completed checkouts. Monotonically non-decreasing.
    order_count: u64,

    /// Open carts, keyed by user id. Absence of an entry reads as an
    /// empty cart.
    carts: HashMap<String, Cart>,

    /// Completed orders, append-only. The length also drives order-id
    /// allocation, which is safe because orders are never pruned.
    orders: Vec<Order>,

    /// Every discount code ever minted, in generation order. The length
    /// drives code numbering, which is safe because codes are never pruned.
    discount_codes: Vec<DiscountCode>,

    /// Snapshot file location.
    data_path: PathBuf,
}

impl Store {
    /// Opens a store: loads the snapshot at the configured path, or starts
    /// empty if the file is missing.
    ///
    /// An unreadable or unparseable snapshot is logged and discarded rather
    /// than refusing to start: availability is preferred over durability
    /// here, and operators are expected to monitor the warning.
    pub fn open(config: StoreConfig) -> Self {
        let mut store = Store {
            discount_interval: config.discount_interval.max(1),
            order_count: 0,
            carts: HashMap::new(),
            orders: Vec::new(),
            discount_codes: Vec::new(),
            data_path: config.data_path,
        };

        match snapshot::load(&store.data_path) {
            Ok(Some(snap)) => {
                store.restore(snap);
                debug!(
                    path = ?store.data_path,
                    orders = store.orders.len(),
                    carts = store.carts.len(),
                    codes = store.discount_codes.len(),
                    "Loaded store snapshot"
                );
            }
            Ok(None) => {
                debug!(path = ?store.data_path, "No snapshot found, starting empty");
            }
            Err(err) => {
                warn!(
                    path = ?store.data_path,
                    %err,
                    "Could not load snapshot, starting with an empty store"
                );
            }
        }

        store
    }

    /// Applies a loaded snapshot to this store.
    fn restore(&mut self, snap: Snapshot) {
        self.carts = snap.carts;
        self.orders = snap.orders;
        self.discount_codes = snap.discount_codes;
        // Older snapshots may predate the explicit counter field
        self.order_count = snap.order_count.unwrap_or(self.orders.len() as u64);
        if let Some(n) = snap.n {
            self.discount_interval = n.max(1);
        }
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    /// Returns the user's cart, creating and registering an empty one if
    /// none exists yet.
    pub fn get_or_create_cart(&mut self, user_id: &str) -> Cart {
        self.cart_entry(user_id).clone()
    }

    /// Adds an item to the user's cart.
    ///
    /// ## Behavior
    /// - Rejects non-positive price or quantity with `InvalidInput` before
    ///   touching any state (the boundary should have caught these, but the
    ///   Store must not corrupt a cart if they slip through)
    /// - Merges into an existing line with the same `item_id` by
    ///   incrementing its quantity; the line's name and price are retained
    /// - Otherwise appends a new line, preserving insertion order
    ///
    /// Persists on success and returns the updated cart.
    pub fn add_item(
        &mut self,
        user_id: &str,
        item_id: &str,
        name: &str,
        price: Money,
        quantity: i64,
    ) -> StoreResult<Cart> {
        if !price.is_positive() {
            return Err(StoreError::invalid_input("price"));
        }
        if quantity <= 0 {
            return Err(StoreError::invalid_input("quantity"));
        }

        debug!(user_id, item_id, quantity, "Adding item to cart");

        let cart = self.cart_entry(user_id);
        cart.add_item(CartItem {
            item_id: item_id.to_string(),
            name: name.to_string(),
            price,
            quantity,
        });
        let updated = cart.clone();

        self.persist();
        Ok(updated)
    }

    /// Removes an item from the user's cart.
    ///
    /// Removal is idempotent: a missing line, or a missing cart, is a no-op
    /// that still succeeds and returns the (unchanged) cart.
    pub fn remove_item(&mut self, user_id: &str, item_id: &str) -> Cart {
        match self.carts.get_mut(user_id) {
            Some(cart) => {
                debug!(user_id, item_id, "Removing item from cart");
                cart.remove_item(item_id);
                let updated = cart.clone();
                self.persist();
                updated
            }
            None => Cart::new(user_id),
        }
    }

    /// Returns the user's cart, or a consistent empty-cart shape if none
    /// exists. Read-only: never registers a cart.
    pub fn get_cart(&self, user_id: &str) -> Cart {
        self.carts
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| Cart::new(user_id))
    }

    /// Deletes the user's cart entry entirely. No-op if absent.
    pub fn clear_cart(&mut self, user_id: &str) {
        if self.carts.remove(user_id).is_some() {
            debug!(user_id, "Cleared cart");
            self.persist();
        }
    }

    /// Returns a mutable handle to the user's cart, registering an empty
    /// one if absent.
    fn cart_entry(&mut self, user_id: &str) -> &mut Cart {
        self.carts
            .entry(user_id.to_string())
            .or_insert_with(|| Cart::new(user_id))
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Checks out the user's cart into an immutable order.
    ///
    /// ## Failure Modes (all leave state untouched)
    /// - `EmptyCart`: no cart, or a cart with zero lines
    /// - `InvalidDiscountCode`: the supplied code is unknown or already
    ///   used - the two cases are deliberately indistinguishable to the
    ///   caller
    ///
    /// ## On Success
    /// The order is appended, the counter incremented, the consumed code
    /// (if any) marked used, a new code minted on interval boundaries, the
    /// cart removed, and the snapshot written - all inside one call, so no
    /// intermediate state is ever observable.
    pub fn checkout(&mut self, user_id: &str, discount_code: Option<&str>) -> StoreResult<Order> {
        // Validate everything before mutating anything. The line snapshot is
        // cloned here so the cart borrow ends before the commit phase.
        let items = match self.carts.get(user_id) {
            Some(cart) if !cart.is_empty() => cart.items.clone(),
            _ => return Err(StoreError::EmptyCart),
        };
        let subtotal: Money = items.iter().map(CartItem::line_total).sum();

        let code_index = match discount_code {
            Some(code) => Some(
                self.unused_code_index(code)
                    .ok_or(StoreError::InvalidDiscountCode)?,
            ),
            None => None,
        };

        // Commit phase: nothing below can fail.
        let now = Utc::now();

        let (discount_amount, applied_code) = match code_index {
            Some(index) => {
                let code = &mut self.discount_codes[index];
                code.used = true;
                code.used_at = Some(now);
                let amount = subtotal.percent_of(code.discount_percent);
                (amount, Some(code.code.clone()))
            }
            None => (Money::zero(), None),
        };

        let order = Order {
            order_id: format!("{}{:06}", ORDER_ID_PREFIX, self.orders.len() + 1),
            user_id: user_id.to_string(),
            items,
            subtotal,
            discount_code: applied_code,
            discount_amount,
            total: subtotal - discount_amount,
            created_at: now,
        };

        debug!(
            user_id,
            order_id = %order.order_id,
            total = %order.total,
            discounted = order.discount_code.is_some(),
            "Placing order"
        );

        self.orders.push(order.clone());
        self.order_count += 1;

        // Mint strictly after the order is counted, so the code number
        // tracks completed checkouts
        if self.order_count % u64::from(self.discount_interval) == 0 {
            let minted = self.mint_discount_code();
            debug!(code = %minted.code, "Minted loyalty discount code");
        }

        self.carts.remove(user_id);
        self.persist();

        Ok(order)
    }

    // -------------------------------------------------------------------------
    // Discount administration
    // -------------------------------------------------------------------------

    /// Manually mints a new discount code, outside the automatic nth-order
    /// trigger. Uses the same numbering sequence. Persists.
    pub fn generate_discount_code(&mut self) -> DiscountCode {
        let code = self.mint_discount_code();
        debug!(code = %code.code, "Manually generated discount code");
        self.persist();
        code
    }

    /// Pure lookup: returns the discount code entry matching `code`
    /// (case-sensitive) if it exists and is unused.
    pub fn validate_discount_code(&self, code: &str) -> Option<&DiscountCode> {
        self.discount_codes
            .iter()
            .find(|dc| dc.code == code && !dc.used)
    }

    /// Appends a fresh code to the sequence without persisting.
    ///
    /// Numbering derives from the sequence length, which is safe because
    /// codes are never pruned.
    fn mint_discount_code(&mut self) -> DiscountCode {
        let code = format!(
            "{}{:04}",
            DISCOUNT_CODE_PREFIX,
            self.discount_codes.len() + 1
        );
        let minted = DiscountCode::new(code, Utc::now());
        self.discount_codes.push(minted.clone());
        minted
    }

    /// Position of the unused code matching `code`, if any.
    fn unused_code_index(&self, code: &str) -> Option<usize> {
        // Linear scan: one code per interval keeps this list short
        self.discount_codes
            .iter()
            .position(|dc| dc.code == code && !dc.used)
    }

    // -------------------------------------------------------------------------
    // Statistics
    // -------------------------------------------------------------------------

    /// Computes aggregate statistics over the order log.
    ///
    /// Recomputed on every call: O(orders) in exchange for zero staleness
    /// risk, which is the right trade at expected data volumes.
    pub fn get_statistics(&self) -> Statistics {
        Statistics {
            total_items_purchased: self.orders.iter().map(Order::total_quantity).sum(),
            total_purchase_amount: self.orders.iter().map(|o| o.total).sum(),
            total_discount_amount: self.orders.iter().map(|o| o.discount_amount).sum(),
            total_orders: self.orders.len() as u64,
            discount_codes: self.discount_codes.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors (read-only views for tests and tooling)
    // -------------------------------------------------------------------------

    /// Completed orders, in placement order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Every discount code ever minted, in generation order.
    pub fn discount_codes(&self) -> &[DiscountCode] {
        &self.discount_codes
    }

    /// Number of completed checkouts.
    pub fn order_count(&self) -> u64 {
        self.order_count
    }

    /// The active discount interval.
    pub fn discount_interval(&self) -> u32 {
        self.discount_interval
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Writes the full state to the snapshot file, best-effort.
    ///
    /// A failure here is logged and swallowed: the in-memory state remains
    /// the source of truth, and the next mutation will try again.
    fn persist(&self) {
        let snap = Snapshot {
            n: Some(self.discount_interval),
            order_count: Some(self.order_count),
            carts: self.carts.clone(),
            orders: self.orders.clone(),
            discount_codes: self.discount_codes.clone(),
        };

        if let Err(err) = snapshot::save(&self.data_path, &snap) {
            warn!(
                path = ?self.data_path,
                %err,
                "Failed to persist snapshot; in-memory state remains authoritative"
            );
        }
    }
}

// =============================================================================
// Shared Store (mutual-exclusion wrapper)
// =============================================================================

/// Thread-safe handle to a Store.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Store>>` because:
/// - `Arc`: shared ownership across request-handler threads
/// - `Mutex`: one operation at a time, covering validate-then-commit-then-
///   persist as a single exclusion scope
///
/// Two concurrent checkouts therefore cannot claim the same discount code
/// or interleave order-id allocation. This is a correctness requirement of
/// the checkout design, not an optimization.
///
/// ## Why Not RwLock?
/// Almost every operation mutates (even cart reads may persist); a RwLock
/// would add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct SharedStore {
    store: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Opens a store (see [`Store::open`]) and wraps it for sharing.
    pub fn open(config: StoreConfig) -> Self {
        SharedStore {
            store: Arc::new(Mutex::new(Store::open(config))),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let stats = shared.with_store(|store| store.get_statistics());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        let store = self.store.lock().expect("Store mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let order = shared.with_store_mut(|store| store.checkout("u1", None))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.store.lock().expect("Store mutex poisoned");
        f(&mut store)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> Store {
        Store::open(StoreConfig::new(dir.path().join("store.json")))
    }

    fn add(store: &mut Store, user: &str, item: &str, cents: i64, qty: i64) -> Cart {
        store
            .add_item(user, item, &format!("Item {}", item), Money::from_cents(cents), qty)
            .unwrap()
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_item_merges_quantities() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        add(&mut store, "u1", "item1", 1000, 2);
        let cart = store
            .add_item("u1", "item1", "Renamed", Money::from_cents(9999), 3)
            .unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        // Original name and price retained: no mid-cart price drift
        assert_eq!(cart.items[0].name, "Item item1");
        assert_eq!(cart.items[0].price.cents(), 1000);
    }

    #[test]
    fn test_add_item_rejects_bad_input_without_touching_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        let err = store
            .add_item("u1", "item1", "Item", Money::zero(), 1)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { ref field } if field == "price"));

        let err = store
            .add_item("u1", "item1", "Item", Money::from_cents(100), 0)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { ref field } if field == "quantity"));

        let err = store
            .add_item("u1", "item1", "Item", Money::from_cents(100), -2)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { .. }));

        // No cart was registered by the failed adds
        assert!(store.get_cart("u1").is_empty());
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        add(&mut store, "u1", "item1", 1000, 2);

        let cart = store.remove_item("u1", "nope");
        assert_eq!(cart.item_count(), 1);

        let cart = store.remove_item("u1", "item1");
        assert!(cart.is_empty());

        // No cart at all: still succeeds with an empty-cart shape
        let cart = store.remove_item("stranger", "item1");
        assert!(cart.is_empty());
        assert_eq!(cart.user_id, "stranger");
    }

    #[test]
    fn test_get_cart_returns_empty_shape_without_registering() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        let cart = store.get_cart("u1");
        assert_eq!(cart.user_id, "u1");
        assert!(cart.is_empty());

        // get_or_create registers; plain get does not
        store.get_or_create_cart("u2");
        assert!(store.get_cart("u2").is_empty());
    }

    #[test]
    fn test_clear_cart_removes_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        add(&mut store, "u1", "item1", 1000, 2);
        store.clear_cart("u1");
        assert!(store.get_cart("u1").is_empty());

        // Clearing an absent cart is a no-op
        store.clear_cart("u1");
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    #[test]
    fn test_checkout_empty_or_absent_cart_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        // Absent cart
        assert!(matches!(
            store.checkout("u1", None),
            Err(StoreError::EmptyCart)
        ));

        // Registered but empty cart
        store.get_or_create_cart("u1");
        assert!(matches!(
            store.checkout("u1", None),
            Err(StoreError::EmptyCart)
        ));

        assert_eq!(store.order_count(), 0);
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_checkout_builds_immutable_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        add(&mut store, "u1", "item1", 1000, 2);
        add(&mut store, "u1", "item2", 499, 1);

        let order = store.checkout("u1", None).unwrap();

        assert_eq!(order.order_id, "ORD-000001");
        assert_eq!(order.user_id, "u1");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.subtotal.cents(), 2499);
        assert_eq!(order.discount_code, None);
        assert!(order.discount_amount.is_zero());
        assert_eq!(order.total.cents(), 2499);

        // Cart entry is gone, not just emptied
        assert!(store.get_cart("u1").is_empty());
        assert_eq!(store.order_count(), 1);

        // Later cart activity never touches the placed order
        add(&mut store, "u1", "item1", 7777, 9);
        assert_eq!(store.orders()[0].items[0].price.cents(), 1000);
    }

    #[test]
    fn test_order_ids_are_sequential_and_zero_padded() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        for i in 1..=3 {
            add(&mut store, "u1", "item1", 1000, 1);
            let order = store.checkout("u1", None).unwrap();
            assert_eq!(order.order_id, format!("ORD-{:06}", i));
        }
    }

    #[test]
    fn test_discount_code_minted_every_nth_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir); // interval 5

        for i in 1..=12u64 {
            add(&mut store, "u1", "item1", 1000, 1);
            store.checkout("u1", None).unwrap();

            let expected = i / 5;
            assert_eq!(
                store.discount_codes().len() as u64,
                expected,
                "after {} checkouts",
                i
            );
        }

        let codes: Vec<&str> = store
            .discount_codes()
            .iter()
            .map(|dc| dc.code.as_str())
            .collect();
        assert_eq!(codes, ["SAVE10-0001", "SAVE10-0002"]);
    }

    #[test]
    fn test_checkout_with_valid_code_applies_discount() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        let code = store.generate_discount_code();
        assert_eq!(code.code, "SAVE10-0001");

        add(&mut store, "u1", "item1", 1999, 1); // $19.99
        let order = store.checkout("u1", Some("SAVE10-0001")).unwrap();

        assert_eq!(order.subtotal.cents(), 1999);
        // 10% of $19.99 = $1.999 → rounds half-up to $2.00
        assert_eq!(order.discount_amount.cents(), 200);
        assert_eq!(order.total.cents(), 1799);
        assert_eq!(order.discount_code.as_deref(), Some("SAVE10-0001"));

        // Used flag flipped atomically with order creation
        let dc = &store.discount_codes()[0];
        assert!(dc.used);
        assert!(dc.used_at.is_some());
    }

    #[test]
    fn test_checkout_with_unknown_code_fails_and_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        add(&mut store, "u1", "item1", 1000, 2);
        let err = store.checkout("u1", Some("SAVE10-9999")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDiscountCode));

        // Cart untouched, nothing ordered
        assert_eq!(store.get_cart("u1").item_count(), 1);
        assert_eq!(store.order_count(), 0);
    }

    #[test]
    fn test_used_code_fails_every_later_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        store.generate_discount_code();

        add(&mut store, "u1", "item1", 1000, 1);
        store.checkout("u1", Some("SAVE10-0001")).unwrap();

        for _ in 0..2 {
            add(&mut store, "u2", "item1", 1000, 1);
            let err = store.checkout("u2", Some("SAVE10-0001")).unwrap_err();
            // Unknown and used codes are indistinguishable by design
            assert!(matches!(err, StoreError::InvalidDiscountCode));
            // The failed attempt left u2's cart alone
            assert_eq!(store.get_cart("u2").item_count(), 1);
            store.clear_cart("u2");
        }
    }

    #[test]
    fn test_validate_discount_code_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        store.generate_discount_code();

        assert!(store.validate_discount_code("SAVE10-0001").is_some());
        assert!(store.validate_discount_code("save10-0001").is_none()); // case-sensitive
        assert!(store.validate_discount_code("SAVE10-0002").is_none());

        add(&mut store, "u1", "item1", 1000, 1);
        store.checkout("u1", Some("SAVE10-0001")).unwrap();
        assert!(store.validate_discount_code("SAVE10-0001").is_none()); // consumed
    }

    #[test]
    fn test_manual_and_automatic_codes_share_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(
            StoreConfig::new(dir.path().join("store.json")).with_interval(2),
        );

        assert_eq!(store.generate_discount_code().code, "SAVE10-0001");

        add(&mut store, "u1", "item1", 1000, 1);
        store.checkout("u1", None).unwrap();
        add(&mut store, "u1", "item1", 1000, 1);
        store.checkout("u1", None).unwrap(); // 2nd order mints automatically

        assert_eq!(store.discount_codes()[1].code, "SAVE10-0002");
        assert_eq!(store.generate_discount_code().code, "SAVE10-0003");
    }

    // -------------------------------------------------------------------------
    // Statistics
    // -------------------------------------------------------------------------

    #[test]
    fn test_statistics_recomputed_over_order_log() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        let stats = store.get_statistics();
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_items_purchased, 0);
        assert!(stats.total_purchase_amount.is_zero());

        store.generate_discount_code();

        add(&mut store, "u1", "item1", 1000, 2); // $20.00
        store.checkout("u1", None).unwrap();

        add(&mut store, "u2", "item2", 500, 3); // $15.00
        store.checkout("u2", Some("SAVE10-0001")).unwrap(); // -$1.50

        let stats = store.get_statistics();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_items_purchased, 5);
        assert_eq!(stats.total_purchase_amount.cents(), 2000 + 1350);
        assert_eq!(stats.total_discount_amount.cents(), 150);
        assert_eq!(stats.discount_codes.len(), 1);
        assert!(stats.discount_codes[0].used);
    }

    // -------------------------------------------------------------------------
    // Persistence lifecycle
    // -------------------------------------------------------------------------

    #[test]
    fn test_reload_reproduces_logical_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let stats_before;
        {
            let mut store = Store::open(StoreConfig::new(&path));
            store.generate_discount_code();
            add(&mut store, "u1", "item1", 1999, 2);
            store.checkout("u1", Some("SAVE10-0001")).unwrap();
            add(&mut store, "u2", "item2", 500, 1); // left open in a cart
            stats_before = store.get_statistics();
        }

        let store = Store::open(StoreConfig::new(&path));
        assert_eq!(store.order_count(), 1);
        assert_eq!(store.orders().len(), 1);
        assert_eq!(store.orders()[0].order_id, "ORD-000001");
        assert_eq!(store.get_cart("u2").item_count(), 1);
        assert_eq!(store.get_statistics(), stats_before);
    }

    #[test]
    fn test_reload_preserves_id_sequences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = Store::open(StoreConfig::new(&path));
            add(&mut store, "u1", "item1", 1000, 1);
            store.checkout("u1", None).unwrap();
            store.generate_discount_code();
        }

        let mut store = Store::open(StoreConfig::new(&path));
        add(&mut store, "u1", "item1", 1000, 1);
        assert_eq!(store.checkout("u1", None).unwrap().order_id, "ORD-000002");
        assert_eq!(store.generate_discount_code().code, "SAVE10-0002");
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, b"definitely not json").unwrap();

        let store = Store::open(StoreConfig::new(&path));
        assert_eq!(store.order_count(), 0);
        assert!(store.orders().is_empty());
        assert!(store.discount_codes().is_empty());
    }

    #[test]
    fn test_snapshot_interval_wins_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(
            &path,
            br#"{"n": 2, "carts": {}, "orders": [], "discount_codes": []}"#,
        )
        .unwrap();

        let store = Store::open(StoreConfig::new(&path)); // configured 5
        assert_eq!(store.discount_interval(), 2);
    }

    #[test]
    fn test_missing_order_count_derived_from_orders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(
            &path,
            br#"{
              "n": 5,
              "carts": {},
              "orders": [{
                "order_id": "ORD-000001",
                "user_id": "u1",
                "items": [{"item_id": "a", "name": "A", "price": 1.0, "quantity": 1}],
                "subtotal": 1.0,
                "discount_code": null,
                "discount_amount": 0.0,
                "total": 1.0,
                "created_at": "2026-01-02T03:04:05Z"
              }],
              "discount_codes": []
            }"#,
        )
        .unwrap();

        let store = Store::open(StoreConfig::new(&path));
        assert_eq!(store.order_count(), 1);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        // Point the snapshot below a regular file, so creating the parent
        // directory fails on every save
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let path = blocker.path().join("store.json");

        let mut store = Store::open(StoreConfig::new(path));
        let cart = add(&mut store, "u1", "item1", 1000, 2);

        // The mutation succeeded despite the failing save
        assert_eq!(cart.item_count(), 1);
        assert_eq!(store.get_cart("u1").item_count(), 1);

        let order = store.checkout("u1", None).unwrap();
        assert_eq!(order.order_id, "ORD-000001");
    }

    // -------------------------------------------------------------------------
    // Shared store
    // -------------------------------------------------------------------------

    #[test]
    fn test_shared_store_serializes_checkouts() {
        let dir = tempfile::tempdir().unwrap();
        let shared = SharedStore::open(StoreConfig::new(dir.path().join("store.json")));

        let mut handles = Vec::new();
        for t in 0..4 {
            let shared = shared.clone();
            handles.push(std::thread::spawn(move || {
                let user = format!("u{}", t);
                for _ in 0..5 {
                    shared.with_store_mut(|store| {
                        store
                            .add_item(&user, "item1", "Item", Money::from_cents(100), 1)
                            .unwrap();
                        store.checkout(&user, None).unwrap()
                    });
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        shared.with_store(|store| {
            assert_eq!(store.order_count(), 20);

            // Order ids never collided or interleaved
            let mut ids: Vec<&str> =
                store.orders().iter().map(|o| o.order_id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), 20);

            // 20 checkouts at interval 5 minted exactly 4 codes
            assert_eq!(store.discount_codes().len(), 4);
        });
    }

    // -------------------------------------------------------------------------
    // End-to-end scenario
    // -------------------------------------------------------------------------

    /// The full loyalty loop: five plain checkouts earn a code, the sixth
    /// redeems it, the seventh fails to reuse it.
    #[test]
    fn test_loyalty_scenario_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        // Five checkouts of 2 × $10.00
        for i in 1..=5u64 {
            add(&mut store, "u1", "item1", 1000, 2);
            let order = store.checkout("u1", None).unwrap();
            assert_eq!(order.subtotal.cents(), 2000);
            assert_eq!(order.total.cents(), 2000);
            assert!(order.discount_amount.is_zero());
            assert_eq!(store.order_count(), i);

            if i < 5 {
                assert!(store.discount_codes().is_empty());
            }
        }

        // The 5th checkout minted the first code
        assert_eq!(store.discount_codes().len(), 1);
        assert_eq!(store.discount_codes()[0].code, "SAVE10-0001");
        assert!(!store.discount_codes()[0].used);

        // 6th checkout redeems it
        add(&mut store, "u1", "item1", 1000, 2);
        let order = store.checkout("u1", Some("SAVE10-0001")).unwrap();
        assert_eq!(order.discount_amount.cents(), 200); // 10% of $20.00
        assert_eq!(order.total.cents(), 1800);

        // 7th checkout cannot reuse it
        add(&mut store, "u1", "item1", 1000, 2);
        let err = store.checkout("u1", Some("SAVE10-0001")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDiscountCode));
    }
}
