//! # Snapshot Codec
//!
//! Serializes the Store's full state to a single JSON file and back.
//!
//! ## File Layout
//! ```text
//! {
//!   "n": 5,
//!   "order_count": 3,
//!   "carts": { "<user_id>": { "user_id": "...", "items": [...] } },
//!   "orders": [ { "order_id": "...", ... } ],
//!   "discount_codes": [ { "code": "...", ... } ]
//! }
//! ```
//! The field names are load-bearing: snapshots written by earlier versions of
//! the system must keep loading, so nothing here gets renamed.
//!
//! ## Atomic Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Write Sequence                                       │
//! │                                                                         │
//! │  1. serialize state ──► store.json.tmp                                  │
//! │  2. fs::rename(store.json.tmp, store.json)                              │
//! │                                                                         │
//! │  A crash between 1 and 2 leaves the previous snapshot intact under      │
//! │  the canonical name. A half-written file is never visible there.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SnapshotResult;
use vela_core::{Cart, DiscountCode, Order};

// =============================================================================
// Snapshot Document
// =============================================================================

/// The on-disk representation of the Store's full state.
///
/// ## Tolerant Loading
/// Every field except the collections carries a fallback:
/// - `n` absent → the configured discount interval stays in effect
/// - `order_count` absent → derived from the order list length
///
/// This keeps snapshots from earlier versions loading without migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Discount interval (every nth order mints a code).
    #[serde(default)]
    pub n: Option<u32>,

    /// Number of completed checkouts.
    #[serde(default)]
    pub order_count: Option<u64>,

    /// Open carts, keyed by user id.
    #[serde(default)]
    pub carts: HashMap<String, Cart>,

    /// Completed orders, append-only, in placement order.
    #[serde(default)]
    pub orders: Vec<Order>,

    /// Every discount code ever minted, in generation order.
    #[serde(default)]
    pub discount_codes: Vec<DiscountCode>,
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads a snapshot from `path`.
///
/// ## Returns
/// - `Ok(None)` if the file does not exist (fresh install)
/// - `Ok(Some(snapshot))` on success
/// - `Err(_)` if the file exists but cannot be read or parsed; the caller
///   decides whether to fall back to an empty state
pub fn load(path: &Path) -> SnapshotResult<Option<Snapshot>> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes = fs::read(path)?;
    let snapshot = serde_json::from_slice(&bytes)?;
    Ok(Some(snapshot))
}

/// Saves a snapshot to `path` using write-to-temporary-then-rename.
///
/// Parent directories are created on demand. The temporary file lives next
/// to the target (`store.json.tmp`) so the rename stays on one filesystem.
pub fn save(path: &Path, snapshot: &Snapshot) -> SnapshotResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_vec_pretty(snapshot)?;

    let tmp = tmp_path(path);
    fs::write(&tmp, &json)?;
    fs::rename(&tmp, path)?;

    Ok(())
}

/// Returns the temporary-file path for a snapshot path: `<path>.tmp`.
fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

// =============================================================================
// Unit Tests
// =============================================================================
