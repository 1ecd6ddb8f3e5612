//! # vela-store: Store State + Snapshot Persistence for Vela Shop
//!
//! This crate provides the single stateful component of the system and its
//! durable snapshot lifecycle.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vela Shop Data Flow                              │
//! │                                                                         │
//! │  Request handler (add item / checkout / statistics)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     vela-store (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │  SharedStore  │    │     Store     │    │   Snapshot   │    │    │
//! │  │   │ (Arc<Mutex>)  │───►│  (store.rs)   │───►│ (snapshot.rs)│    │    │
//! │  │   │ one op at a   │    │ carts, orders │    │ JSON codec,  │    │    │
//! │  │   │ time          │    │ codes, config │    │ temp+rename  │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     Snapshot File                               │    │
//! │  │   data/store.json (full state, rewritten on every mutation)     │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The Store, its operations, config, and the shared wrapper
//! - [`snapshot`] - Snapshot document and load/save codec
//! - [`error`] - Snapshot error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vela_core::Money;
//! use vela_store::{SharedStore, StoreConfig};
//!
//! // Construct once at startup; loads the snapshot or starts empty
//! let shared = SharedStore::open(StoreConfig::new("data/store.json"));
//!
//! // Every operation runs inside one exclusion scope
//! let order = shared.with_store_mut(|store| {
//!     store.add_item("u1", "item1", "Widget", Money::from_cents(1000), 2)?;
//!     store.checkout("u1", None)
//! });
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod snapshot;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{SnapshotError, SnapshotResult};
pub use snapshot::Snapshot;
pub use store::{SharedStore, Store, StoreConfig};
