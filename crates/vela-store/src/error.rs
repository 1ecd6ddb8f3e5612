//! # Snapshot Error Types
//!
//! Error types for snapshot persistence.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SnapshotError (this module) ← Adds categorization                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store logs it (warn!) and swallows it                                  │
//! │                                                                         │
//! │  Persistence failures NEVER fail a user-visible operation: the          │
//! │  in-memory state stays authoritative for the process lifetime.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Snapshot persistence errors.
///
/// These never reach Store callers: saves are best-effort, and a load
/// failure at startup falls back to an empty store.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed.
    ///
    /// ## When This Occurs
    /// - Disk full
    /// - Permission denied
    /// - Snapshot directory cannot be created
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot file is not valid JSON, or does not match the expected
    /// layout.
    ///
    /// ## When This Occurs
    /// - File truncated by an unclean shutdown of a pre-atomic-write version
    /// - Manual edits to the snapshot file
    #[error("Snapshot serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
