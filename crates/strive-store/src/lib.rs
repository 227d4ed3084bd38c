// crates/strive-store/src/lib.rs
// ============================================================================
// Module: Store Library
// Description: Persistence and diffing for the Strive tool catalog artifact.
// Purpose: Own the canonical on-disk catalog form and its read/load duality.
// Dependencies: serde_json, strive-catalog, strive-contract, thiserror
// ============================================================================

//! ## Overview
//! [`CatalogStore`] owns one catalog file and the two read disciplines built
//! on it:
//! - tolerant reads ([`CatalogStore::read_raw`], [`parse_tools`]) never error
//!   and degrade to "no catalog", for drift checks and advisory surfaces;
//! - the strict load ([`CatalogStore::load_tools`]) fails loudly on a missing
//!   or malformed file and refuses any catalog that violates the
//!   required-field contract, so a serving process can never start against a
//!   bad artifact.
//!
//! [`diff_catalogs`] compares two serialized catalogs and reports the first
//! divergence for CI output.
//!
//! Security posture: the catalog file is produced by this workspace but read
//! back as untrusted input; the strict load enforces a size cap and full
//! contract validation before handing tools to the gateway.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod diff;
pub mod store;

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use diff::DiffResult;
pub use diff::diff_catalogs;
pub use store::CatalogStore;
pub use store::DEFAULT_CATALOG_PATH;
pub use store::MAX_CATALOG_BYTES;
pub use store::parse_tools;
pub use store::serialize_catalog;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by catalog persistence.
///
/// # Invariants
/// - [`StoreError::NotFound`] messages start with `catalog not found` so
///   operators and tests can key on the prefix.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The catalog file does not exist at the configured path.
    #[error("catalog not found: {path}")]
    NotFound {
        /// Configured catalog path.
        path: String,
    },
    /// Reading or writing the catalog file failed.
    #[error("catalog io failure at {path}: {message}")]
    Io {
        /// Path being read or written.
        path: String,
        /// Underlying io error text.
        message: String,
    },
    /// The catalog file exceeds [`MAX_CATALOG_BYTES`].
    #[error("catalog at {path} exceeds the size limit ({size} bytes)")]
    TooLarge {
        /// Configured catalog path.
        path: String,
        /// Observed file size in bytes.
        size: u64,
    },
    /// The catalog file is not valid catalog JSON.
    #[error("catalog at {path} is malformed: {message}")]
    Malformed {
        /// Configured catalog path.
        path: String,
        /// Parser error text.
        message: String,
    },
    /// Serializing a catalog to its canonical form failed.
    #[error("catalog serialization failed: {0}")]
    Serialize(String),
    /// The persisted catalog violates the required-field contract.
    #[error("catalog violates the required-field contract:\n{}", violations.join("\n"))]
    Contract {
        /// One descriptive message per contract violation.
        violations: Vec<String>,
    },
}
