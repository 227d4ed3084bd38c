// crates/strive-store/src/store.rs
// ============================================================================
// Module: Catalog Store
// Description: Canonical catalog file writes plus tolerant/strict reads.
// Purpose: Keep one on-disk form that generation, diffing, and serving share.
// Dependencies: serde_json, strive-catalog, strive-contract
// ============================================================================

//! ## Overview
//! The canonical catalog form is pretty-printed JSON with a trailing newline,
//! produced by [`serialize_catalog`] and written atomically enough for this
//! subsystem by a whole-file overwrite. Tolerant readers degrade to "no
//! catalog"; the strict loader refuses missing, oversized, malformed, or
//! contract-violating files.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use strive_catalog::Catalog;
use strive_catalog::ToolDefinition;
use strive_contract::validate_required_fields;

use crate::StoreError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default catalog path relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "artifacts/tool-catalog.json";

/// Maximum catalog file size accepted by the strict load.
pub const MAX_CATALOG_BYTES: u64 = 8 * 1024 * 1024;

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Serializes a catalog to its canonical form: pretty JSON, trailing LF.
///
/// Both [`CatalogStore::write`] and the drift check use this function, so a
/// freshly written catalog always diffs clean against its own regeneration.
///
/// # Errors
/// Returns [`StoreError::Serialize`] when JSON encoding fails.
pub fn serialize_catalog(catalog: &Catalog) -> Result<String, StoreError> {
    let mut serialized = serde_json::to_string_pretty(catalog)
        .map_err(|error| StoreError::Serialize(error.to_string()))?;
    serialized.push('\n');
    Ok(serialized)
}

/// Tolerantly extracts tool definitions from serialized catalog JSON.
///
/// Malformed input yields an empty list rather than an error; callers that
/// need hard failures use [`CatalogStore::load_tools`].
#[must_use]
pub fn parse_tools(json: &str) -> Vec<ToolDefinition> {
    serde_json::from_str::<Catalog>(json).map_or_else(|_| Vec::new(), |catalog| catalog.tools)
}

// ============================================================================
// SECTION: Catalog Store
// ============================================================================

/// Catalog persistence bound to one file path.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    /// Path of the catalog artifact.
    path: PathBuf,
}

impl CatalogStore {
    /// Creates a store for the given catalog path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the configured catalog path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the catalog in canonical form, creating parent directories.
    ///
    /// The write is a whole-file overwrite; partial updates are never
    /// performed.
    ///
    /// # Errors
    /// Returns [`StoreError`] when serialization or any filesystem step
    /// fails.
    pub fn write(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let serialized = serialize_catalog(catalog)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|error| StoreError::Io {
                path: self.path.display().to_string(),
                message: error.to_string(),
            })?;
        }
        fs::write(&self.path, serialized).map_err(|error| StoreError::Io {
            path: self.path.display().to_string(),
            message: error.to_string(),
        })
    }

    /// Tolerantly reads the raw catalog file.
    ///
    /// Any read failure, including a missing file, yields `None`.
    #[must_use]
    pub fn read_raw(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    /// Strictly loads tool definitions from the catalog file.
    ///
    /// The load refuses to hand out tools from a catalog that violates the
    /// required-field contract, so downstream consumers can assume contract
    /// conformance.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] when the file does not exist;
    /// - [`StoreError::TooLarge`] when it exceeds [`MAX_CATALOG_BYTES`];
    /// - [`StoreError::Io`] / [`StoreError::Malformed`] on read/parse
    ///   failures;
    /// - [`StoreError::Contract`] with every violation when the contract
    ///   check fails.
    pub fn load_tools(&self) -> Result<Vec<ToolDefinition>, StoreError> {
        let path = self.path.display().to_string();
        let Ok(metadata) = fs::metadata(&self.path) else {
            return Err(StoreError::NotFound { path });
        };
        if metadata.len() > MAX_CATALOG_BYTES {
            return Err(StoreError::TooLarge {
                path,
                size: metadata.len(),
            });
        }
        let raw = fs::read_to_string(&self.path).map_err(|error| StoreError::Io {
            path: path.clone(),
            message: error.to_string(),
        })?;
        let catalog: Catalog =
            serde_json::from_str(&raw).map_err(|error| StoreError::Malformed {
                path: path.clone(),
                message: error.to_string(),
            })?;
        let violations = validate_required_fields(&catalog.tools);
        if !violations.is_empty() {
            return Err(StoreError::Contract { violations });
        }
        Ok(catalog.tools)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
