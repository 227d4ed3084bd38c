// crates/strive-catalog/src/lib.rs
// ============================================================================
// Module: Catalog Library
// Description: Tool catalog model and generator for the Strive API surface.
// Purpose: Turn an OpenAPI document into a deterministic catalog of tools.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate owns the tool catalog data model ([`SchemaNode`], [`ToolDefinition`],
//! [`Catalog`]) and the machinery that produces catalogs from a live OpenAPI
//! document: [`ReferenceResolver`] dereferences `#/components/schemas/*`
//! pointers and [`CatalogGenerator`] walks paths/operations to synthesize one
//! tool per recognized CRUD action.
//!
//! ### Design Notes
//! - Output is deterministic: tools follow the declaration order of paths and
//!   verbs in the source document, and schema properties keep insertion order.
//! - Only the JSON Schema subset needed for object/array/string/integer/enum/
//!   required shapes is modeled; everything else passes through as opaque
//!   vendor metadata.
//!
//! Security posture: OpenAPI documents are fetched from a trusted deployment
//! but are still treated as untrusted input; resolution fails closed on
//! unresolvable pointers, reference cycles, and excessive nesting depth.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod generator;
pub mod resolver;
pub mod schema;

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use generator::CatalogGenerator;
pub use resolver::MAX_RESOLUTION_DEPTH;
pub use resolver::ReferenceResolver;
pub use schema::CATALOG_VERSION;
pub use schema::Catalog;
pub use schema::SchemaNode;
pub use schema::SchemaType;
pub use schema::ToolDefinition;
pub use schema::TypeSet;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while resolving references or generating a catalog.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
/// - Resolution variants name the offending pointer and the operation that
///   referenced it.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A `$ref` pointer could not be resolved inside the document.
    #[error("unresolvable reference {pointer} referenced by {operation}")]
    Resolution {
        /// Offending `$ref` pointer.
        pointer: String,
        /// Operation that referenced the pointer, e.g. `POST /api/missions`.
        operation: String,
    },
    /// A `$ref` chain looped back onto a pointer still being resolved.
    #[error("circular reference {pointer} referenced by {operation}")]
    CircularReference {
        /// Pointer participating in the cycle.
        pointer: String,
        /// Operation that triggered the resolution.
        operation: String,
    },
    /// Schema nesting exceeded [`MAX_RESOLUTION_DEPTH`].
    #[error("schema depth limit exceeded while resolving {operation}")]
    DepthExceeded {
        /// Operation whose schema exceeded the depth limit.
        operation: String,
    },
    /// The OpenAPI document has an unexpected shape.
    #[error("malformed document: {0}")]
    Document(String),
    /// Two operations produced the same tool name.
    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),
}
