// crates/strive-gateway/src/lib.rs
// ============================================================================
// Module: Gateway Library
// Description: Runtime tool-call boundary over the persisted catalog.
// Purpose: Map validated tool calls onto typed action descriptors for
//          domain dispatch.
// Dependencies: serde_json, strive-catalog, strive-contract, strive-store,
//               thiserror
// ============================================================================

//! ## Overview
//! The gateway is the runtime seam between the agent protocol and the Strive
//! domain. At startup [`ToolGateway::load`] performs a strict store load
//! (which enforces the required-field contract) and builds an immutable
//! [`ToolMap`]; per call, [`ToolGateway::authorize`] checks that the tool
//! exists, validates the caller's arguments against the stored input schema,
//! and returns a typed [`ActionDescriptor`] instead of a raw string for the
//! domain layer to dispatch on.
//!
//! Security posture: tool names and arguments arrive from untrusted agents.
//! Dispatch never branches on caller strings; unknown tools and invalid
//! arguments are rejected before any domain code runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod descriptor;
pub mod gateway;

// ============================================================================
// SECTION: Imports
// ============================================================================

use strive_contract::ArgumentError;
use strive_store::StoreError;
use thiserror::Error;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use descriptor::Action;
pub use descriptor::ActionDescriptor;
pub use descriptor::Resource;
pub use gateway::ToolGateway;
pub use gateway::ToolMap;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading the gateway or authorizing a tool call.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The strict catalog load failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The catalog carries two tools with the same name.
    #[error("duplicate tool name in catalog: {0}")]
    DuplicateTool(String),
    /// A caller named a tool that is not in the catalog.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// A catalog tool has no typed action descriptor.
    #[error("tool has no action descriptor: {0}")]
    UnmappedTool(String),
    /// The caller's arguments failed validation.
    #[error(transparent)]
    Arguments(#[from] ArgumentError),
}
