// crates/strive-gateway/src/gateway.rs
// ============================================================================
// Module: Tool Gateway
// Description: Immutable tool map plus the per-call authorization gate.
// Purpose: Validate tool calls against the loaded catalog before dispatch.
// Dependencies: serde_json, strive-catalog, strive-contract, strive-store
// ============================================================================

//! ## Overview
//! [`ToolMap`] is built once at startup from the strictly loaded catalog and
//! never mutated, so request handlers can share it without locking.
//! [`ToolGateway::authorize`] is the per-call gate: unknown tool names and
//! invalid arguments are rejected with descriptive errors, and successful
//! calls yield the typed [`ActionDescriptor`] the domain layer dispatches on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;
use strive_catalog::ToolDefinition;
use strive_contract::validate_arguments;
use strive_store::CatalogStore;

use crate::GatewayError;
use crate::descriptor::ActionDescriptor;

// ============================================================================
// SECTION: Tool Map
// ============================================================================

/// Immutable name-to-definition map over the loaded catalog.
///
/// # Invariants
/// - Built once; no insertion or removal after [`ToolMap::build`].
/// - Tool names are unique.
#[derive(Debug, Clone)]
pub struct ToolMap {
    /// Tool definitions keyed by name.
    tools: BTreeMap<String, ToolDefinition>,
}

impl ToolMap {
    /// Builds the map from loaded tool definitions.
    ///
    /// # Errors
    /// Returns [`GatewayError::DuplicateTool`] when two definitions share a
    /// name.
    pub fn build(definitions: Vec<ToolDefinition>) -> Result<Self, GatewayError> {
        let mut tools = BTreeMap::new();
        for definition in definitions {
            let name = definition.name.clone();
            if tools.insert(name.clone(), definition).is_some() {
                return Err(GatewayError::DuplicateTool(name));
            }
        }
        Ok(Self { tools })
    }

    /// Looks up a tool definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// Returns the number of tools in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Iterates tool definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }
}

// ============================================================================
// SECTION: Tool Gateway
// ============================================================================

/// Runtime gate between the agent protocol and domain dispatch.
#[derive(Debug, Clone)]
pub struct ToolGateway {
    /// Loaded tool map.
    map: ToolMap,
}

impl ToolGateway {
    /// Creates a gateway over an already built tool map.
    #[must_use]
    pub const fn new(map: ToolMap) -> Self {
        Self { map }
    }

    /// Loads the gateway from the catalog store.
    ///
    /// The strict store load already enforces the required-field contract, so
    /// a gateway never serves a contract-violating catalog.
    ///
    /// # Errors
    /// Returns [`GatewayError`] when the strict load fails or the catalog
    /// carries duplicate tool names.
    pub fn load(store: &CatalogStore) -> Result<Self, GatewayError> {
        let tools = store.load_tools()?;
        Ok(Self::new(ToolMap::build(tools)?))
    }

    /// Returns the loaded tool map.
    #[must_use]
    pub const fn tools(&self) -> &ToolMap {
        &self.map
    }

    /// Authorizes one tool call.
    ///
    /// # Errors
    /// - [`GatewayError::UnknownTool`] when the name is not in the catalog;
    /// - [`GatewayError::Arguments`] when the arguments fail validation
    ///   against the stored input schema;
    /// - [`GatewayError::UnmappedTool`] when the tool has no typed
    ///   descriptor.
    pub fn authorize(
        &self,
        name: &str,
        arguments: &Value,
    ) -> Result<ActionDescriptor, GatewayError> {
        let Some(tool) = self.map.get(name) else {
            return Err(GatewayError::UnknownTool(name.to_string()));
        };
        validate_arguments(tool, arguments)?;
        ActionDescriptor::for_tool(name)
            .ok_or_else(|| GatewayError::UnmappedTool(name.to_string()))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
