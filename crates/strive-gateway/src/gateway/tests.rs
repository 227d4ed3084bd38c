// crates/strive-gateway/src/gateway/tests.rs
// ============================================================================
// Module: Tool Gateway Unit Tests
// Description: Tests for map construction, strict loading, and the per-call
//              authorization gate.
// Purpose: Ensure no tool call reaches dispatch without passing validation.
// Dependencies: serde_json, strive-catalog, strive-contract, strive-store,
//               tempfile
// ============================================================================

//! ## Overview
//! Exercises duplicate-name rejection, authorize success and failure paths,
//! and the contract enforcement inherited from the strict store load.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;
use strive_catalog::Catalog;
use strive_catalog::SchemaNode;
use strive_catalog::ToolDefinition;
use strive_contract::ArgumentError;
use strive_contract::required_field_contract;
use strive_store::CatalogStore;
use strive_store::StoreError;
use tempfile::TempDir;

use super::ToolGateway;
use super::ToolMap;
use crate::GatewayError;
use crate::descriptor::Action;
use crate::descriptor::Resource;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Builds a catalog that satisfies every required-field contract entry.
fn conforming_catalog() -> Catalog {
    let mut tools = Vec::new();
    for (name, paths) in required_field_contract() {
        let mut schema = SchemaNode::object();
        for path in *paths {
            let mut current = &mut schema;
            for segment in path.split('.') {
                current.mark_required(segment);
                if current.property(segment).is_none() {
                    current.push_property(segment, SchemaNode::object());
                }
                current = current
                    .properties
                    .iter_mut()
                    .find(|(key, _)| key == segment)
                    .map(|(_, schema)| schema)
                    .unwrap();
            }
        }
        tools.push(ToolDefinition {
            name: (*name).to_string(),
            description: format!("Test tool {name}."),
            input_schema: schema,
        });
    }
    Catalog::new(tools)
}

fn gateway() -> ToolGateway {
    ToolGateway::new(ToolMap::build(conforming_catalog().tools).unwrap())
}

// ============================================================================
// SECTION: Tool Map Tests
// ============================================================================

#[test]
fn build_indexes_every_tool_by_name() {
    let catalog = conforming_catalog();
    let count = catalog.tools.len();
    let map = ToolMap::build(catalog.tools).unwrap();
    assert_eq!(map.len(), count);
    assert!(map.get("mission_create").is_some());
    assert!(map.get("mission_archive").is_none());
}

#[test]
fn build_rejects_duplicate_names() {
    let mut tools = conforming_catalog().tools;
    let duplicate = tools[0].clone();
    tools.push(duplicate);
    let error = ToolMap::build(tools).unwrap_err();
    assert!(matches!(error, GatewayError::DuplicateTool(name) if name == "mission_create"));
}

// ============================================================================
// SECTION: Authorization Tests
// ============================================================================

#[test]
fn authorize_returns_the_typed_descriptor() {
    let gateway = gateway();
    let descriptor = gateway
        .authorize("mission_get", &json!({ "id": "7f1c1d8e" }))
        .unwrap();
    assert_eq!(descriptor.resource, Resource::Mission);
    assert_eq!(descriptor.action, Action::Get);
}

#[test]
fn authorize_rejects_unknown_tools() {
    let error = gateway().authorize("mission_archive", &json!({})).unwrap_err();
    assert!(matches!(error, GatewayError::UnknownTool(name) if name == "mission_archive"));
}

#[test]
fn authorize_rejects_invalid_arguments_with_the_dot_path() {
    let gateway = gateway();
    let error = gateway
        .authorize("mission_update", &json!({ "id": "7f1c1d8e", "payload": {} }))
        .unwrap_err();
    let GatewayError::Arguments(ArgumentError::MissingParameter { tool, path }) = error else {
        panic!("expected argument rejection, got {error:?}");
    };
    assert_eq!(tool, "mission_update");
    assert_eq!(path, "payload.name");
}

#[test]
fn authorize_validates_before_mapping() {
    // Invalid arguments are reported even for a tool that maps cleanly.
    let error = gateway().authorize("mission_delete", &json!({})).unwrap_err();
    assert!(matches!(error, GatewayError::Arguments(_)));
}

// ============================================================================
// SECTION: Load Tests
// ============================================================================

#[test]
fn load_builds_a_gateway_from_a_written_catalog() {
    let dir = TempDir::new().unwrap();
    let store = CatalogStore::new(dir.path().join("tool-catalog.json"));
    store.write(&conforming_catalog()).unwrap();
    let gateway = ToolGateway::load(&store).unwrap();
    assert_eq!(gateway.tools().len(), conforming_catalog().tools.len());
}

#[test]
fn load_refuses_a_missing_catalog() {
    let dir = TempDir::new().unwrap();
    let store = CatalogStore::new(dir.path().join("tool-catalog.json"));
    let error = ToolGateway::load(&store).unwrap_err();
    assert!(matches!(error, GatewayError::Store(StoreError::NotFound { .. })));
}

#[test]
fn load_refuses_a_contract_violating_catalog() {
    let dir = TempDir::new().unwrap();
    let store = CatalogStore::new(dir.path().join("tool-catalog.json"));
    let mut catalog = conforming_catalog();
    let update = catalog.tools.iter_mut().find(|tool| tool.name == "mission_update").unwrap();
    update.input_schema.required.retain(|name| name != "payload");
    store.write(&catalog).unwrap();
    let error = ToolGateway::load(&store).unwrap_err();
    assert!(matches!(error, GatewayError::Store(StoreError::Contract { .. })));
}
