// crates/strive-contract/src/arguments/tests.rs
// ============================================================================
// Module: Runtime Argument Validation Unit Tests
// Description: Tests for the required-field gate on tool-call arguments.
// Purpose: Ensure rejections name the exact dot-path and nothing valid is
//          rejected.
// Dependencies: serde_json, strive-catalog, strive-contract
// ============================================================================

//! ## Overview
//! Exercises top-level and nested required checks, null handling, non-object
//! payload rejection, short-circuit ordering, and the depth guard.

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
use strive_catalog::SchemaNode;
use strive_catalog::SchemaType;
use strive_catalog::ToolDefinition;
use strive_catalog::TypeSet;

use super::ArgumentError;
use super::MAX_VALIDATION_DEPTH;
use super::validate_arguments;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn string_node() -> SchemaNode {
    SchemaNode::new(TypeSet::Single(SchemaType::String))
}

/// Mirrors the stored `mission_update` tool: a required uuid `id` plus a
/// required `payload` object with its own required fields.
fn mission_update_tool() -> ToolDefinition {
    let mut payload = SchemaNode::object();
    payload.push_property("name", string_node());
    payload.push_property("startDate", string_node());
    payload.push_property("description", string_node());
    payload.mark_required("name");
    payload.mark_required("startDate");

    let mut schema = SchemaNode::object();
    schema.push_property("id", SchemaNode::uuid("Identifier of the mission."));
    schema.push_property("payload", payload);
    schema.mark_required("id");
    schema.mark_required("payload");

    ToolDefinition {
        name: String::from("mission_update"),
        description: String::from("Update a mission."),
        input_schema: schema,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn full_arguments_pass() {
    let tool = mission_update_tool();
    let arguments = json!({
        "id": "0b6bdc52-6a44-4a3c-9f80-2f1c9c5d7e11",
        "payload": { "name": "Q3 retention", "startDate": "2026-07-01" }
    });
    assert_eq!(validate_arguments(&tool, &arguments), Ok(()));
}

#[test]
fn optional_fields_may_be_absent_or_null() {
    let tool = mission_update_tool();
    let arguments = json!({
        "id": "0b6bdc52-6a44-4a3c-9f80-2f1c9c5d7e11",
        "payload": { "name": "Q3 retention", "startDate": "2026-07-01", "description": null }
    });
    assert_eq!(validate_arguments(&tool, &arguments), Ok(()));
}

#[test]
fn missing_top_level_field_is_rejected() {
    let tool = mission_update_tool();
    let arguments = json!({ "payload": { "name": "n", "startDate": "d" } });
    assert_eq!(
        validate_arguments(&tool, &arguments),
        Err(ArgumentError::MissingParameter {
            tool: String::from("mission_update"),
            path: String::from("id"),
        })
    );
}

#[test]
fn null_counts_as_missing() {
    let tool = mission_update_tool();
    let arguments = json!({ "id": null, "payload": { "name": "n", "startDate": "d" } });
    assert_eq!(
        validate_arguments(&tool, &arguments),
        Err(ArgumentError::MissingParameter {
            tool: String::from("mission_update"),
            path: String::from("id"),
        })
    );
}

#[test]
fn nested_missing_field_names_dot_path() {
    let tool = mission_update_tool();
    let arguments = json!({ "id": "x", "payload": { "startDate": "2026-07-01" } });
    assert_eq!(
        validate_arguments(&tool, &arguments),
        Err(ArgumentError::MissingParameter {
            tool: String::from("mission_update"),
            path: String::from("payload.name"),
        })
    );
}

#[test]
fn empty_payload_object_fails_on_first_nested_field() {
    let tool = mission_update_tool();
    let arguments = json!({ "id": "x", "payload": {} });
    assert_eq!(
        validate_arguments(&tool, &arguments),
        Err(ArgumentError::MissingParameter {
            tool: String::from("mission_update"),
            path: String::from("payload.name"),
        })
    );
}

#[test]
fn non_object_root_is_rejected_when_fields_are_required() {
    let tool = mission_update_tool();
    assert_eq!(
        validate_arguments(&tool, &json!("not an object")),
        Err(ArgumentError::ObjectExpected {
            tool: String::from("mission_update"),
            path: String::from("arguments"),
        })
    );
}

#[test]
fn non_object_nested_payload_is_rejected() {
    let tool = mission_update_tool();
    let arguments = json!({ "id": "x", "payload": 42 });
    assert_eq!(
        validate_arguments(&tool, &arguments),
        Err(ArgumentError::ObjectExpected {
            tool: String::from("mission_update"),
            path: String::from("payload"),
        })
    );
}

#[test]
fn non_object_root_passes_when_nothing_is_required() {
    let tool = ToolDefinition {
        name: String::from("mission_list"),
        description: String::from("List missions."),
        input_schema: SchemaNode::object(),
    };
    assert_eq!(validate_arguments(&tool, &json!(null)), Ok(()));
}

#[test]
fn first_violation_short_circuits() {
    let tool = mission_update_tool();
    // Both `id` and `payload` are absent; only `id` is reported because it
    // comes first in the required list.
    let result = validate_arguments(&tool, &json!({}));
    assert_eq!(
        result,
        Err(ArgumentError::MissingParameter {
            tool: String::from("mission_update"),
            path: String::from("id"),
        })
    );
}

#[test]
fn error_messages_name_tool_and_path() {
    let error = ArgumentError::MissingParameter {
        tool: String::from("mission_update"),
        path: String::from("payload.name"),
    };
    assert_eq!(
        error.to_string(),
        "tool mission_update: required parameter missing: payload.name"
    );
}

#[test]
fn depth_guard_rejects_pathological_nesting() {
    // Build a schema nested one level past the limit, with matching
    // arguments, and check that validation fails closed.
    let mut schema = SchemaNode::object();
    let mut current = &mut schema;
    for _ in 0..=MAX_VALIDATION_DEPTH {
        current.push_property("inner", SchemaNode::object());
        current = current
            .properties
            .iter_mut()
            .find(|(key, _)| key == "inner")
            .map(|(_, schema)| schema)
            .unwrap();
    }
    let mut arguments = json!({});
    let mut value = &mut arguments;
    for _ in 0..=MAX_VALIDATION_DEPTH {
        value
            .as_object_mut()
            .unwrap()
            .insert(String::from("inner"), json!({}));
        value = value.get_mut("inner").unwrap();
    }
    let tool = ToolDefinition {
        name: String::from("mission_update"),
        description: String::from("Update a mission."),
        input_schema: schema,
    };
    let result = validate_arguments(&tool, &arguments);
    assert!(
        matches!(result, Err(ArgumentError::DepthExceeded { .. })),
        "expected depth rejection, got {result:?}"
    );
}
