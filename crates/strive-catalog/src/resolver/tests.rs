// crates/strive-catalog/src/resolver/tests.rs
// ============================================================================
// Module: Reference Resolver Unit Tests
// Description: Tests for `$ref` dereferencing, memoization, and fail-closed
//              handling of cycles and depth overruns.
// Purpose: Ensure resolution errors name the offending pointer and operation.
// Dependencies: serde_json, strive-catalog
// ============================================================================

//! ## Overview
//! Exercises pointer lookup, nullable and type-array parsing, vendor
//! metadata passthrough, cycle detection, and the resolution depth guard.

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

use serde_json::Value;
use serde_json::json;

use super::MAX_RESOLUTION_DEPTH;
use super::ReferenceResolver;
use crate::CatalogError;
use crate::schema::SchemaType;
use crate::schema::TypeSet;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn document() -> Value {
    json!({
        "openapi": "3.0.3",
        "components": {
            "schemas": {
                "MissionCreate": {
                    "type": "object",
                    "required": ["name", "startDate"],
                    "properties": {
                        "name": { "type": "string" },
                        "startDate": { "type": "string", "format": "date" },
                        "description": { "type": "string", "nullable": true },
                        "status": {
                            "type": "string",
                            "enum": ["draft", "active", "done"],
                            "x-enum-labels": { "draft": "Draft", "active": "Active", "done": "Done" }
                        }
                    }
                },
                "MetricList": {
                    "type": "array",
                    "items": { "$ref": "#/components/schemas/MissionCreate" }
                },
                "LoopA": { "$ref": "#/components/schemas/LoopB" },
                "LoopB": { "$ref": "#/components/schemas/LoopA" }
            }
        }
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn resolves_component_schema_by_pointer() {
    let document = document();
    let mut resolver = ReferenceResolver::new(&document);
    let node = resolver
        .resolve("#/components/schemas/MissionCreate", "POST /api/missions")
        .expect("resolve MissionCreate");
    assert!(node.is_object());
    assert_eq!(node.required, vec!["name", "startDate"]);
    let status = node.property("status").expect("status property");
    assert_eq!(status.enum_values.len(), 3);
    assert!(status.metadata.contains_key("x-enum-labels"));
}

#[test]
fn repeated_resolution_returns_identical_schema() {
    let document = document();
    let mut resolver = ReferenceResolver::new(&document);
    let first = resolver
        .resolve("#/components/schemas/MissionCreate", "POST /api/missions")
        .expect("first resolve");
    let second = resolver
        .resolve("#/components/schemas/MissionCreate", "PUT /api/missions/{id}")
        .expect("second resolve");
    assert_eq!(first, second);
}

#[test]
fn nullable_property_becomes_type_union() {
    let document = document();
    let mut resolver = ReferenceResolver::new(&document);
    let node = resolver
        .resolve("#/components/schemas/MissionCreate", "POST /api/missions")
        .expect("resolve MissionCreate");
    let description = node.property("description").expect("description property");
    assert_eq!(description.types, TypeSet::nullable(SchemaType::String));
}

#[test]
fn array_items_follow_nested_references() {
    let document = document();
    let mut resolver = ReferenceResolver::new(&document);
    let node = resolver
        .resolve("#/components/schemas/MetricList", "GET /api/mission-metrics")
        .expect("resolve MetricList");
    let items = node.items.as_deref().expect("items schema");
    assert!(items.is_object());
    assert_eq!(items.required, vec!["name", "startDate"]);
}

#[test]
fn unknown_pointer_is_a_resolution_error() {
    let document = document();
    let mut resolver = ReferenceResolver::new(&document);
    let err = resolver
        .resolve("#/components/schemas/Ghost", "POST /api/missions")
        .expect_err("unresolvable pointer");
    match err {
        CatalogError::Resolution { pointer, operation } => {
            assert_eq!(pointer, "#/components/schemas/Ghost");
            assert_eq!(operation, "POST /api/missions");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_schema_pointer_is_rejected() {
    let document = document();
    let mut resolver = ReferenceResolver::new(&document);
    let err = resolver
        .resolve("#/components/parameters/Page", "GET /api/missions")
        .expect_err("non-schema pointer");
    assert!(matches!(err, CatalogError::Resolution { .. }));
}

#[test]
fn reference_cycle_fails_closed() {
    let document = document();
    let mut resolver = ReferenceResolver::new(&document);
    let err = resolver
        .resolve("#/components/schemas/LoopA", "POST /api/missions")
        .expect_err("cycle must fail");
    assert!(matches!(err, CatalogError::CircularReference { .. }));
}

#[test]
fn nesting_beyond_depth_limit_is_rejected() {
    let mut schema = json!({ "type": "string" });
    for _ in 0 ..= MAX_RESOLUTION_DEPTH {
        schema = json!({
            "type": "object",
            "properties": { "payload": schema }
        });
    }
    let document = json!({ "components": { "schemas": { "Deep": schema } } });
    let mut resolver = ReferenceResolver::new(&document);
    let err = resolver
        .resolve("#/components/schemas/Deep", "POST /api/missions")
        .expect_err("depth guard must trip");
    assert!(matches!(err, CatalogError::DepthExceeded { .. }));
}

#[test]
fn schema_without_type_but_with_properties_is_an_object() {
    let document = json!({
        "components": {
            "schemas": {
                "Loose": { "properties": { "name": { "type": "string" } } }
            }
        }
    });
    let mut resolver = ReferenceResolver::new(&document);
    let node = resolver
        .resolve("#/components/schemas/Loose", "POST /api/missions")
        .expect("resolve Loose");
    assert!(node.is_object());
}

#[test]
fn unsupported_type_name_is_a_document_error() {
    let document = json!({
        "components": { "schemas": { "Odd": { "type": "decimal" } } }
    });
    let mut resolver = ReferenceResolver::new(&document);
    let err = resolver
        .resolve("#/components/schemas/Odd", "POST /api/missions")
        .expect_err("unsupported type");
    assert!(matches!(err, CatalogError::Document(message) if message.contains("decimal")));
}
