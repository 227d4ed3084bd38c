// crates/strive-contract/src/contract.rs
// ============================================================================
// Module: Required-Field Contract
// Description: Fixed required-field expectations per Strive tool.
// Purpose: Catch catalogs that drift away from the domain contract.
// Dependencies: strive-catalog
// ============================================================================

//! ## Overview
//! The required-field contract maps tool names onto ordered dot-paths that
//! must be declared `required` in the tool's input schema. Dot-paths reach
//! into nested object schemas: `payload.name` demands that `payload` itself
//! be required at the top level and that `name` be required inside the
//! `payload` object schema.
//!
//! The order is intentional: violations are reported in contract order so
//! CI output stays stable across releases. Append new tools at the end.

// ============================================================================
// SECTION: Imports
// ============================================================================

use strive_catalog::SchemaNode;
use strive_catalog::ToolDefinition;

// ============================================================================
// SECTION: Contract Table
// ============================================================================

/// One contract entry: a tool name and its required field dot-paths.
pub type RequiredFieldContract = (&'static str, &'static [&'static str]);

/// Required dot-paths for `mission_create`.
const MISSION_CREATE_REQUIRED: &[&str] =
    &["name", "startDate", "endDate", "status", "scopeType", "scopeId"];

/// Required dot-paths for `mission_update`.
const MISSION_UPDATE_REQUIRED: &[&str] = &[
    "id",
    "payload.name",
    "payload.startDate",
    "payload.endDate",
    "payload.status",
    "payload.scopeType",
    "payload.scopeId",
];

/// Required dot-paths for `mission_metric_create`.
const MISSION_METRIC_CREATE_REQUIRED: &[&str] =
    &["missionId", "name", "metricType", "targetValue"];

/// Required dot-paths for `metric_checkin_create`.
const METRIC_CHECKIN_CREATE_REQUIRED: &[&str] = &["metricId", "value", "checkinDate"];

/// Returns the canonical required-field contract for Strive tools.
#[must_use]
pub const fn required_field_contract() -> &'static [RequiredFieldContract] {
    &[
        ("mission_create", MISSION_CREATE_REQUIRED),
        ("mission_get", &["id"]),
        ("mission_update", MISSION_UPDATE_REQUIRED),
        ("mission_delete", &["id"]),
        ("mission_metric_create", MISSION_METRIC_CREATE_REQUIRED),
        ("mission_metric_update", &["id", "payload.name"]),
        ("metric_checkin_create", METRIC_CHECKIN_CREATE_REQUIRED),
    ]
}

// ============================================================================
// SECTION: Contract Validation
// ============================================================================

/// Validates a candidate tool list against the required-field contract.
///
/// Returns one descriptive error string per violation; an empty list means
/// the catalog satisfies the contract. Tools present in the catalog but
/// absent from the contract are ignored.
#[must_use]
pub fn validate_required_fields(tools: &[ToolDefinition]) -> Vec<String> {
    let mut errors = Vec::new();
    for (tool_name, paths) in required_field_contract() {
        let Some(tool) = tools.iter().find(|tool| tool.name == *tool_name) else {
            errors.push(format!("tool missing from catalog: {tool_name}"));
            continue;
        };
        for path in *paths {
            if let Some(error) = check_path(&tool.input_schema, tool_name, path) {
                errors.push(error);
            }
        }
    }
    errors
}

/// Checks one dot-path against a tool's input schema.
///
/// Every segment must be declared `required` at its level, and every segment
/// except the last must descend into a nested object schema.
fn check_path(schema: &SchemaNode, tool_name: &str, path: &str) -> Option<String> {
    let mut current = schema;
    for segment in path.split('.') {
        if !current.is_required(segment) {
            return Some(format!(
                "tool {tool_name}: field `{path}` is not declared required (segment `{segment}`)"
            ));
        }
        match current.property(segment) {
            Some(property) => current = property,
            None => {
                return Some(format!(
                    "tool {tool_name}: field `{path}` has no schema for segment `{segment}`"
                ));
            }
        }
    }
    None
}

// ============================================================================
// SECTION: Tests
// ============================================================================
