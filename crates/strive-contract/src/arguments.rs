// crates/strive-contract/src/arguments.rs
// ============================================================================
// Module: Runtime Argument Validation
// Description: Required-field gate for incoming tool-call arguments.
// Purpose: Reject malformed tool calls before they reach a domain action.
// Dependencies: serde_json, strive-catalog, thiserror
// ============================================================================

//! ## Overview
//! [`validate_arguments`] walks a tool's stored input schema against the
//! caller-supplied JSON arguments: wherever the schema lists `required`
//! names, the payload must be an object carrying each name with a non-null
//! value, and object-typed properties that are present recurse with an
//! extended dot-path prefix. The first violation short-circuits and is
//! surfaced as a rejected tool call naming the exact path.
//!
//! Enum membership and format constraints are advisory metadata for help
//! surfaces; they are deliberately not enforced here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use strive_catalog::SchemaNode;
use strive_catalog::ToolDefinition;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum nesting depth accepted while validating arguments.
pub const MAX_VALIDATION_DEPTH: usize = 16;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Argument validation failure for one tool call.
///
/// # Invariants
/// - Messages are stable and name the tool plus the offending dot-path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// A required parameter is absent or null.
    #[error("tool {tool}: required parameter missing: {path}")]
    MissingParameter {
        /// Tool whose call was rejected.
        tool: String,
        /// Full dot-path of the missing parameter.
        path: String,
    },
    /// A schema level with required fields received a non-object value.
    #[error("tool {tool}: object expected at {path}")]
    ObjectExpected {
        /// Tool whose call was rejected.
        tool: String,
        /// Dot-path of the non-object value (`arguments` for the root).
        path: String,
    },
    /// Argument nesting exceeded [`MAX_VALIDATION_DEPTH`].
    #[error("tool {tool}: argument nesting exceeds depth limit at {path}")]
    DepthExceeded {
        /// Tool whose call was rejected.
        tool: String,
        /// Dot-path where the limit was exceeded.
        path: String,
    },
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates caller-supplied arguments against a tool's input schema.
///
/// # Errors
/// Returns the first [`ArgumentError`] found; subsequent violations are not
/// collected because a rejected call never reaches dispatch anyway.
pub fn validate_arguments(
    tool: &ToolDefinition,
    arguments: &Value,
) -> Result<(), ArgumentError> {
    walk(&tool.input_schema, arguments, &tool.name, "", 0)
}

/// Recursive worker over `(schema, value, path prefix)`.
fn walk(
    schema: &SchemaNode,
    value: &Value,
    tool: &str,
    prefix: &str,
    depth: usize,
) -> Result<(), ArgumentError> {
    if depth >= MAX_VALIDATION_DEPTH {
        return Err(ArgumentError::DepthExceeded {
            tool: tool.to_string(),
            path: display_path(prefix),
        });
    }
    let object = match value.as_object() {
        Some(object) => object,
        None if schema.required.is_empty() => return Ok(()),
        None => {
            return Err(ArgumentError::ObjectExpected {
                tool: tool.to_string(),
                path: display_path(prefix),
            });
        }
    };
    for name in &schema.required {
        let present = object.get(name).is_some_and(|entry| !entry.is_null());
        if !present {
            return Err(ArgumentError::MissingParameter {
                tool: tool.to_string(),
                path: extend_path(prefix, name),
            });
        }
    }
    for (name, property) in &schema.properties {
        if !property.is_object() {
            continue;
        }
        if let Some(entry) = object.get(name)
            && !entry.is_null()
        {
            walk(property, entry, tool, &extend_path(prefix, name), depth + 1)?;
        }
    }
    Ok(())
}

/// Extends a dot-path prefix with one segment.
fn extend_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Renders a prefix for error messages, naming the root explicitly.
fn display_path(prefix: &str) -> String {
    if prefix.is_empty() {
        String::from("arguments")
    } else {
        prefix.to_string()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
