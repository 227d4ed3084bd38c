// crates/strive-catalog/src/resolver.rs
// ============================================================================
// Module: Reference Resolver
// Description: Dereferences `$ref` pointers inside an OpenAPI document.
// Purpose: Turn `#/components/schemas/<Name>` pointers into inline
//          SchemaNodes, memoized per document instance.
// Dependencies: serde_json, std, strive-catalog::schema
// ============================================================================

//! ## Overview
//! [`ReferenceResolver`] converts raw OpenAPI schema values into typed
//! [`SchemaNode`]s, following same-document `#/components/schemas/*` pointers
//! as it goes. Resolutions are memoized per resolver instance so repeated
//! lookups of the same component are free and reference cycles fail closed
//! instead of recursing forever.
//!
//! Only schema-section references are supported; external files and
//! non-schema pointers are generation-time errors that name the offending
//! pointer and the operation that referenced it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::collections::HashMap;

use serde_json::Value;

use crate::CatalogError;
use crate::schema::SchemaNode;
use crate::schema::SchemaType;
use crate::schema::TypeSet;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum schema nesting and `$ref` chain depth accepted during resolution.
pub const MAX_RESOLUTION_DEPTH: usize = 16;

/// Pointer prefix for supported same-document schema references.
const SCHEMA_POINTER_PREFIX: &str = "#/components/schemas/";

/// Schema keywords handled by the typed model; everything else passes through
/// as vendor metadata.
const MODELED_KEYWORDS: &[&str] =
    &["$ref", "type", "nullable", "description", "format", "enum", "default", "items", "required", "properties"];

// ============================================================================
// SECTION: Reference Resolver
// ============================================================================

/// Memoized `$ref` resolver bound to one OpenAPI document.
///
/// # Invariants
/// - `cache` only holds fully resolved schemas; in-progress pointers live in
///   `resolving` so cycles are detected before any partial value is shared.
#[derive(Debug)]
pub struct ReferenceResolver<'doc> {
    /// Parsed OpenAPI document the resolver reads from.
    document: &'doc Value,
    /// Completed resolutions keyed by pointer.
    cache: HashMap<String, SchemaNode>,
    /// Pointers currently being resolved, for cycle detection.
    resolving: BTreeSet<String>,
}

impl<'doc> ReferenceResolver<'doc> {
    /// Creates a resolver over the given document.
    #[must_use]
    pub fn new(document: &'doc Value) -> Self {
        Self {
            document,
            cache: HashMap::new(),
            resolving: BTreeSet::new(),
        }
    }

    /// Resolves a `#/components/schemas/<Name>` pointer into a schema node.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the pointer is unsupported, missing from
    /// the document, circular, or nested beyond [`MAX_RESOLUTION_DEPTH`].
    pub fn resolve(
        &mut self,
        pointer: &str,
        operation: &str,
    ) -> Result<SchemaNode, CatalogError> {
        self.resolve_at_depth(pointer, operation, 0)
    }

    /// Converts a raw schema value into a schema node, following `$ref`s.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the value is malformed or a nested
    /// reference fails to resolve.
    pub fn schema_from_value(
        &mut self,
        value: &Value,
        operation: &str,
    ) -> Result<SchemaNode, CatalogError> {
        self.convert(value, operation, 0)
    }

    /// Depth-tracked pointer resolution with memoization.
    fn resolve_at_depth(
        &mut self,
        pointer: &str,
        operation: &str,
        depth: usize,
    ) -> Result<SchemaNode, CatalogError> {
        if depth >= MAX_RESOLUTION_DEPTH {
            return Err(CatalogError::DepthExceeded {
                operation: operation.to_string(),
            });
        }
        if let Some(resolved) = self.cache.get(pointer) {
            return Ok(resolved.clone());
        }
        if self.resolving.contains(pointer) {
            return Err(CatalogError::CircularReference {
                pointer: pointer.to_string(),
                operation: operation.to_string(),
            });
        }
        let target = self.lookup(pointer, operation)?;
        self.resolving.insert(pointer.to_string());
        let resolved = self.convert(target, operation, depth);
        self.resolving.remove(pointer);
        let resolved = resolved?;
        self.cache.insert(pointer.to_string(), resolved.clone());
        Ok(resolved)
    }

    /// Looks up the raw schema value behind a supported pointer.
    fn lookup(&self, pointer: &str, operation: &str) -> Result<&'doc Value, CatalogError> {
        let Some(name) = pointer.strip_prefix(SCHEMA_POINTER_PREFIX) else {
            return Err(CatalogError::Resolution {
                pointer: pointer.to_string(),
                operation: operation.to_string(),
            });
        };
        if name.is_empty() || name.contains('/') {
            return Err(CatalogError::Resolution {
                pointer: pointer.to_string(),
                operation: operation.to_string(),
            });
        }
        self.document
            .get("components")
            .and_then(|components| components.get("schemas"))
            .and_then(|schemas| schemas.get(name))
            .ok_or_else(|| CatalogError::Resolution {
                pointer: pointer.to_string(),
                operation: operation.to_string(),
            })
    }

    /// Converts a raw schema value at the given nesting depth.
    fn convert(
        &mut self,
        value: &Value,
        operation: &str,
        depth: usize,
    ) -> Result<SchemaNode, CatalogError> {
        if depth >= MAX_RESOLUTION_DEPTH {
            return Err(CatalogError::DepthExceeded {
                operation: operation.to_string(),
            });
        }
        let Some(object) = value.as_object() else {
            return Err(CatalogError::Document(format!(
                "schema for {operation} is not a JSON object"
            )));
        };
        if let Some(pointer) = object.get("$ref").and_then(Value::as_str) {
            return self.resolve_at_depth(pointer, operation, depth + 1);
        }

        let mut node = SchemaNode::new(declared_types(object, operation)?);
        node.description =
            object.get("description").and_then(Value::as_str).map(str::to_string);
        node.format = object.get("format").and_then(Value::as_str).map(str::to_string);
        if let Some(literals) = object.get("enum").and_then(Value::as_array) {
            node.enum_values = literals.clone();
        }
        node.default_value = object.get("default").cloned();
        if let Some(items) = object.get("items") {
            node.items = Some(Box::new(self.convert(items, operation, depth + 1)?));
        }
        if let Some(required) = object.get("required").and_then(Value::as_array) {
            for entry in required {
                if let Some(name) = entry.as_str() {
                    node.mark_required(name);
                }
            }
        }
        if let Some(properties) = object.get("properties").and_then(Value::as_object) {
            for (name, property) in properties {
                let schema = self.convert(property, operation, depth + 1)?;
                node.push_property(name, schema);
            }
        }
        for (key, passthrough) in object {
            if !MODELED_KEYWORDS.contains(&key.as_str()) {
                node.metadata.insert(key.clone(), passthrough.clone());
            }
        }
        Ok(node)
    }
}

// ============================================================================
// SECTION: Type Declaration Parsing
// ============================================================================

/// Reads the declared type set of a raw schema object.
///
/// OpenAPI 3.0 expresses nullability via `nullable: true`; 3.1 uses type
/// arrays. Both forms collapse into a [`TypeSet`]. Schemas without a `type`
/// fall back to `object` when they declare properties and `array` when they
/// declare items.
fn declared_types(
    object: &serde_json::Map<String, Value>,
    operation: &str,
) -> Result<TypeSet, CatalogError> {
    let nullable = object.get("nullable").and_then(Value::as_bool).unwrap_or(false);
    match object.get("type") {
        Some(Value::String(name)) => {
            let kind = parse_type(name, operation)?;
            if nullable && kind != SchemaType::Null {
                Ok(TypeSet::nullable(kind))
            } else {
                Ok(TypeSet::Single(kind))
            }
        }
        Some(Value::Array(names)) => {
            let mut kinds = Vec::with_capacity(names.len());
            for name in names {
                let Some(name) = name.as_str() else {
                    return Err(CatalogError::Document(format!(
                        "non-string type entry in schema for {operation}"
                    )));
                };
                let kind = parse_type(name, operation)?;
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
            if nullable && !kinds.contains(&SchemaType::Null) {
                kinds.push(SchemaType::Null);
            }
            match kinds.as_slice() {
                [] => Err(CatalogError::Document(format!(
                    "empty type array in schema for {operation}"
                ))),
                [single] => Ok(TypeSet::Single(*single)),
                _ => Ok(TypeSet::Union(kinds)),
            }
        }
        None if object.contains_key("properties") => Ok(TypeSet::Single(SchemaType::Object)),
        None if object.contains_key("items") => Ok(TypeSet::Single(SchemaType::Array)),
        _ => Err(CatalogError::Document(format!(
            "schema for {operation} declares no type"
        ))),
    }
}

/// Parses a single type name, rejecting names outside the modeled subset.
fn parse_type(name: &str, operation: &str) -> Result<SchemaType, CatalogError> {
    SchemaType::parse(name).ok_or_else(|| {
        CatalogError::Document(format!("unsupported schema type `{name}` for {operation}"))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
