// crates/strive-catalog/src/generator.rs
// ============================================================================
// Module: Catalog Generator
// Description: Synthesizes the tool catalog from an OpenAPI document.
// Purpose: Map REST CRUD operations onto agent-callable tool definitions.
// Dependencies: serde_json, strive-catalog::resolver, strive-catalog::schema
// ============================================================================

//! ## Overview
//! [`CatalogGenerator`] walks the `paths` section of an OpenAPI document and
//! emits one tool per recognized CRUD action on a fixed set of domain
//! resources. Tool order follows the declaration order of paths and verbs in
//! the source document so regeneration from an unchanged document is
//! byte-identical and catalog diffs stay meaningful.
//!
//! Input schemas are synthesized per action:
//! - `create` uses the dereferenced request-body schema as-is;
//! - `get`/`delete` wrap a single required uuid `id`;
//! - `list` collects query parameters into a flat optional object, with
//!   pagination defaults pinned to `page=1`/`pageSize=10`;
//! - `update` composes a required uuid `id` with the request-body schema
//!   under a required `payload` property.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::CatalogError;
use crate::resolver::ReferenceResolver;
use crate::schema::Catalog;
use crate::schema::SchemaNode;
use crate::schema::SchemaType;
use crate::schema::ToolDefinition;
use crate::schema::TypeSet;

// ============================================================================
// SECTION: Resources and Actions
// ============================================================================

/// Fixed route-segment to resource table for the Strive API.
///
/// Route segment, tool-name prefix, singular label, plural label. The order
/// here never affects catalog order; catalog order is driven by the document.
const RESOURCES: &[(&str, &str, &str, &str)] = &[
    ("missions", "mission", "mission", "missions"),
    ("mission-metrics", "mission_metric", "mission metric", "mission metrics"),
    ("metric-checkins", "metric_checkin", "metric check-in", "metric check-ins"),
];

/// Pagination query parameters that are never required and carry defaults.
const PAGE_PARAMETER: &str = "page";
/// Page-size query parameter name.
const PAGE_SIZE_PARAMETER: &str = "pageSize";

/// CRUD action recognized on a resource route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrudAction {
    /// `POST` on a collection route.
    Create,
    /// `GET` on an `{id}` route.
    Get,
    /// `GET` on a collection route.
    List,
    /// `PUT`/`PATCH` on an `{id}` route.
    Update,
    /// `DELETE` on an `{id}` route.
    Delete,
}

impl CrudAction {
    /// Returns the tool-name suffix for the action.
    const fn suffix(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::List => "list",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

// ============================================================================
// SECTION: Catalog Generator
// ============================================================================

/// Catalog generator bound to one OpenAPI document.
///
/// # Invariants
/// - Reference resolution is memoized per generator instance.
/// - For a fixed document, [`CatalogGenerator::generate`] is deterministic.
#[derive(Debug)]
pub struct CatalogGenerator<'doc> {
    /// Source OpenAPI document.
    document: &'doc Value,
    /// Memoized reference resolver over the same document.
    resolver: ReferenceResolver<'doc>,
}

impl<'doc> CatalogGenerator<'doc> {
    /// Creates a generator over the given document.
    #[must_use]
    pub fn new(document: &'doc Value) -> Self {
        Self {
            document,
            resolver: ReferenceResolver::new(document),
        }
    }

    /// Generates the tool catalog from the document.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the document is malformed, a reference
    /// fails to resolve, or two operations map to the same tool name.
    pub fn generate(mut self) -> Result<Catalog, CatalogError> {
        let Some(paths) = self.document.get("paths").and_then(Value::as_object) else {
            return Err(CatalogError::Document(String::from(
                "document has no paths object",
            )));
        };
        let mut tools: Vec<ToolDefinition> = Vec::new();
        for (route, item) in paths {
            let Some(operations) = item.as_object() else {
                continue;
            };
            for (verb, operation) in operations {
                let Some(action) = classify(route, verb) else {
                    continue;
                };
                let tool = self.build_tool(route, verb, operation, action)?;
                if tools.iter().any(|existing| existing.name == tool.name) {
                    return Err(CatalogError::DuplicateTool(tool.name));
                }
                tools.push(tool);
            }
        }
        Ok(Catalog::new(tools))
    }

    /// Builds one tool definition for a classified operation.
    fn build_tool(
        &mut self,
        route: &str,
        verb: &str,
        operation: &Value,
        action: ClassifiedAction,
    ) -> Result<ToolDefinition, CatalogError> {
        let label = format!("{} {route}", verb.to_uppercase());
        let input_schema = match action.action {
            CrudAction::Create => self.body_schema(operation, &label)?,
            CrudAction::Get | CrudAction::Delete => identifier_schema(action.resource_label),
            CrudAction::List => self.list_schema(operation, &label)?,
            CrudAction::Update => {
                let payload = self.body_schema(operation, &label)?;
                update_schema(payload, action.resource_label)
            }
        };
        let missing = input_schema.missing_required_properties();
        if let Some(path) = missing.first() {
            return Err(CatalogError::Document(format!(
                "required property `{path}` has no schema in {label}"
            )));
        }
        let name = format!("{}_{}", action.resource_prefix, action.action.suffix());
        let description = operation
            .get("summary")
            .and_then(Value::as_str)
            .map_or_else(|| describe(action), str::to_string);
        Ok(ToolDefinition {
            name,
            description,
            input_schema,
        })
    }

    /// Dereferences the JSON request-body schema of an operation.
    fn body_schema(
        &mut self,
        operation: &Value,
        label: &str,
    ) -> Result<SchemaNode, CatalogError> {
        let Some(schema) = operation
            .get("requestBody")
            .and_then(|body| body.get("content"))
            .and_then(|content| content.get("application/json"))
            .and_then(|media| media.get("schema"))
        else {
            return Err(CatalogError::Document(format!(
                "{label} has no application/json request body schema"
            )));
        };
        let resolved = self.resolver.schema_from_value(schema, label)?;
        if !resolved.is_object() {
            return Err(CatalogError::Document(format!(
                "request body schema for {label} is not an object"
            )));
        }
        Ok(resolved)
    }

    /// Synthesizes the flat query-parameter schema for a list operation.
    fn list_schema(
        &mut self,
        operation: &Value,
        label: &str,
    ) -> Result<SchemaNode, CatalogError> {
        let mut schema = SchemaNode::object();
        let Some(parameters) = operation.get("parameters").and_then(Value::as_array) else {
            schema.push_property(PAGE_PARAMETER, SchemaNode::integer_with_default(1, "Page number."));
            schema.push_property(
                PAGE_SIZE_PARAMETER,
                SchemaNode::integer_with_default(10, "Page size."),
            );
            return Ok(schema);
        };
        let mut saw_page = false;
        let mut saw_page_size = false;
        for parameter in parameters {
            let Some(parameter) = parameter.as_object() else {
                continue;
            };
            if parameter.get("in").and_then(Value::as_str) != Some("query") {
                continue;
            }
            let Some(name) = parameter.get("name").and_then(Value::as_str) else {
                return Err(CatalogError::Document(format!(
                    "unnamed query parameter in {label}"
                )));
            };
            if name == PAGE_PARAMETER || name == PAGE_SIZE_PARAMETER {
                saw_page = saw_page || name == PAGE_PARAMETER;
                saw_page_size = saw_page_size || name == PAGE_SIZE_PARAMETER;
                let default = if name == PAGE_PARAMETER { 1 } else { 10 };
                let description = if name == PAGE_PARAMETER { "Page number." } else { "Page size." };
                schema.push_property(name, SchemaNode::integer_with_default(default, description));
                continue;
            }
            let mut property = match parameter.get("schema") {
                Some(value) => self.resolver.schema_from_value(value, label)?,
                None => SchemaNode::new(TypeSet::nullable(SchemaType::String)),
            };
            if property.description.is_none() {
                property.description =
                    parameter.get("description").and_then(Value::as_str).map(str::to_string);
            }
            schema.push_property(name, property);
            if parameter.get("required").and_then(Value::as_bool) == Some(true) {
                schema.mark_required(name);
            }
        }
        if !saw_page {
            schema.push_property(PAGE_PARAMETER, SchemaNode::integer_with_default(1, "Page number."));
        }
        if !saw_page_size {
            schema.push_property(
                PAGE_SIZE_PARAMETER,
                SchemaNode::integer_with_default(10, "Page size."),
            );
        }
        Ok(schema)
    }
}

// ============================================================================
// SECTION: Route Classification
// ============================================================================

/// Classified operation: a recognized resource plus CRUD action.
#[derive(Debug, Clone, Copy)]
struct ClassifiedAction {
    /// Tool-name prefix for the resource, e.g. `mission_metric`.
    resource_prefix: &'static str,
    /// Singular human label, e.g. `mission metric`.
    resource_label: &'static str,
    /// Plural human label, e.g. `mission metrics`.
    resource_plural: &'static str,
    /// Recognized CRUD action.
    action: CrudAction,
}

/// Classifies a route + verb pair as a CRUD action on a known resource.
///
/// Routes whose trailing non-parameter segment is not in the resource table
/// are skipped, as are verbs outside the CRUD set.
fn classify(route: &str, verb: &str) -> Option<ClassifiedAction> {
    let segments: Vec<&str> = route.split('/').filter(|segment| !segment.is_empty()).collect();
    let has_id = segments
        .last()
        .is_some_and(|segment| segment.starts_with('{') && segment.ends_with('}'));
    let resource_segment =
        *segments.iter().rev().find(|segment| !segment.starts_with('{'))?;
    let (_, prefix, label, plural) =
        *RESOURCES.iter().find(|(segment, ..)| *segment == resource_segment)?;
    let action = match (verb, has_id) {
        ("post", false) => CrudAction::Create,
        ("get", false) => CrudAction::List,
        ("get", true) => CrudAction::Get,
        ("put" | "patch", true) => CrudAction::Update,
        ("delete", true) => CrudAction::Delete,
        _ => return None,
    };
    Some(ClassifiedAction {
        resource_prefix: prefix,
        resource_label: label,
        resource_plural: plural,
        action,
    })
}

/// Fallback description when an operation carries no summary.
fn describe(action: ClassifiedAction) -> String {
    match action.action {
        CrudAction::Create => format!("Create a {}.", action.resource_label),
        CrudAction::Get => format!("Fetch a {} by identifier.", action.resource_label),
        CrudAction::List => format!("List {}.", action.resource_plural),
        CrudAction::Update => format!("Update a {}.", action.resource_label),
        CrudAction::Delete => format!("Delete a {}.", action.resource_label),
    }
}

// ============================================================================
// SECTION: Schema Synthesis
// ============================================================================

/// Synthesizes the `{ id }` schema shared by get and delete tools.
fn identifier_schema(resource_label: &str) -> SchemaNode {
    let mut schema = SchemaNode::object();
    schema.push_property(
        "id",
        SchemaNode::uuid(&format!("Identifier of the {resource_label}.")),
    );
    schema.mark_required("id");
    schema
}

/// Composes the update schema from an id property and the body payload.
fn update_schema(payload: SchemaNode, resource_label: &str) -> SchemaNode {
    let mut schema = SchemaNode::object();
    schema.push_property(
        "id",
        SchemaNode::uuid(&format!("Identifier of the {resource_label}.")),
    );
    schema.push_property("payload", payload);
    schema.mark_required("id");
    schema.mark_required("payload");
    schema
}

// ============================================================================
// SECTION: Tests
// ============================================================================
