// crates/strive-catalog/src/schema.rs
// ============================================================================
// Module: Schema Model
// Description: Typed JSON Schema subset and catalog shapes for Strive tools.
// Purpose: Provide the common currency between generation, storage, and
//          validation.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`SchemaNode`] is an explicit, exhaustively matchable model of the JSON
//! Schema subset the catalog needs: a type set, insertion-ordered properties,
//! an ordered `required` list, array items, enum literals, a format label, and
//! opaque vendor metadata. [`ToolDefinition`] and [`Catalog`] wrap schemas into
//! the persisted catalog artifact.
//!
//! The property map is an ordered sequence rather than a sorted map on
//! purpose: catalog diffs are only meaningful when property order follows the
//! source document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Current catalog format version.
pub const CATALOG_VERSION: u64 = 1;

// ============================================================================
// SECTION: Schema Types
// ============================================================================

/// Closed set of JSON Schema primitive type names.
///
/// # Invariants
/// - Serialized as lowercase JSON Schema type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON string.
    String,
    /// JSON integer.
    Integer,
    /// JSON number.
    Number,
    /// JSON boolean.
    Boolean,
    /// JSON null.
    Null,
}

impl SchemaType {
    /// Returns the JSON Schema type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    /// Parses a JSON Schema type name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}

/// Type declaration for a schema node: a single type or a nullable union.
///
/// # Invariants
/// - Serialized as a bare string for single types and as an array for unions,
///   matching JSON Schema conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    /// Exactly one type.
    Single(SchemaType),
    /// An ordered union of types, e.g. `["string", "null"]`.
    Union(Vec<SchemaType>),
}

impl TypeSet {
    /// Builds a nullable union of the given type and `null`.
    #[must_use]
    pub fn nullable(primary: SchemaType) -> Self {
        Self::Union(vec![primary, SchemaType::Null])
    }

    /// Returns the first non-null type in the set, if any.
    #[must_use]
    pub fn primary(&self) -> Option<SchemaType> {
        match self {
            Self::Single(kind) => Some(*kind),
            Self::Union(kinds) => kinds.iter().copied().find(|kind| *kind != SchemaType::Null),
        }
    }

    /// Returns whether the set contains the given type.
    #[must_use]
    pub fn allows(&self, kind: SchemaType) -> bool {
        match self {
            Self::Single(single) => *single == kind,
            Self::Union(kinds) => kinds.contains(&kind),
        }
    }
}

// ============================================================================
// SECTION: Schema Node
// ============================================================================

/// One node of the modeled JSON Schema subset.
///
/// # Invariants
/// - `properties` preserve insertion order (declaration order in the source
///   document).
/// - `required` is ordered and free of duplicates when built through
///   [`SchemaNode::mark_required`].
/// - Once fully resolved, every `required` name exists as a property key; the
///   generator enforces this via [`SchemaNode::missing_required_properties`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Declared type or nullable type union.
    #[serde(rename = "type")]
    pub types: TypeSet,
    /// Human-readable description, when the source document provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Format label, e.g. `uuid` or `date-time`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Ordered enum literals.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    /// Default value, used for pagination parameters.
    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Item schema for array-typed nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    /// Ordered property names that callers must supply.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Insertion-ordered property map for object-typed nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "property_map")]
    pub properties: Vec<(String, SchemaNode)>,
    /// Passthrough vendor metadata (`x-…` annotations and unmodeled keywords).
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl SchemaNode {
    /// Creates an empty node with the given type set.
    #[must_use]
    pub fn new(types: TypeSet) -> Self {
        Self {
            types,
            description: None,
            format: None,
            enum_values: Vec::new(),
            default_value: None,
            items: None,
            required: Vec::new(),
            properties: Vec::new(),
            metadata: Map::new(),
        }
    }

    /// Creates an empty object-typed node.
    #[must_use]
    pub fn object() -> Self {
        Self::new(TypeSet::Single(SchemaType::Object))
    }

    /// Creates a string node carrying the `uuid` format.
    #[must_use]
    pub fn uuid(description: &str) -> Self {
        let mut node = Self::new(TypeSet::Single(SchemaType::String));
        node.format = Some(String::from("uuid"));
        node.description = Some(description.to_string());
        node
    }

    /// Creates a nullable integer node with a default value.
    #[must_use]
    pub fn integer_with_default(default: i64, description: &str) -> Self {
        let mut node = Self::new(TypeSet::nullable(SchemaType::Integer));
        node.default_value = Some(Value::from(default));
        node.description = Some(description.to_string());
        node
    }

    /// Returns whether this node declares the object type.
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.types.allows(SchemaType::Object)
    }

    /// Appends a property, replacing any earlier entry with the same name.
    pub fn push_property(&mut self, name: &str, schema: Self) {
        if let Some(slot) = self.properties.iter_mut().find(|(key, _)| key == name) {
            slot.1 = schema;
            return;
        }
        self.properties.push((name.to_string(), schema));
    }

    /// Looks up a property schema by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Self> {
        self.properties.iter().find(|(key, _)| key == name).map(|(_, schema)| schema)
    }

    /// Marks a property name as required, skipping duplicates.
    pub fn mark_required(&mut self, name: &str) {
        if !self.required.iter().any(|entry| entry == name) {
            self.required.push(name.to_string());
        }
    }

    /// Returns whether the given property name is declared required here.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|entry| entry == name)
    }

    /// Collects dot-paths of `required` names without a matching property.
    ///
    /// An empty result means the resolved-schema invariant holds for this
    /// node and every nested object or array item schema.
    #[must_use]
    pub fn missing_required_properties(&self) -> Vec<String> {
        let mut missing = Vec::new();
        self.collect_missing_required("", &mut missing);
        missing
    }

    /// Recursive worker for [`SchemaNode::missing_required_properties`].
    fn collect_missing_required(&self, prefix: &str, missing: &mut Vec<String>) {
        for name in &self.required {
            if self.property(name).is_none() {
                missing.push(join_path(prefix, name));
            }
        }
        for (name, schema) in &self.properties {
            schema.collect_missing_required(&join_path(prefix, name), missing);
        }
        if let Some(items) = &self.items {
            items.collect_missing_required(&join_path(prefix, "[]"), missing);
        }
    }
}

/// Joins a dot-path prefix with a trailing segment.
fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

// ============================================================================
// SECTION: Ordered Property Serde
// ============================================================================

/// Serde adapter mapping `Vec<(String, SchemaNode)>` to a JSON object while
/// preserving insertion order in both directions.
mod property_map {
    use serde::Deserializer;
    use serde::Serializer;
    use serde::de::MapAccess;
    use serde::de::Visitor;
    use serde::ser::SerializeMap;

    use super::SchemaNode;

    /// Serializes the ordered pairs as a JSON object.
    pub fn serialize<S>(
        properties: &[(String, SchemaNode)],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(properties.len()))?;
        for (name, schema) in properties {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }

    /// Deserializes a JSON object into ordered pairs.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, SchemaNode)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Visitor collecting object entries in declaration order.
        struct PropertyMapVisitor;

        impl<'de> Visitor<'de> for PropertyMapVisitor {
            type Value = Vec<(String, SchemaNode)>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("a map of property name to schema")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, SchemaNode>()? {
                    entries.push(entry);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(PropertyMapVisitor)
    }
}

// ============================================================================
// SECTION: Catalog Shapes
// ============================================================================

/// Tool definition exposed to the agent protocol.
///
/// # Invariants
/// - `name` is a stable snake_case identifier, unique within a [`Catalog`].
/// - `input_schema` is object-typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Stable tool identifier, e.g. `mission_create`.
    pub name: String,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for the tool's arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: SchemaNode,
}

/// Versioned, ordered collection of tool definitions.
///
/// # Invariants
/// - `tools` preserve generation order and carry unique names.
/// - Values are immutable after load; regeneration always produces a new
///   catalog rather than mutating an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog format version.
    pub version: u64,
    /// Ordered tool definitions.
    pub tools: Vec<ToolDefinition>,
}

impl Catalog {
    /// Creates a catalog at the current format version.
    #[must_use]
    pub const fn new(tools: Vec<ToolDefinition>) -> Self {
        Self {
            version: CATALOG_VERSION,
            tools,
        }
    }

    /// Looks up a tool definition by name.
    #[must_use]
    pub fn tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name == name)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
