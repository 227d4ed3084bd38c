// crates/strive-gateway/src/descriptor.rs
// ============================================================================
// Module: Action Descriptors
// Description: Closed resource/action enums behind catalog tool names.
// Purpose: Give the domain layer typed dispatch targets instead of strings.
// Dependencies: (standard library only)
// ============================================================================

//! ## Overview
//! Every catalog tool name decomposes into a [`Resource`] and an [`Action`].
//! The mapping is closed on both sides: [`ActionDescriptor::for_tool`] only
//! recognizes names the generator can produce, and
//! [`ActionDescriptor::tool_name`] reproduces the exact catalog name, so the
//! two functions round-trip. Unrecognized names stay unmapped and are
//! rejected at the gateway.

// ============================================================================
// SECTION: Resources
// ============================================================================

/// Domain resource addressed by a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// A mission (top-level objective).
    Mission,
    /// A metric attached to a mission.
    MissionMetric,
    /// A progress check-in against a metric.
    MetricCheckin,
}

impl Resource {
    /// All resources, in tool-name prefix order.
    pub const ALL: [Self; 3] = [Self::Mission, Self::MissionMetric, Self::MetricCheckin];

    /// Returns the snake_case tool-name prefix for the resource.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Mission => "mission",
            Self::MissionMetric => "mission_metric",
            Self::MetricCheckin => "metric_checkin",
        }
    }
}

// ============================================================================
// SECTION: Actions
// ============================================================================

/// CRUD action addressed by a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Create a new entity.
    Create,
    /// Fetch one entity by identifier.
    Get,
    /// List entities with optional filters and pagination.
    List,
    /// Update one entity by identifier.
    Update,
    /// Delete one entity by identifier.
    Delete,
}

impl Action {
    /// All actions, in tool-name suffix order.
    pub const ALL: [Self; 5] =
        [Self::Create, Self::Get, Self::List, Self::Update, Self::Delete];

    /// Returns the snake_case tool-name suffix for the action.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
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
// SECTION: Action Descriptor
// ============================================================================

/// Typed dispatch target for one catalog tool.
///
/// # Invariants
/// - `for_tool(descriptor.tool_name())` round-trips for every descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionDescriptor {
    /// Resource the tool addresses.
    pub resource: Resource,
    /// Action the tool performs.
    pub action: Action,
}

impl ActionDescriptor {
    /// Maps a catalog tool name onto its descriptor.
    ///
    /// Returns `None` for names outside the closed resource/action product.
    #[must_use]
    pub fn for_tool(name: &str) -> Option<Self> {
        for resource in Resource::ALL {
            let Some(rest) = name.strip_prefix(resource.prefix()) else {
                continue;
            };
            let Some(suffix) = rest.strip_prefix('_') else {
                continue;
            };
            if let Some(action) = Action::ALL.into_iter().find(|action| action.suffix() == suffix)
            {
                return Some(Self { resource, action });
            }
        }
        None
    }

    /// Returns the catalog tool name for this descriptor.
    #[must_use]
    pub fn tool_name(self) -> String {
        format!("{}_{}", self.resource.prefix(), self.action.suffix())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
