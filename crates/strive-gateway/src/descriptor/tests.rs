// crates/strive-gateway/src/descriptor/tests.rs
// ============================================================================
// Module: Action Descriptor Unit Tests
// Description: Tests for the closed tool-name to descriptor mapping.
// Purpose: Ensure the mapping round-trips and rejects foreign names.
// Dependencies: (standard library only)
// ============================================================================

//! ## Overview
//! Exercises the full resource/action product, prefix ambiguity between
//! `mission` and `mission_metric`, and rejection of unrecognized names.

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

use super::Action;
use super::ActionDescriptor;
use super::Resource;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn every_descriptor_round_trips_through_its_tool_name() {
    for resource in Resource::ALL {
        for action in Action::ALL {
            let descriptor = ActionDescriptor { resource, action };
            assert_eq!(
                ActionDescriptor::for_tool(&descriptor.tool_name()),
                Some(descriptor),
                "round-trip failed for {}",
                descriptor.tool_name()
            );
        }
    }
}

#[test]
fn mission_metric_names_are_not_swallowed_by_the_mission_prefix() {
    assert_eq!(
        ActionDescriptor::for_tool("mission_metric_create"),
        Some(ActionDescriptor {
            resource: Resource::MissionMetric,
            action: Action::Create,
        })
    );
    assert_eq!(
        ActionDescriptor::for_tool("mission_create"),
        Some(ActionDescriptor {
            resource: Resource::Mission,
            action: Action::Create,
        })
    );
}

#[test]
fn unrecognized_names_stay_unmapped() {
    assert_eq!(ActionDescriptor::for_tool("mission_archive"), None);
    assert_eq!(ActionDescriptor::for_tool("workspace_create"), None);
    assert_eq!(ActionDescriptor::for_tool("mission"), None);
    assert_eq!(ActionDescriptor::for_tool("missioncreate"), None);
    assert_eq!(ActionDescriptor::for_tool(""), None);
}

#[test]
fn tool_names_use_snake_case_prefix_and_suffix() {
    let descriptor = ActionDescriptor {
        resource: Resource::MetricCheckin,
        action: Action::Update,
    };
    assert_eq!(descriptor.tool_name(), "metric_checkin_update");
}
