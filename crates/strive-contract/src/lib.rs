// crates/strive-contract/src/lib.rs
// ============================================================================
// Module: Contract Library
// Description: Required-field contract and validators for Strive tools.
// Purpose: Check catalogs against the domain contract and gate runtime
//          tool-call arguments before dispatch.
// Dependencies: serde_json, strive-catalog, thiserror
// ============================================================================

//! ## Overview
//! This crate carries the hand-authored, non-negotiable required-field
//! contract of the Strive domain and the two validators built on the same
//! recursive schema walk:
//! - [`validate_required_fields`] checks a candidate catalog against the
//!   contract at build/CI time and reports every violation;
//! - [`validate_arguments`] checks caller-supplied JSON against a tool's
//!   stored input schema at request time and fails on the first violation.
//!
//! The contract is defined once in code, never persisted, and independent of
//! whatever a particular OpenAPI document happens to generate. Security
//! posture: tool arguments are untrusted input; validation fails closed,
//! including on nesting depth overruns.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod arguments;
pub mod contract;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use arguments::ArgumentError;
pub use arguments::MAX_VALIDATION_DEPTH;
pub use arguments::validate_arguments;
pub use contract::RequiredFieldContract;
pub use contract::required_field_contract;
pub use contract::validate_required_fields;
