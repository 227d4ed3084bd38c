// crates/strive-store/src/diff.rs
// ============================================================================
// Module: Catalog Diff
// Description: Line-oriented comparison of serialized catalogs.
// Purpose: Report catalog drift with an actionable first divergence.
// Dependencies: (standard library only)
// ============================================================================

//! ## Overview
//! Catalog drift checks compare the persisted artifact against an in-memory
//! regeneration, both in canonical serialized form. Because the canonical
//! form is deterministic, any byte difference is real drift. The diff is
//! line-oriented and stops at the first divergence; CI only needs a pointer,
//! not a patch.

// ============================================================================
// SECTION: Diff Result
// ============================================================================

/// Outcome of comparing a persisted catalog against a regeneration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    /// Whether the two serialized catalogs are byte-identical.
    pub identical: bool,
    /// Human-readable first-divergence details; empty when identical.
    pub details: String,
}

/// Compares serialized catalogs and reports the first divergence.
///
/// `persisted` is the raw on-disk text (possibly empty when no catalog has
/// been written yet); `regenerated` is the canonical serialization of a fresh
/// generation.
#[must_use]
pub fn diff_catalogs(persisted: &str, regenerated: &str) -> DiffResult {
    if persisted == regenerated {
        return DiffResult {
            identical: true,
            details: String::new(),
        };
    }
    let mut persisted_lines = persisted.lines();
    let mut regenerated_lines = regenerated.lines();
    let mut line = 0_usize;
    let details = loop {
        line += 1;
        match (persisted_lines.next(), regenerated_lines.next()) {
            (Some(old), Some(new)) if old == new => {}
            (Some(old), Some(new)) => {
                break format!(
                    "first divergence at line {line}:\n- persisted:   {old}\n- regenerated: {new}"
                );
            }
            (Some(old), None) => {
                break format!(
                    "persisted catalog has extra content from line {line}:\n- persisted:   {old}"
                );
            }
            (None, Some(new)) => {
                break format!(
                    "regenerated catalog has extra content from line {line}:\n- regenerated: {new}"
                );
            }
            // Same lines but differing trailing whitespace/newlines.
            (None, None) => break String::from("catalogs differ only in trailing whitespace"),
        }
    };
    DiffResult {
        identical: false,
        details,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
