// src/codes.rs
// Fixed cost-code catalog accepted by the remote service

use crate::error::{Result, TallyError};

/// Cost codes the entry endpoint accepts
pub const COST_CODES: &[(i64, &str)] = &[
    (1, "Annual Leave"),
    (2, "Sick Leave"),
    (3, "Meetings"),
    (4, "Development"),
    (5, "Testing"),
    (6, "Support"),
    (7, "Documentation"),
    (8, "Training"),
];

/// Render the catalog, one "<id>. <label>" entry per line
pub fn list() -> String {
    COST_CODES
        .iter()
        .map(|(id, label)| format!("{}. {}", id, label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolve a cost-code parameter to its id.
///
/// Accepts a full catalog entry ("4. Development") or anything whose
/// leading integer before the first '.' is a known id.
pub fn resolve(input: &str) -> Result<i64> {
    let head = input.split('.').next().unwrap_or("").trim();
    let id: i64 = head.parse().map_err(|_| {
        TallyError::InvalidInput(format!(
            "unrecognized cost code '{}', call list_cost_codes for valid values",
            input
        ))
    })?;

    if COST_CODES.iter().any(|(known, _)| *known == id) {
        Ok(id)
    } else {
        Err(TallyError::InvalidInput(format!(
            "unknown cost code id {} in '{}'",
            id, input
        )))
    }
}
