// src/types.rs
// Core data types and the canonical timestamp layout

use crate::error::{Result, TallyError};
use chrono::{NaiveDate, NaiveDateTime};

/// Canonical timestamp layout, applied uniformly to tool input, entry
/// dates on the wire, and stored records
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One unit of logged work, built per request and never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct WorkEntry {
    pub description: String,
    pub date: NaiveDateTime,
    pub hours: f64,
    pub task_id: i64,
    pub cost_code_id: i64,
    pub overtime: bool,
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIME_FORMAT).to_string()
}

/// Parse a timestamp in the canonical layout
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|e| TallyError::InvalidInput(format!("invalid timestamp '{}': {}", raw, e)))
}

/// Parse an entry date from tool input.
///
/// Accepts the canonical layout, or a bare date with midnight assumed.
pub fn parse_entry_date(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, TIME_FORMAT) {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
        .map_err(|_| {
            TallyError::InvalidInput(format!(
                "invalid date '{}': expected YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD",
                raw
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip() {
        let ts = parse_timestamp("2025-03-14T09:30:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-03-14T09:30:00");
    }

    #[test]
    fn test_timestamp_rejects_other_layouts() {
        assert!(parse_timestamp("2025-03-14 09:30:00").is_err());
        assert!(parse_timestamp("14/03/2025").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_entry_date_accepts_bare_date() {
        let ts = parse_entry_date("2025-03-14").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-03-14T00:00:00");
    }

    #[test]
    fn test_entry_date_accepts_canonical() {
        let ts = parse_entry_date("2025-03-14T17:45:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-03-14T17:45:00");
    }

    #[test]
    fn test_entry_date_rejects_garbage() {
        let err = parse_entry_date("yesterday").unwrap_err();
        assert!(matches!(err, TallyError::InvalidInput(_)));
        assert!(err.to_string().contains("yesterday"));
    }
}
