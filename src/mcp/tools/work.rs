// src/mcp/tools/work.rs
// Work logging tool

use crate::codes;
use crate::mcp::TallyServer;
use crate::types::{self, WorkEntry};
use chrono::Utc;

/// Build a work entry from tool parameters and submit it
pub async fn log_work(
    server: &TallyServer,
    description: String,
    date: Option<String>,
    hours: f64,
    task_id: i64,
    cost_code_id: String,
    overtime: Option<bool>,
) -> Result<String, String> {
    if description.trim().is_empty() {
        return Err("description must not be empty".to_string());
    }
    if !hours.is_finite() || hours <= 0.0 {
        return Err(format!("hours must be a positive number, got {}", hours));
    }

    let date = match date {
        Some(raw) => types::parse_entry_date(&raw).map_err(|e| e.to_string())?,
        None => Utc::now().naive_utc(),
    };

    let cost_code_id = codes::resolve(&cost_code_id).map_err(|e| e.to_string())?;

    let entry = WorkEntry {
        description,
        date,
        hours,
        task_id,
        cost_code_id,
        overtime: overtime.unwrap_or(false),
    };

    let creds = &server.credentials;
    server
        .service
        .log_work(&creds.email, &creds.password, &entry)
        .await
        .map_err(|e| e.to_string())?;

    Ok(format!(
        "Logged {}h against task {} on {}",
        entry.hours,
        entry.task_id,
        types::format_timestamp(&entry.date)
    ))
}
