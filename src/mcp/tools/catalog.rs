// src/mcp/tools/catalog.rs
// Read-only lookup tools

use crate::codes;
use crate::mcp::TallyServer;

pub async fn list_cost_codes() -> Result<String, String> {
    Ok(codes::list())
}

/// Fetch the project list and render it as pretty JSON
pub async fn list_projects(server: &TallyServer) -> Result<String, String> {
    let creds = &server.credentials;
    let projects = server
        .service
        .list_projects(&creds.email, &creds.password)
        .await
        .map_err(|e| e.to_string())?;

    if projects.is_empty() {
        return Ok("No projects visible to this user.".to_string());
    }

    serde_json::to_string_pretty(&projects).map_err(|e| e.to_string())
}
