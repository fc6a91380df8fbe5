// src/mcp/mod.rs
// MCP server surface

pub mod tools;

use crate::service::WorkLogService;
use rmcp::{
    ErrorData, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo,
    },
    schemars,
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Acting user's credentials, passed through to every service call
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// MCP server state
#[derive(Clone)]
pub struct TallyServer {
    pub service: Arc<WorkLogService>,
    pub credentials: Credentials,
    tool_router: ToolRouter<Self>,
}

impl TallyServer {
    pub fn new(service: Arc<WorkLogService>, credentials: Credentials) -> Self {
        Self {
            service,
            credentials,
            tool_router: Self::tool_router(),
        }
    }
}

// Request types for tools with parameters
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogWorkRequest {
    #[schemars(description = "What was worked on")]
    pub description: String,
    #[schemars(description = "Entry date, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD (defaults to now)")]
    pub date: Option<String>,
    #[schemars(description = "Hours worked")]
    pub hours: f64,
    #[schemars(description = "Task id of the project to log against (see list_projects)")]
    pub task_id: i64,
    #[schemars(description = "Cost code entry from list_cost_codes, e.g. \"4. Development\"")]
    pub cost_code_id: String,
    #[schemars(description = "Count the entry as overtime (default false)")]
    pub overtime: Option<bool>,
}

#[tool_router]
impl TallyServer {
    #[tool(description = "Log a work entry to the timesheet service.")]
    async fn log_work(
        &self,
        Parameters(req): Parameters<LogWorkRequest>,
    ) -> Result<String, String> {
        tools::work::log_work(
            self,
            req.description,
            req.date,
            req.hours,
            req.task_id,
            req.cost_code_id,
            req.overtime,
        )
        .await
    }

    #[tool(description = "List the cost codes accepted by log_work.")]
    async fn list_cost_codes(&self) -> Result<String, String> {
        tools::catalog::list_cost_codes().await
    }

    #[tool(description = "List projects and their task ids.")]
    async fn list_projects(&self) -> Result<String, String> {
        tools::catalog::list_projects(self).await
    }
}

impl ServerHandler for TallyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "tally".into(),
                title: Some("Tally - timesheet logging for AI agents".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tally logs work entries to the timesheet service on the configured user's behalf. \
                 Use list_projects to find task ids and list_cost_codes for valid cost codes, then \
                 log_work to submit an entry."
                    .into(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let tool_name = request.name.to_string();
            let start = std::time::Instant::now();

            let ctx = ToolCallContext::new(self, request, context);
            let result = self.tool_router.call(ctx).await;

            debug!(
                tool = %tool_name,
                elapsed_ms = start.elapsed().as_millis() as u64,
                success = result.is_ok(),
                "Tool call finished"
            );

            result
        }
    }
}
