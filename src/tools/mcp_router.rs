//! MCP server handler over the tool registry. One handler backs both the
//! stdio transport and the streamable HTTP service.

use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler,
};
use serde_json::json;

use crate::core::error::ToolError;
use crate::tools::registry::ToolRegistry;

#[derive(Clone)]
pub struct GatewaySvc {
    registry: ToolRegistry,
}

impl GatewaySvc {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }
}

/// Render the registry listing as the protocol's tool-list result.
fn list_result(registry: &ToolRegistry) -> Result<ListToolsResult, McpError> {
    let tools: Vec<serde_json::Value> = registry
        .list()
        .into_iter()
        .map(|t| {
            json!({
                "name": t.name,
                "description": t.description,
                "inputSchema": t.input_schema,
            })
        })
        .collect();
    serde_json::from_value(json!({ "tools": tools }))
        .map_err(|e| McpError::internal_error(e.to_string(), None))
}

/// Map a dispatch outcome onto the protocol envelope: caller mistakes are
/// protocol errors, tool failures are error content.
fn into_call_result(outcome: Result<String, ToolError>) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) if e.is_protocol() => Err(McpError::invalid_params(e.to_string(), None)),
        Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
}

impl ServerHandler for GatewaySvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Read-only Scrapbox access for one project: fetch a page by title, \
                 list pages, run a full-text search, or build a page-creation URL."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        list_result(&self.registry)
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::Value::Null);
        into_call_result(self.registry.call(&request.name, &args).await)
    }
}
