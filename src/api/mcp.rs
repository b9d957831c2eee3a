use axum::Json;
use serde_json::{json, Value as J};

use crate::core::content::text_result;
use crate::core::mcp::{RpcReq, RpcResp};
use crate::infra::http::json as http_json;
use crate::tools::registry::ToolRegistry;

fn tools_list(reg: &ToolRegistry) -> J {
    let tools: Vec<J> = reg
        .list()
        .into_iter()
        .map(|t| json!({ "name": t.name, "description": t.description, "inputSchema": t.input_schema }))
        .collect();
    json!({ "tools": tools })
}

/// JSON-RPC 2.0 endpoint for plain HTTP clients.
///
/// Request-shape problems (unknown method or tool, bad arguments) come back
/// as JSON-RPC errors; upstream failures come back as a successful response
/// whose result carries `isError: true`, matching the MCP tool contract.
pub async fn http(
    axum::extract::State(reg): axum::extract::State<ToolRegistry>,
    body: String,
) -> Json<RpcResp> {
    let req: RpcReq = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => return http_json::parse_error(format!("parse error: {e}")),
    };
    tracing::debug!(method = %req.method, id = ?req.id, "rpc request");

    let id = req.id.clone();
    let resp = match req.method.as_str() {
        "initialize" => http_json::ok(
            id.clone(),
            json!({
                "serverInfo": { "name": "scrapbox-mcp-gateway", "version": env!("CARGO_PKG_VERSION") },
                "capabilities": { "tools": {} }
            }),
        )
        .0,
        "shutdown" => http_json::ok(id.clone(), J::Null).0,
        "tools.list" | "tools/list" => http_json::ok(id.clone(), tools_list(&reg)).0,
        "tools.call" | "tools/call" => {
            let Some(name) = req.params.get("name").and_then(|v| v.as_str()) else {
                return http_json::error(id, -32602, "missing tool name");
            };
            let args = req.params.get("arguments").cloned().unwrap_or(J::Null);
            match reg.call(name, &args).await {
                Ok(text) => http_json::ok(id.clone(), text_result(&text, false)).0,
                Err(e) if e.is_protocol() => http_json::error(id.clone(), -32602, e.to_string()).0,
                Err(e) => http_json::ok(id.clone(), text_result(&e.to_string(), true)).0,
            }
        }
        _ => http_json::error(id.clone(), -32601, format!("unknown method: {}", req.method)).0,
    };
    Json(resp)
}
