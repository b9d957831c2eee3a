use axum::{
    routing::{any_service, get, post},
    Router,
};
use std::sync::Arc;

use crate::infra::runtime::mcp_transport;
use crate::tools::mcp_router::GatewaySvc;
use crate::tools::registry::ToolRegistry;

/// HTTP app: `/healthz`, streamable MCP at `/mcp`, JSON-RPC shim at `/rpc`.
///
/// Both MCP sessions and the shim dispatch through the same registry, so the
/// two surfaces cannot drift apart.
pub fn build_app(registry: ToolRegistry) -> Router {
    let session_mgr = Arc::new(mcp_transport::LocalSessionManager::default());
    let mcp_service = {
        let registry = registry.clone();
        mcp_transport::make_streamable_http_service(
            move || GatewaySvc::new(registry.clone()),
            session_mgr,
        )
    };

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
        .route("/rpc", post(crate::api::mcp::http))
        .with_state(registry)
}
