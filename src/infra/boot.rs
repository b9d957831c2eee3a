use std::net::SocketAddr;

use crate::clients::scrapbox::ScrapboxClient;
use crate::infra::config::Config;
use crate::tools::mcp_router::GatewaySvc;
use crate::tools::registry::build_registry;

/// Read the environment, wire the client and registry, and run the selected
/// transport until shutdown. The session credential is handed straight to the
/// client and never logged.
pub async fn run() -> anyhow::Result<()> {
    let cfg = Config::from_env()?;
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        project = %cfg.project,
        "BOOT scrapbox-mcp-gateway"
    );

    let client = ScrapboxClient::new(cfg.project.clone(), cfg.sid.clone());
    let registry = build_registry(client);

    if cfg.mode == "stdio" {
        crate::infra::runtime::mcp_transport::serve_stdio(GatewaySvc::new(registry))
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = crate::infra::http_app::build_app(registry);
    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
