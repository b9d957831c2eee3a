use clap::Parser;
use std::process::ExitCode;

use scrapbox_mcp_gateway::cli;
use scrapbox_mcp_gateway::infra;

#[tokio::main]
async fn main() -> ExitCode {
    infra::logging::init();

    let args = cli::Cli::parse();
    if let Some(command) = args.command {
        return cli::run_commands(command).await;
    }

    match infra::boot::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "gateway exited with error");
            ExitCode::FAILURE
        }
    }
}
