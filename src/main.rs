use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wild_kratts_mcp::config::{
    CatalogConfig, ResponseShape, DEFAULT_BASE_URL, DEFAULT_PER_PAGE, DEFAULT_TIMEOUT_SECS,
};
use wild_kratts_mcp::mcp::{proxy::McpProxy, stdio};
use wild_kratts_mcp::router::create_app_router;
use wild_kratts_mcp::state::AppState;

#[derive(Parser, Debug)]
#[command(version, about = "MCP bridge to the Wild Kratts catalog")]
struct CliArgs {
    /// Root of the upstream catalog REST API.
    #[arg(long, env = "WILD_KRATTS_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Timeout for each upstream request, in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    /// Products page size, also the maximum number of search matches.
    #[arg(long, default_value_t = DEFAULT_PER_PAGE, value_parser = clap::value_parser!(u32).range(1..), global = true)]
    per_page: u32,

    /// Payload shape of catalog results.
    #[arg(long, value_enum, default_value_t = ResponseShape::Full, global = true)]
    shape: ResponseShape,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve MCP over HTTP (POST /mcp) plus the REST endpoints.
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: std::net::IpAddr,

        #[arg(short, long, env = "PORT", default_value_t = 8000)]
        port: u16,
    },
    /// Serve MCP over stdin/stdout, one JSON-RPC message per line.
    Stdio,
    /// Forward stdio MCP traffic to a remote HTTP MCP endpoint.
    Proxy {
        #[arg(long, env = "MCP_SERVER_URL")]
        server_url: String,
    },
}

impl CliArgs {
    fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            per_page: self.per_page,
            shape: self.shape,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr: stdout carries protocol traffic in stdio mode.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = CliArgs::parse();
    let config = cli.catalog_config();

    match cli.command.unwrap_or(Command::Serve {
        host: [0, 0, 0, 0].into(),
        port: 8000,
    }) {
        Command::Serve { host, port } => {
            let state = Arc::new(AppState::new(config).context("Failed to build catalog client")?);
            let app = create_app_router(state);

            let addr = SocketAddr::new(host, port);
            info!("Server running on http://{}", addr);

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            axum::serve(listener, app).await.context("Server error")?;
        }
        Command::Stdio => {
            let state = Arc::new(AppState::new(config).context("Failed to build catalog client")?);
            stdio::run(state).await.context("stdio transport failed")?;
        }
        Command::Proxy { server_url } => {
            let proxy = McpProxy::new(server_url, config.timeout)
                .context("Failed to build proxy HTTP client")?;
            proxy.run().await.context("proxy transport failed")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_full_shape_and_default_catalog() {
        let cli = CliArgs::parse_from(["wild-kratts-mcp"]);
        let config = cli.catalog_config();
        assert!(cli.command.is_none());
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert_eq!(config.shape, ResponseShape::Full);
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = CliArgs::parse_from([
            "wild-kratts-mcp",
            "stdio",
            "--shape",
            "simple",
            "--per-page",
            "20",
        ]);
        assert!(matches!(cli.command, Some(Command::Stdio)));
        assert_eq!(cli.shape, ResponseShape::Simple);
        assert_eq!(cli.per_page, 20);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(CliArgs::try_parse_from(["wild-kratts-mcp", "--per-page", "0"]).is_err());
    }
}
