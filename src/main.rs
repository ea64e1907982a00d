use anyhow::Context;
use clap::Parser;
use fatsecret_proxy_server::api::build_app;
use fatsecret_proxy_server::core::models::{
    ProxyConfig, DEFAULT_API_URL, DEFAULT_SCOPE, DEFAULT_TOKEN_URL,
};
use fatsecret_proxy_server::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "PORT", default_value_t = 5001)]
    port: u16,

    /// Address to bind, 0.0.0.0 so devices on the LAN can reach it
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    bind_address: String,

    #[arg(long, env = "FATSECRET_CLIENT_ID", hide_env_values = true)]
    client_id: String,

    #[arg(long, env = "FATSECRET_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    #[arg(long, env = "FATSECRET_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    token_url: String,

    #[arg(long, env = "FATSECRET_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// OAuth2 scopes, space separated
    #[arg(long, env = "FATSECRET_SCOPE", default_value = DEFAULT_SCOPE)]
    scope: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,

    /// Maximum image upload size in MiB
    #[arg(long, env = "MAX_UPLOAD_MB", default_value_t = 10)]
    max_upload_mb: usize,
}

impl Args {
    fn into_config(self) -> ProxyConfig {
        let mut config = ProxyConfig::new(self.client_id, self.client_secret);
        config.bind_address = self.bind_address;
        config.port = self.port;
        config.token_url = self.token_url;
        config.api_url = self.api_url;
        config.scope = self.scope;
        config.request_timeout = self.request_timeout;
        config.set_max_upload_mb(self.max_upload_mb);
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 可选
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Args::parse().into_config();
    tracing::debug!("Loaded config: {:?}", config);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_address))?;

    let state = AppState::new(config).map_err(anyhow::Error::msg)?;
    let app = build_app(Arc::new(state));

    tracing::info!("FatSecret proxy listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
