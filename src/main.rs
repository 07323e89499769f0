use std::net::SocketAddr;
use std::sync::Arc;

use mediarelay::configs::Config;
use mediarelay::server::AppState;
use mediarelay::transport;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::load()?;

    let default_directives = config
        .logging
        .as_ref()
        .and_then(|l| l.filters.clone().or_else(|| l.level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directives));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let address: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = Arc::new(AppState::new(config)?);

    let app = transport::http_server::router(state)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    info!("Media proxy listening on {}", address);

    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
