#![recursion_limit = "256"]

mod config;
mod routes;
mod state;

use crate::config::{ConfigError, HostConfig};

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Leptos(String),
    #[error("failed to bind port {port}: {source}")]
    Bind { port: u16, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring .env: {e}");
        }
    }
    tracing_subscriber::fmt::init();

    let config = HostConfig::from_env()?;
    let state = state::AppState::new(&config.backend_url);
    let app = routes::app(state, config.site_root.clone()).map_err(ServerError::Leptos)?;

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|source| ServerError::Bind { port, source })?;

    tracing::info!(%port, backend = %config.backend_url, "gridadmin listening");
    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
