//! Prediction API server
//!
//! A thin HTTP façade over a model loaded once at process start. Exposes a
//! health check and a single-record prediction endpoint; the incoming record
//! is validated against the persisted feature schema and passed straight to
//! the loaded estimator.

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use state::AppState;

use crate::artifacts::{ArtifactStore, DEFAULT_ARTIFACT_DIR};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Version string reported by the health endpoint.
pub const MODEL_API_VERSION: &str = "v0.1";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            model_dir: std::env::var("MODEL_DIR")
                .unwrap_or_else(|_| DEFAULT_ARTIFACT_DIR.to_string()),
        }
    }
}

/// Load artifacts and serve until ctrl+c.
///
/// A missing or corrupt model or feature-schema file aborts startup before
/// the listener binds; there is no degraded mode.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();

    let store = ArtifactStore::new(&config.model_dir);
    let state = Arc::new(AppState::load(&store)?);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        host = %config.host,
        port = config.port,
        model_dir = %config.model_dir,
        started_at = %start_time.to_rfc3339(),
        "prediction API starting"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, pid = std::process::id(), "server listening");

    let shutdown_signal = async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        let uptime = chrono::Utc::now().signed_duration_since(start_time);
        info!(uptime_secs = uptime.num_seconds(), "shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("server shut down cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.model_dir, DEFAULT_ARTIFACT_DIR);
    }
}
