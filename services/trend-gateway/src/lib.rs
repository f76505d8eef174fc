//! TrendBurst gateway - signs and forwards analysis requests to Tencent Hunyuan.
//!
//! The gateway owns the only non-trivial contracts in the system:
//! TC3-HMAC-SHA256 request signing and the provider error taxonomy.
//!
//! ## Architecture
//!
//! ```text
//! Consumer → Gateway (validate topic → sign → send) → Hunyuan
//!                ↓
//!          raw model text, parsed by the consumer via trend-common
//! ```

#![warn(clippy::all)]

pub mod prompt;
pub mod provider;
pub mod routes;

pub use provider::{Credentials, HunyuanProvider, ModelProvider, ModelReply};
pub use routes::{build_routes, AppState};

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use trend_common::config::Config;

/// Build the gateway router with all routes and middleware.
///
/// Missing secrets are reported loudly here, once, at startup; requests
/// against the resulting router fail with a configuration error without
/// touching the network.
pub fn build_router(config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let provider = match Credentials::from_secrets(&config.secrets) {
        Ok(credentials) => {
            Some(Arc::new(HunyuanProvider::new(credentials)) as Arc<dyn ModelProvider>)
        }
        Err(e) => {
            tracing::error!(error = %e, "Hunyuan credentials unavailable; analysis requests will fail");
            None
        }
    };

    routes::build_routes(AppState { provider }).layer(cors)
}

/// Start the gateway server.
pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    let router = build_router(config);

    tracing::info!("Starting TrendBurst gateway on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
