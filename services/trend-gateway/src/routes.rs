//! Route definitions for the TrendBurst gateway.
//!
//! One analysis endpoint plus a health check. Every internal failure is
//! mapped to a uniform `{error, details?}` envelope here; nothing leaks
//! a panic to the client.

use crate::provider::ModelProvider;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use trend_common::Error;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Absent when credentials were missing at startup; requests then
    /// fail with a configuration error before any network attempt.
    pub provider: Option<Arc<dyn ModelProvider>>,
}

/// Analyze request body.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub topic: String,
}

/// Analyze response: the raw model text, parsed by the consumer.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub text: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
}

/// Build the gateway routes.
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        service: "trend-gateway".into(),
    })
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let topic = request.topic.trim();
    if topic.is_empty() {
        return Err(reject(Error::InvalidInput(
            "topic must not be empty".into(),
        )));
    }

    let provider = state.provider.as_ref().ok_or_else(|| {
        reject(Error::Config(
            "TENCENT_SECRET_ID and TENCENT_SECRET_KEY are not configured".into(),
        ))
    })?;

    tracing::info!(topic, provider = provider.name(), "analysis request");

    let reply = provider.analyze(topic).await.map_err(|e| {
        tracing::error!(error = %e, "analysis request failed");
        reject(e)
    })?;

    Ok(Json(AnalyzeResponse {
        text: reply.content,
    }))
}

/// Map an internal error to the uniform error envelope. The raw provider
/// body travels only in `details`, never in log lines.
fn reject(err: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let details = match &err {
        Error::ProviderHttp { body, .. } if !body.is_empty() => Some(body.clone()),
        _ => None,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            details,
        }),
    )
}
