//! Integration tests for the analyze endpoint.
//!
//! The router is exercised in-process with a stub provider; no network
//! access is involved.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use trend_common::{Error, Result};
use trend_gateway::routes::{build_routes, AppState};
use trend_gateway::{ModelProvider, ModelReply};

/// Provider that returns fixed model text.
struct FixedProvider {
    content: &'static str,
}

#[async_trait::async_trait]
impl ModelProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn analyze(&self, _topic: &str) -> Result<ModelReply> {
        Ok(ModelReply {
            content: self.content.to_string(),
            sources: Vec::new(),
        })
    }
}

/// Provider that fails with a caller-chosen error.
struct FailingProvider {
    make_error: fn() -> Error,
}

#[async_trait::async_trait]
impl ModelProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn analyze(&self, _topic: &str) -> Result<ModelReply> {
        Err((self.make_error)())
    }
}

fn app_with(provider: Arc<dyn ModelProvider>) -> axum::Router {
    build_routes(AppState {
        provider: Some(provider),
    })
}

fn analyze_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn analyze_returns_model_text() {
    let app = app_with(Arc::new(FixedProvider {
        content: "```json\n{\"topic\":\"AI\"}\n```",
    }));

    let response = app
        .oneshot(analyze_request(r#"{"topic":"AI工具"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["text"], "```json\n{\"topic\":\"AI\"}\n```");
}

#[tokio::test]
async fn analyze_rejects_non_post_methods() {
    let app = app_with(Arc::new(FixedProvider { content: "{}" }));

    let request = Request::builder()
        .method("GET")
        .uri("/api/analyze")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn analyze_rejects_blank_topic() {
    let app = app_with(Arc::new(FixedProvider { content: "{}" }));

    let response = app
        .oneshot(analyze_request(r#"{"topic":"   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("topic"));
}

#[tokio::test]
async fn analyze_without_credentials_is_config_error() {
    // No provider: credentials were missing at startup. The request must
    // fail before any network attempt, which holds by construction here.
    let app = build_routes(AppState { provider: None });

    let response = app
        .oneshot(analyze_request(r#"{"topic":"AI工具"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("Configuration"));
}

#[tokio::test]
async fn analyze_surfaces_provider_business_error() {
    let app = app_with(Arc::new(FailingProvider {
        make_error: || Error::ProviderBusiness {
            code: "AuthFailure".into(),
            message: "bad sig".into(),
        },
    }));

    let response = app
        .oneshot(analyze_request(r#"{"topic":"AI工具"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("AuthFailure"));
}

#[tokio::test]
async fn analyze_surfaces_transport_error_distinctly() {
    let app = app_with(Arc::new(FailingProvider {
        make_error: || Error::Transport("connection reset by peer".into()),
    }));

    let response = app
        .oneshot(analyze_request(r#"{"topic":"AI工具"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Transport"));
    assert!(!message.contains("Configuration"));
}

#[tokio::test]
async fn analyze_carries_provider_http_body_in_details() {
    let app = app_with(Arc::new(FailingProvider {
        make_error: || Error::ProviderHttp {
            status: 403,
            body: "RequestLimitExceeded".into(),
        },
    }));

    let response = app
        .oneshot(analyze_request(r#"{"topic":"AI工具"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["details"], "RequestLimitExceeded");
}

#[tokio::test]
async fn health_endpoint_reports_service() {
    let app = build_routes(AppState { provider: None });

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "trend-gateway");
}
