//! Tencent Hunyuan chat-completion provider.
//!
//! One signed POST per analysis. The Hunyuan envelope can carry a
//! business error even on HTTP 200, so the body is read as text first
//! and decoded afterwards.

use super::signer::Credentials;
use super::{ModelProvider, ModelReply};
use crate::prompt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use trend_common::{Error, Result};

const MODEL_ID: &str = "hunyuan-standard";
const HOST: &str = "hunyuan.tencentcloudapi.com";
const SERVICE: &str = "hunyuan";
const REGION: &str = "ap-guangzhou";
const ACTION: &str = "ChatCompletions";
const API_VERSION: &str = "2023-09-01";
const TEMPERATURE: f64 = 0.7;

/// Tencent Hunyuan API provider.
pub struct HunyuanProvider {
    credentials: Credentials,
    client: reqwest::Client,
    endpoint: String,
}

impl HunyuanProvider {
    /// Create a provider targeting the production Hunyuan endpoint.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_endpoint(credentials, format!("https://{HOST}"))
    }

    /// Create with a custom endpoint (for tests against a local mock).
    pub fn with_endpoint(credentials: Credentials, endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            credentials,
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ModelProvider for HunyuanProvider {
    fn name(&self) -> &str {
        "hunyuan"
    }

    async fn analyze(&self, topic: &str) -> Result<ModelReply> {
        let request = ChatCompletionsRequest {
            model: MODEL_ID.into(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt::build_prompt(topic),
            }],
            temperature: TEMPERATURE,
        };
        let payload = serde_json::to_string(&request)?;

        // Scope date and X-TC-Timestamp must come from the same instant.
        let timestamp = chrono::Utc::now().timestamp();
        let authorization = self.credentials.sign(HOST, SERVICE, &payload, timestamp)?;

        let response = self
            .client
            .post(format!("{}/", self.endpoint.trim_end_matches('/')))
            .header("Content-Type", "application/json")
            .header("Authorization", authorization)
            .header("X-TC-Action", ACTION)
            .header("X-TC-Version", API_VERSION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("X-TC-Region", REGION)
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Hunyuan API HTTP error");
            return Err(Error::ProviderHttp {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope = serde_json::from_str(&body).map_err(|_| Error::malformed(&body))?;
        let inner = envelope.response.unwrap_or_default();

        if let Some(err) = inner.error {
            tracing::error!(code = %err.code, "Hunyuan API business error");
            return Err(Error::ProviderBusiness {
                code: err.code,
                message: err.message,
            });
        }

        // A missing first choice is deliberately an empty string; the
        // extractor reports the emptiness as a parse failure.
        let content = inner
            .choices
            .first()
            .and_then(|c| c.message.as_ref())
            .map(|m| m.content.clone())
            .unwrap_or_default();

        // Hunyuan exposes no grounding-citation metadata.
        Ok(ModelReply {
            content,
            sources: Vec::new(),
        })
    }
}

// ============================================================================
// Hunyuan API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest {
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Messages")]
    messages: Vec<ChatMessage>,
    #[serde(rename = "Temperature")]
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    #[serde(rename = "Role")]
    role: String,
    #[serde(rename = "Content")]
    content: String,
}

#[derive(Debug, Deserialize, Default)]
struct Envelope {
    #[serde(rename = "Response")]
    response: Option<ResponseBody>,
}

#[derive(Debug, Deserialize, Default)]
struct ResponseBody {
    #[serde(rename = "Error")]
    error: Option<BusinessError>,
    #[serde(rename = "Choices", default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct BusinessError {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(rename = "Message")]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(rename = "Content", default)]
    content: String,
}
