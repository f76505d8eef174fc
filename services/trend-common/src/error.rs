//! Error types for the TrendBurst services.

use thiserror::Error;

/// Result type alias using the TrendBurst error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum number of characters of model output carried in a
/// malformed-response error. Keeps diagnostics bounded in logs and
/// error envelopes.
const PREVIEW_CHARS: usize = 200;

/// Unified error type for TrendBurst services.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or empty credentials. Fatal for the request, not the process.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input or request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network-level failure (DNS, TLS, timeout, connection reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider returned a non-2xx HTTP status. The raw body is carried
    /// separately so its size never leaks into log lines.
    #[error("Provider HTTP error ({status})")]
    ProviderHttp { status: u16, body: String },

    /// Provider rejected the request despite transport success
    #[error("Provider rejected the request: {message} ({code})")]
    ProviderBusiness { code: String, message: String },

    /// Model output received but not parseable after the tolerance chain
    #[error("Model response is not valid JSON: {preview}")]
    MalformedResponse { preview: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a malformed-response error with a bounded preview of the
    /// offending text.
    pub fn malformed(text: &str) -> Self {
        let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
        if text.chars().count() > PREVIEW_CHARS {
            preview.push('…');
        }
        Self::MalformedResponse { preview }
    }

    /// Get the HTTP status code for this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            _ => 500,
        }
    }
}
