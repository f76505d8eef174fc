//! Configuration for TrendBurst services.
//!
//! All configuration is read from the process environment at startup and
//! passed into constructors explicitly. Nothing reads the environment at
//! request time.
//!
//! # Environment Variable Mapping
//!
//! ## Server
//! - `TREND_HOST` → server.host (default `127.0.0.1`)
//! - `TREND_PORT` → server.port (default `8787`)
//!
//! ## Observability
//! - `TREND_LOG_LEVEL` → observability.log_level (default `info`)
//! - `TREND_LOG_FORMAT` → observability.log_format (`pretty` or `json`)
//!
//! ## Provider secrets
//! - `TENCENT_SECRET_ID` → secrets.secret_id
//! - `TENCENT_SECRET_KEY` → secrets.secret_key
//!
//! Missing secrets are not a startup crash: the gateway logs the problem
//! loudly and every analysis request fails with a configuration error
//! before any network attempt.

/// Top-level configuration for a TrendBurst service.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub observability: ObservabilityConfig,
    pub secrets: SecretsConfig,
}

/// HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: String,
}

/// Tencent Cloud API secrets. Either may be absent; emptiness is treated
/// as absence.
#[derive(Clone, Default)]
pub struct SecretsConfig {
    pub secret_id: Option<String>,
    pub secret_key: Option<String>,
}

// The signing key must never end up in logs, so Debug shows presence only.
impl std::fmt::Debug for SecretsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsConfig")
            .field("secret_id", &self.secret_id.as_deref().map(|_| "<set>"))
            .field("secret_key", &self.secret_key.as_deref().map(|_| "<set>"))
            .finish()
    }
}

impl SecretsConfig {
    /// Whether both secrets are present and non-empty.
    pub fn is_complete(&self) -> bool {
        self.secret_id.is_some() && self.secret_key.is_some()
    }
}

impl Config {
    /// Load configuration from the process environment, applying defaults.
    pub fn load() -> Self {
        Self {
            server: ServerConfig {
                host: env_or("TREND_HOST", "127.0.0.1"),
                port: env_parse_or("TREND_PORT", 8787),
            },
            observability: ObservabilityConfig {
                log_level: env_or("TREND_LOG_LEVEL", "info"),
                log_format: env_or("TREND_LOG_FORMAT", "pretty"),
            },
            secrets: SecretsConfig {
                secret_id: non_empty_env("TENCENT_SECRET_ID"),
                secret_key: non_empty_env("TENCENT_SECRET_KEY"),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
