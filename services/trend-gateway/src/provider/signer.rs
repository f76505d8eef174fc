//! TC3-HMAC-SHA256 request signing for the Tencent Cloud API.
//!
//! The scheme hashes a canonical representation of the request, scopes it
//! to a UTC date and service, and chains HMAC-SHA256 derivations from the
//! secret key. Signed headers must match the headers actually sent
//! byte-for-byte or the service rejects the request as a signature
//! mismatch.

use chrono::DateTime;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use trend_common::config::SecretsConfig;
use trend_common::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "TC3-HMAC-SHA256";
const KEY_PREFIX: &str = "TC3";
const SCOPE_SUFFIX: &str = "tc3_request";

// The chat-completion call is always a POST to the service root with a
// JSON body; the canonical header block below is exactly what goes on
// the wire.
const HTTP_METHOD: &str = "POST";
const CANONICAL_URI: &str = "/";
const CANONICAL_QUERY: &str = "";
const SIGNED_HEADERS: &str = "content-type;host";

/// Tencent Cloud API credentials.
///
/// The signing key is private to this type and never appears in `Debug`
/// output, log lines, or return values.
#[derive(Clone)]
pub struct Credentials {
    secret_id: String,
    secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_id", &"<set>")
            .field("secret_key", &"<set>")
            .finish()
    }
}

impl Credentials {
    /// Build credentials, refusing empty values up front so a missing
    /// secret surfaces as a configuration error rather than a remote
    /// auth failure.
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let secret_id = secret_id.into();
        let secret_key = secret_key.into();

        if secret_id.trim().is_empty() || secret_key.trim().is_empty() {
            return Err(Error::Config(
                "TENCENT_SECRET_ID and TENCENT_SECRET_KEY must both be set".into(),
            ));
        }

        Ok(Self {
            secret_id,
            secret_key,
        })
    }

    /// Build credentials from loaded configuration secrets.
    pub fn from_secrets(secrets: &SecretsConfig) -> Result<Self> {
        match (&secrets.secret_id, &secrets.secret_key) {
            (Some(id), Some(key)) => Self::new(id.clone(), key.clone()),
            _ => Err(Error::Config(
                "TENCENT_SECRET_ID and TENCENT_SECRET_KEY must both be set".into(),
            )),
        }
    }

    /// Produce the `Authorization` header value for a signed request.
    ///
    /// The credential-scope date is derived from `timestamp`, so both
    /// always refer to the same instant.
    pub fn sign(&self, host: &str, service: &str, payload: &str, timestamp: i64) -> Result<String> {
        let date = DateTime::from_timestamp(timestamp, 0)
            .unwrap_or_default()
            .format("%Y-%m-%d")
            .to_string();

        let canonical_request = canonical_request(host, payload);
        let scope = format!("{date}/{service}/{SCOPE_SUFFIX}");
        let string_to_sign = format!(
            "{ALGORITHM}\n{timestamp}\n{scope}\n{}",
            hex_sha256(&canonical_request)
        );

        let k_date = hmac_sha256(
            format!("{KEY_PREFIX}{}", self.secret_key).as_bytes(),
            date.as_bytes(),
        )?;
        let k_service = hmac_sha256(&k_date, service.as_bytes())?;
        let k_signing = hmac_sha256(&k_service, SCOPE_SUFFIX.as_bytes())?;
        let signature = hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes())?);

        Ok(format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            self.secret_id
        ))
    }
}

/// Canonical request string: method, path, query, canonical headers
/// (lowercased name:value pairs, newline-terminated, sorted by name),
/// signed header names, and the hex SHA-256 of the body.
fn canonical_request(host: &str, payload: &str) -> String {
    let canonical_headers = format!("content-type:application/json\nhost:{host}\n");
    format!(
        "{HTTP_METHOD}\n{CANONICAL_URI}\n{CANONICAL_QUERY}\n{canonical_headers}\n{SIGNED_HEADERS}\n{}",
        hex_sha256(payload)
    )
}

fn hex_sha256(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| Error::Config(format!("HMAC key error: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
