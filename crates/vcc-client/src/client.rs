//! Document fetching.
//!
//! Credential schemas and JSON-LD contexts are public documents addressed by
//! URL, usually `https://` or `ipfs://`. IPFS URLs are rewritten through the
//! configured gateway. Requests to the issuer backend itself carry the
//! configured basic-auth credentials; requests elsewhere never do.

use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use vcc_core::{ConsoleConfig, HttpFailure, JsonLdType};
use vcc_schema::{build_document, extract_json_ld_types, Attribute};
use vcc_state::run_cancellable;

use crate::error::ClientError;

/// Fields probed, in order, for a human-readable message in an error body.
const MESSAGE_FIELDS: [&str; 3] = ["message", "error", "detail"];

/// HTTP client for the credentials console.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    http: reqwest::Client,
    config: ConsoleConfig,
}

impl ConsoleClient {
    /// Create a client from configuration.
    pub fn new(config: &ConsoleConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                url: "client_init".into(),
                source: e,
            })?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Fetch a JSON document. `ipfs://` URLs go through the gateway.
    pub async fn fetch_json(
        &self,
        url: &str,
        token: &CancellationToken,
    ) -> Result<Value, ClientError> {
        let resolved = self.config.resolve_document_url(url)?;
        self.get_json(resolved, token).await
    }

    /// Fetch a JSON Schema and build its attribute tree.
    pub async fn fetch_schema(
        &self,
        url: &str,
        token: &CancellationToken,
    ) -> Result<Attribute, ClientError> {
        let document = self.fetch_json(url, token).await?;
        build_document(&document).map_err(|source| ClientError::Document {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch a JSON-LD context and list the credential types it declares.
    pub async fn fetch_json_ld_types(
        &self,
        url: &str,
        token: &CancellationToken,
    ) -> Result<Vec<JsonLdType>, ClientError> {
        let document = self.fetch_json(url, token).await?;
        extract_json_ld_types(&document).map_err(|source| ClientError::Document {
            url: url.to_string(),
            source,
        })
    }

    /// GET a JSON resource from the issuer backend, relative to `api_url`.
    pub async fn fetch_api_json(
        &self,
        path: &str,
        token: &CancellationToken,
    ) -> Result<Value, ClientError> {
        let url = self.config.api_url.join(path).map_err(|e| {
            ClientError::Config(vcc_core::ConfigError::InvalidUrl(
                path.to_string(),
                e.to_string(),
            ))
        })?;
        self.get_json(url, token).await
    }

    async fn get_json(&self, url: Url, token: &CancellationToken) -> Result<Value, ClientError> {
        let label = url.to_string();
        let fetch = async {
            tracing::debug!(url = %label, "fetching document");

            let mut request = self.http.get(url.clone());
            if self.is_backend(&url) {
                if let Some(username) = &self.config.api_username {
                    request = request.basic_auth(username, self.config.api_password.as_ref());
                }
            }

            let resp = request.send().await.map_err(|e| ClientError::Http {
                url: label.clone(),
                source: e,
            })?;

            if !resp.status().is_success() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                let failure = HttpFailure {
                    status: Some(status.as_u16()),
                    message: extract_message(&body)
                        .or_else(|| status.canonical_reason().map(str::to_string))
                        .unwrap_or_else(|| status.to_string()),
                };
                tracing::warn!(url = %label, status = status.as_u16(), "request failed");
                return Err(ClientError::Status {
                    url: label.clone(),
                    failure,
                });
            }

            resp.json().await.map_err(|e| ClientError::Deserialization {
                url: label.clone(),
                source: e,
            })
        };

        // The only failure `run_cancellable` itself produces is the cancel.
        let outcome = run_cancellable(token, async { Ok(fetch.await) }).await;
        match outcome {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(url = %label, "request cancelled");
                Err(ClientError::Cancelled { url: label })
            }
        }
    }

    fn is_backend(&self, url: &Url) -> bool {
        url.origin() == self.config.api_url.origin()
    }
}

/// Best-effort server message: a string `message`, `error` or `detail`
/// field of a JSON body, else the trimmed raw body. `None` for an empty
/// body.
pub fn extract_message(body: &str) -> Option<String> {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        for field in MESSAGE_FIELDS {
            if let Some(message) = fields.get(field).and_then(Value::as_str) {
                return Some(message.to_string());
            }
        }
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_json_fields_in_order() {
        assert_eq!(
            extract_message(r#"{"error": "bad", "message": "Schema not found"}"#).as_deref(),
            Some("Schema not found")
        );
        assert_eq!(
            extract_message(r#"{"detail": "expired"}"#).as_deref(),
            Some("expired")
        );
    }

    #[test]
    fn test_message_falls_back_to_raw_body() {
        assert_eq!(extract_message("  gateway timeout \n").as_deref(), Some("gateway timeout"));
        assert_eq!(
            extract_message(r#"{"code": 7}"#).as_deref(),
            Some(r#"{"code": 7}"#)
        );
        assert_eq!(extract_message("   "), None);
    }
}
