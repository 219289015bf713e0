//! Console configuration.
//!
//! Loaded once at startup, read-only afterwards, and passed by reference
//! to every component that talks to the backend or resolves remote
//! documents.

use url::Url;

/// Default public IPFS gateway used to resolve `ipfs://` document URLs.
pub const DEFAULT_IPFS_GATEWAY_URL: &str = "https://ipfs.io";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the credentials console.
///
/// Custom `Debug` implementation redacts `api_password` to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct ConsoleConfig {
    /// Base URL of the issuer backend API.
    pub api_url: Url,
    /// Basic-auth username for the backend API, if any.
    pub api_username: Option<String>,
    /// Basic-auth password for the backend API, if any.
    pub api_password: Option<String>,
    /// Gateway used to resolve `ipfs://` URLs.
    pub ipfs_gateway_url: Url,
    /// Display name of the issuer operating this console.
    pub issuer_name: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field("api_url", &self.api_url)
            .field("api_username", &self.api_username)
            .field(
                "api_password",
                &self.api_password.as_ref().map(|_| "[REDACTED]"),
            )
            .field("ipfs_gateway_url", &self.ipfs_gateway_url)
            .field("issuer_name", &self.issuer_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VCC_API_URL` (required)
    /// - `VCC_API_USERNAME`, `VCC_API_PASSWORD` (optional, basic auth)
    /// - `VCC_IPFS_GATEWAY_URL` (default: `https://ipfs.io`)
    /// - `VCC_ISSUER_NAME` (optional)
    /// - `VCC_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("VCC_API_URL").map_err(|_| ConfigError::MissingApiUrl)?;
        let api_url = Url::parse(&api_url)
            .map_err(|e| ConfigError::InvalidUrl("VCC_API_URL".to_string(), e.to_string()))?;

        Ok(Self {
            api_url,
            api_username: env_opt("VCC_API_USERNAME"),
            api_password: env_opt("VCC_API_PASSWORD"),
            ipfs_gateway_url: env_url("VCC_IPFS_GATEWAY_URL", DEFAULT_IPFS_GATEWAY_URL)?,
            issuer_name: env_opt("VCC_ISSUER_NAME"),
            timeout_secs: std::env::var("VCC_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Configuration pointing at a single local server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?;
        Ok(Self {
            api_url: url.clone(),
            api_username: None,
            api_password: None,
            ipfs_gateway_url: url,
            issuer_name: None,
            timeout_secs: 5,
        })
    }

    /// Rewrite `ipfs://<cid>[/path]` into `<gateway>/ipfs/<cid>[/path]`.
    ///
    /// Any other URL is parsed and returned unchanged.
    pub fn resolve_document_url(&self, raw: &str) -> Result<Url, ConfigError> {
        match raw.strip_prefix("ipfs://") {
            Some(rest) => {
                let base = self.ipfs_gateway_url.as_str().trim_end_matches('/');
                let joined = format!("{base}/ipfs/{rest}");
                Url::parse(&joined).map_err(|e| ConfigError::InvalidUrl(joined, e.to_string()))
            }
            None => Url::parse(raw)
                .map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string())),
        }
    }
}

fn env_opt(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("VCC_API_URL environment variable is required")]
    MissingApiUrl,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
