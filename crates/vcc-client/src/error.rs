//! Client error types.

use vcc_core::{AppError, ConfigError, HttpFailure};
use vcc_schema::SchemaError;

/// Errors from console HTTP calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },
    /// The server returned a non-2xx status.
    #[error("{url} returned {failure}")]
    Status {
        url: String,
        failure: HttpFailure,
    },
    /// The response body is not the expected JSON.
    #[error("failed to deserialize response from {url}: {source}")]
    Deserialization {
        url: String,
        source: reqwest::Error,
    },
    /// The fetched document is not a usable schema or context.
    #[error("unusable document at {url}: {source}")]
    Document {
        url: String,
        source: SchemaError,
    },
    /// The request was cancelled before it completed.
    #[error("request to {url} cancelled")]
    Cancelled { url: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<ClientError> for AppError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Cancelled { .. } => AppError::Cancel,
            ClientError::Status { failure, .. } => AppError::from(failure),
            ClientError::Http { source, .. } => AppError::Request {
                status: source.status().map(|s| s.as_u16()),
                message: source.to_string(),
            },
            other => AppError::General {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_request_error() {
        let err = ClientError::Status {
            url: "https://schemas.example/kyc.json".into(),
            failure: HttpFailure {
                status: Some(404),
                message: "Not Found".into(),
            },
        };
        let app = AppError::from(err);
        assert_eq!(app.kind().as_str(), "request-error");
        assert_eq!(app.status(), Some(404));
    }

    #[test]
    fn test_cancellation_maps_to_cancel() {
        let app = AppError::from(ClientError::Cancelled {
            url: "https://schemas.example/kyc.json".into(),
        });
        assert!(app.is_cancellation());
    }

    #[test]
    fn test_document_error_is_general() {
        let app = AppError::from(ClientError::Document {
            url: "https://schemas.example/ctx.json".into(),
            source: SchemaError::InvalidContext("missing @context".into()),
        });
        assert_eq!(app.kind().as_str(), "general-error");
        assert!(app.to_string().contains("missing @context"));
    }
}
