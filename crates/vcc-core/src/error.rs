//! # Error Types — The Console Error Taxonomy
//!
//! Every data-fetching path in the console resolves to
//! `Result<T, AppError>`. [`build_app_error`] is the one place where an
//! arbitrary failure is classified into the taxonomy:
//!
//! | tag             | variant               | user-facing |
//! |-----------------|-----------------------|-------------|
//! | `cancel-error`  | [`AppError::Cancel`]  | never       |
//! | `parse-error`   | [`AppError::Parse`]   | yes         |
//! | `request-error` | [`AppError::Request`] | yes         |
//! | `general-error` | [`AppError::General`] | yes         |
//! | `unknown-error` | [`AppError::Unknown`] | yes         |
//! | `custom-error`  | [`AppError::Custom`]  | yes         |
//!
//! Callers must check [`AppError::is_cancellation`] before updating state
//! or showing a message. An aborted request is not an error the user did
//! anything about.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationIssues;

// ─── Input Markers ──────────────────────────────────────────────────

/// Raised when an in-flight request is aborted (view unmounted or the
/// request was superseded by a newer one).
#[derive(Error, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[error("request aborted")]
pub struct Cancelled;

/// A transport or HTTP-level failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", request_message(.status, .message))]
pub struct HttpFailure {
    /// HTTP status code, when a response was received at all.
    pub status: Option<u16>,
    /// Message extracted from the server response, or the transport error.
    pub message: String,
}

/// A failure raised by the application itself with a fixed message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CustomError(pub String);

/// A failure whose payload is not an error at all: a bare value that
/// ended up on the error path. Carries a debug rendering of the value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct NonErrorValue(pub String);

fn request_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("request failed with status {code}: {message}"),
        None => format!("request failed: {message}"),
    }
}

// ─── AppError ───────────────────────────────────────────────────────

/// The tag of an [`AppError`], stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppErrorKind {
    CancelError,
    ParseError,
    RequestError,
    GeneralError,
    UnknownError,
    CustomError,
}

impl AppErrorKind {
    /// Returns the tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CancelError => "cancel-error",
            Self::ParseError => "parse-error",
            Self::RequestError => "request-error",
            Self::GeneralError => "general-error",
            Self::UnknownError => "unknown-error",
            Self::CustomError => "custom-error",
        }
    }
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured, user-renderable failure of a console operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The request was aborted. Never shown to the user.
    #[error("request cancelled")]
    Cancel,

    /// The response (or input) failed schema validation.
    #[error("parsing failed:\n{issues}")]
    Parse {
        /// Every violation, union branches included.
        issues: ValidationIssues,
    },

    /// HTTP or transport failure.
    #[error("{}", request_message(.status, .message))]
    Request {
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Best-effort server message.
        message: String,
    },

    /// An unexpected error with a message.
    #[error("{message}")]
    General {
        /// The original error message, including its context chain.
        message: String,
    },

    /// Something that was not an error ended up on the error path.
    #[error("an unknown error occurred: {detail}")]
    Unknown {
        /// Debug rendering of the offending value.
        detail: String,
    },

    /// An application-raised message.
    #[error("{0}")]
    Custom(String),
}

impl AppError {
    /// The stable tag of this error.
    pub fn kind(&self) -> AppErrorKind {
        match self {
            Self::Cancel => AppErrorKind::CancelError,
            Self::Parse { .. } => AppErrorKind::ParseError,
            Self::Request { .. } => AppErrorKind::RequestError,
            Self::General { .. } => AppErrorKind::GeneralError,
            Self::Unknown { .. } => AppErrorKind::UnknownError,
            Self::Custom(_) => AppErrorKind::CustomError,
        }
    }

    /// Whether this error represents an aborted request.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancel)
    }

    /// HTTP status code, for request errors that received a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<Cancelled> for AppError {
    fn from(_: Cancelled) -> Self {
        Self::Cancel
    }
}

impl From<ValidationIssues> for AppError {
    fn from(issues: ValidationIssues) -> Self {
        Self::Parse { issues }
    }
}

impl From<HttpFailure> for AppError {
    fn from(failure: HttpFailure) -> Self {
        Self::Request {
            status: failure.status,
            message: failure.message,
        }
    }
}

impl From<CustomError> for AppError {
    fn from(error: CustomError) -> Self {
        Self::Custom(error.0)
    }
}

/// Classify an arbitrary failure into the [`AppError`] taxonomy.
///
/// The whole cause chain is searched, outermost first, for one of the
/// marker types ([`Cancelled`], [`ValidationIssues`], [`HttpFailure`],
/// [`CustomError`], [`NonErrorValue`]) or an existing [`AppError`].
/// Anything else becomes [`AppError::General`] carrying the full chain
/// rendered as `outer: inner: ...`.
pub fn build_app_error(error: anyhow::Error) -> AppError {
    for cause in error.chain() {
        if let Some(app) = cause.downcast_ref::<AppError>() {
            return app.clone();
        }
        if cause.is::<Cancelled>() {
            return AppError::Cancel;
        }
        if let Some(issues) = cause.downcast_ref::<ValidationIssues>() {
            return AppError::from(issues.clone());
        }
        if let Some(failure) = cause.downcast_ref::<HttpFailure>() {
            return AppError::from(failure.clone());
        }
        if let Some(custom) = cause.downcast_ref::<CustomError>() {
            return AppError::from(custom.clone());
        }
        if let Some(value) = cause.downcast_ref::<NonErrorValue>() {
            return AppError::Unknown {
                detail: value.0.clone(),
            };
        }
    }
    AppError::General {
        message: format!("{error:#}"),
    }
}
