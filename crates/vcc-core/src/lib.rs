//! # vcc-core — Foundational Types for the Credentials Console
//!
//! This crate is the leaf of the workspace DAG. It defines the vocabulary
//! every other `vcc-*` crate speaks when something goes wrong or when a
//! credential type has to be named.
//!
//! ## Key Design Principles
//!
//! 1. **One error taxonomy.** [`AppError`] is the single user-facing error
//!    type. Every failure produced by a data-fetching path is converted into
//!    it at the call boundary via [`build_app_error`]; nothing escapes to the
//!    rendering layer as an unstructured error.
//!
//! 2. **Cancellation is not a failure.** [`AppError::Cancel`] exists so the
//!    caller can recognize an aborted request and drop it. It must never be
//!    surfaced to the user.
//!
//! 3. **Validation issues keep their shape.** [`ValidationIssues`] preserves
//!    union branches as nested issue lists and flattens them only when a
//!    message is rendered, so every violating path is reported.
//!
//! 4. **Configuration is explicit.** [`ConsoleConfig`] is loaded once and
//!    passed by reference. There is no global mutable environment.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vcc-*` crates.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod jsonld;
pub mod validation;

pub use config::{ConfigError, ConsoleConfig};
pub use error::{
    build_app_error, AppError, AppErrorKind, Cancelled, CustomError, HttpFailure, NonErrorValue,
};
pub use jsonld::JsonLdType;
pub use validation::{ValidationIssue, ValidationIssues, Violation};
