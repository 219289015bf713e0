//! # vcc-client — HTTP Access for the Credentials Console
//!
//! Fetches the public documents that describe credential types (JSON
//! Schemas and JSON-LD contexts) and JSON resources from the issuer
//! backend.
//!
//! Every fetch takes a `tokio_util` cancellation token and races it with
//! [`vcc_state::run_cancellable`], the same helper task slots use. A
//! cancelled fetch yields [`ClientError::Cancelled`], which converts to
//! [`vcc_core::AppError::Cancel`] so task slots drop it silently. Non-2xx
//! responses become [`vcc_core::HttpFailure`] with the best message the
//! body offers.

pub mod client;
pub mod error;

pub use client::{extract_message, ConsoleClient};
pub use error::ClientError;
