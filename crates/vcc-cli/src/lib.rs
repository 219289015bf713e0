//! # vcc-cli — Credentials Console Command-Line Interface
//!
//! Exposes the console's schema tooling without a browser: the same
//! attribute trees, value overlays and schema identifiers the console
//! renders, printed as JSON.
//!
//! ## Subcommands
//!
//! - `hash` — schema hash and BigInt of a JSON-LD type `@id`
//! - `attributes` — attribute tree of a JSON Schema
//! - `values` — credential data validated and overlaid on a schema
//! - `types` — credential types declared by a JSON-LD context
//! - `fetch` — fetch a remote document (uses `VCC_*` configuration)
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in the `*Args` structs; handlers delegate to
//!   the domain crates.
//! - Handlers return `anyhow::Result<serde_json::Value>`; the binary prints
//!   the value and classifies failures with `build_app_error`.

pub mod attributes;
pub mod fetch;
pub mod hash;
pub mod input;
pub mod types;
pub mod values;
