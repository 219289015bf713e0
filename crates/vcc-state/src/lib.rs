//! # vcc-state — Request Lifecycle for Remote Data
//!
//! Console views never hold bare `Result`s. Each piece of remote data is an
//! [`AsyncTask`] owned by a [`TaskSlot`], which tracks the one request
//! allowed to resolve it.
//!
//! - **Task** (`task.rs`): `Pending → Loading → Successful | Failed`, with
//!   `Reloading` keeping stale data visible during a refetch.
//! - **Slot** (`slot.rs`): latest-request-wins ownership through
//!   `tokio_util` cancellation tokens. Results of superseded or aborted
//!   requests are ignored, never reported as failures.
//!
//! All data-fetching paths return [`ApiResult`]. [`into_api_result`]
//! converts any `anyhow` failure into the [`AppError`] taxonomy.

pub mod slot;
pub mod task;

pub use slot::{run_cancellable, RequestTicket, Resolution, TaskSlot};
pub use task::{AsyncTask, TaskError, TaskStatus};

use vcc_core::{build_app_error, AppError};

/// Result of a console data-fetching operation.
pub type ApiResult<T> = Result<T, AppError>;

/// Classify the failure of `result` with [`build_app_error`].
pub fn into_api_result<T>(result: anyhow::Result<T>) -> ApiResult<T> {
    result.map_err(build_app_error)
}
