//! # Task Slots — Latest-Request-Wins Ownership
//!
//! A [`TaskSlot`] owns one [`AsyncTask`] and the cancellation token of the
//! request currently allowed to resolve it. Issuing a new request cancels
//! the previous token, so a slow response to a superseded request can
//! never overwrite newer state. The same mechanism handles teardown:
//! [`TaskSlot::abort`] cancels the in-flight request and its eventual
//! resolution is ignored.
//!
//! ```
//! use vcc_core::AppError;
//! use vcc_state::{Resolution, TaskSlot};
//!
//! let mut slot = TaskSlot::new("schema");
//! let stale = slot.begin();
//! let fresh = slot.begin();
//!
//! assert_eq!(slot.resolve(stale, Ok(1)).unwrap(), Resolution::Ignored);
//! assert_eq!(slot.resolve(fresh, Ok::<_, AppError>(2)).unwrap(), Resolution::Applied);
//! assert_eq!(slot.task().data(), Some(&2));
//! ```

use std::future::Future;

use tokio_util::sync::CancellationToken;

use vcc_core::AppError;

use crate::task::{AsyncTask, TaskError};
use crate::ApiResult;

/// Permission to resolve a [`TaskSlot`], handed out by [`TaskSlot::begin`].
///
/// The ticket's token is cancelled when the request is superseded or
/// aborted. Pass [`RequestTicket::token`] to the request so the transport
/// stops early too.
#[derive(Debug)]
pub struct RequestTicket {
    token: CancellationToken,
}

impl RequestTicket {
    /// The cancellation token of this request.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Whether the request was superseded or aborted.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Outcome of [`TaskSlot::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result was written to the task.
    Applied,
    /// The request had been cancelled; the task is unchanged.
    Ignored,
}

/// One [`AsyncTask`] plus the token of its latest request.
#[derive(Debug)]
pub struct TaskSlot<T> {
    label: String,
    task: AsyncTask<T>,
    current: Option<CancellationToken>,
}

impl<T> TaskSlot<T> {
    /// Create an idle slot. `label` names the slot in logs.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            task: AsyncTask::Pending,
            current: None,
        }
    }

    /// The slot's name in logs.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The current task state.
    pub fn task(&self) -> &AsyncTask<T> {
        &self.task
    }

    /// Consume the slot, returning its task.
    pub fn into_task(mut self) -> AsyncTask<T> {
        std::mem::take(&mut self.task)
    }

    /// Issue a new request, cancelling any request still in flight.
    pub fn begin(&mut self) -> RequestTicket {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
        let status = self.task.begin();
        tracing::debug!(slot = %self.label, %status, "request issued");

        let token = CancellationToken::new();
        self.current = Some(token.clone());
        RequestTicket { token }
    }

    /// Apply the result of the request identified by `ticket`.
    ///
    /// The result is ignored if the request was superseded or aborted, or
    /// if the result itself is a cancellation.
    ///
    /// # Errors
    ///
    /// Propagates [`TaskError`] from the underlying transition.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: ApiResult<T>,
    ) -> Result<Resolution, TaskError> {
        if ticket.is_cancelled() {
            tracing::debug!(slot = %self.label, "ignoring result of cancelled request");
            return Ok(Resolution::Ignored);
        }
        match result {
            Ok(data) => self.task.succeed(data)?,
            Err(error) if error.is_cancellation() => {
                tracing::debug!(slot = %self.label, "ignoring cancellation");
                return Ok(Resolution::Ignored);
            }
            Err(error) => {
                tracing::warn!(slot = %self.label, kind = %error.kind(), %error, "request failed");
                self.task.fail(error)?;
            }
        }
        self.current = None;
        Ok(Resolution::Applied)
    }

    /// Cancel the in-flight request, if any. The task keeps its state.
    pub fn abort(&mut self) {
        if let Some(token) = self.current.take() {
            tracing::debug!(slot = %self.label, "request aborted");
            token.cancel();
        }
    }

    /// Issue a request and drive `request` to completion in one step.
    ///
    /// `request` receives the request's cancellation token. Intended for
    /// callers that own the slot for the whole request; callers that need
    /// to abort concurrently use [`TaskSlot::begin`] and
    /// [`TaskSlot::resolve`] directly.
    ///
    /// # Errors
    ///
    /// Propagates [`TaskError`] from the underlying transition.
    pub async fn run<F, Fut>(&mut self, request: F) -> Result<Resolution, TaskError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let ticket = self.begin();
        let token = ticket.token();
        let result = run_cancellable(&token, request(token.clone())).await;
        self.resolve(ticket, result)
    }
}

impl<T> Drop for TaskSlot<T> {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Race `future` against `token`.
///
/// Yields [`AppError::Cancel`] as soon as the token is cancelled; the
/// future is dropped at that point.
pub async fn run_cancellable<T, F>(token: &CancellationToken, future: F) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => Err(AppError::Cancel),
        result = future => result,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
