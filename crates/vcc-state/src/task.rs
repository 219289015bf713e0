//! # Async Task — Request Lifecycle State Machine
//!
//! Every piece of remote data shown by the console lives in an
//! [`AsyncTask`]:
//!
//! ```text
//! Pending ──begin──▶ Loading ──succeed──▶ Successful ──begin──▶ Reloading
//!                      │  ▲                   ▲                    │
//!                    fail begin               └──────succeed───────┤
//!                      ▼  │                                        │
//!                     Failed ◀──────────────────fail───────────────┘
//! ```
//!
//! `Reloading` keeps the previous data visible while a refetch is in
//! flight. There is no cancelled state: an aborted request is simply never
//! resolved, and [`AsyncTask::fail`] refuses cancellation errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vcc_core::AppError;

/// The lifecycle of one piece of remote data.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncTask<T> {
    /// No request has been issued yet.
    Pending,
    /// First request in flight; no data to show.
    Loading,
    /// Refetch in flight; the previous data is still shown.
    Reloading { data: T },
    /// The latest request succeeded.
    Successful { data: T },
    /// The latest request failed.
    Failed { error: AppError },
}

/// Data-free tag of an [`AsyncTask`] state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Loading,
    Reloading,
    Successful,
    Failed,
}

impl TaskStatus {
    /// Lowercase name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Loading => "loading",
            Self::Reloading => "reloading",
            Self::Successful => "successful",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from [`AsyncTask`] transitions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskError {
    /// The transition is not valid from the current state.
    #[error("invalid task transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: TaskStatus,
        /// Attempted target state.
        to: TaskStatus,
    },

    /// A cancellation was offered as a failure.
    #[error("a cancelled request cannot fail a task")]
    CancellationNotAFailure,
}

impl<T> Default for AsyncTask<T> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<T> AsyncTask<T> {
    /// The data-free status tag.
    pub fn status(&self) -> TaskStatus {
        match self {
            Self::Pending => TaskStatus::Pending,
            Self::Loading => TaskStatus::Loading,
            Self::Reloading { .. } => TaskStatus::Reloading,
            Self::Successful { .. } => TaskStatus::Successful,
            Self::Failed { .. } => TaskStatus::Failed,
        }
    }

    /// `true` for `Successful` and `Reloading`.
    pub fn has_data(&self) -> bool {
        matches!(self, Self::Successful { .. } | Self::Reloading { .. })
    }

    /// `true` for `Pending` and `Loading`: nothing to show yet.
    pub fn is_starting(&self) -> bool {
        matches!(self, Self::Pending | Self::Loading)
    }

    /// `true` for `Failed`.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// `true` while a request is in flight.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Loading | Self::Reloading { .. })
    }

    /// The current data, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Reloading { data } | Self::Successful { data } => Some(data),
            _ => None,
        }
    }

    /// Consume the task, returning its data if any.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Reloading { data } | Self::Successful { data } => Some(data),
            _ => None,
        }
    }

    /// The failure, if the task failed.
    pub fn error(&self) -> Option<&AppError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Issue (or re-issue) a request.
    ///
    /// Tasks holding data move to `Reloading` and keep it; all others move
    /// to `Loading`. Always valid: the newer request supersedes any
    /// request already in flight.
    pub fn begin(&mut self) -> TaskStatus {
        *self = match std::mem::take(self) {
            Self::Successful { data } | Self::Reloading { data } => Self::Reloading { data },
            Self::Pending | Self::Loading | Self::Failed { .. } => Self::Loading,
        };
        self.status()
    }

    /// Resolve the in-flight request with data.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidTransition`] unless a request is in
    /// flight.
    pub fn succeed(&mut self, data: T) -> Result<(), TaskError> {
        self.require_in_flight(TaskStatus::Successful)?;
        *self = Self::Successful { data };
        Ok(())
    }

    /// Resolve the in-flight request with a failure. Any data held while
    /// reloading is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::CancellationNotAFailure`] for
    /// [`AppError::Cancel`], and [`TaskError::InvalidTransition`] unless a
    /// request is in flight.
    pub fn fail(&mut self, error: AppError) -> Result<(), TaskError> {
        if error.is_cancellation() {
            return Err(TaskError::CancellationNotAFailure);
        }
        self.require_in_flight(TaskStatus::Failed)?;
        *self = Self::Failed { error };
        Ok(())
    }

    /// Map the data, keeping the state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AsyncTask<U> {
        match self {
            Self::Pending => AsyncTask::Pending,
            Self::Loading => AsyncTask::Loading,
            Self::Reloading { data } => AsyncTask::Reloading { data: f(data) },
            Self::Successful { data } => AsyncTask::Successful { data: f(data) },
            Self::Failed { error } => AsyncTask::Failed { error },
        }
    }

    fn require_in_flight(&self, to: TaskStatus) -> Result<(), TaskError> {
        if self.is_in_flight() {
            Ok(())
        } else {
            Err(TaskError::InvalidTransition {
                from: self.status(),
                to,
            })
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn successful(data: u32) -> AsyncTask<u32> {
        let mut t = AsyncTask::Pending;
        t.begin();
        t.succeed(data).unwrap();
        t
    }

    // ── Predicates ───────────────────────────────────────────────────

    #[test]
    fn test_reloading_has_data_and_is_not_starting() {
        let t = AsyncTask::Reloading { data: 1u32 };
        assert!(t.has_data());
        assert!(!t.is_starting());
        assert!(!t.is_failed());
        assert_eq!(t.data(), Some(&1));
    }

    #[test]
    fn test_loading_is_starting_without_data() {
        let t: AsyncTask<u32> = AsyncTask::Loading;
        assert!(t.is_starting());
        assert!(!t.has_data());
        assert!(t.data().is_none());
    }

    #[test]
    fn test_pending_and_failed_predicates() {
        let p: AsyncTask<u32> = AsyncTask::default();
        assert!(p.is_starting());
        assert!(!p.is_in_flight());

        let f: AsyncTask<u32> = AsyncTask::Failed {
            error: AppError::Custom("boom".into()),
        };
        assert!(f.is_failed());
        assert!(!f.has_data());
        assert!(!f.is_starting());
        assert_eq!(f.error(), Some(&AppError::Custom("boom".into())));
    }

    // ── Transitions ──────────────────────────────────────────────────

    #[test]
    fn test_first_fetch_then_refetch() {
        let mut t = successful(7);
        assert_eq!(t.begin(), TaskStatus::Reloading);
        assert_eq!(t.data(), Some(&7));
        t.succeed(8).unwrap();
        assert_eq!(t, AsyncTask::Successful { data: 8 });
    }

    #[test]
    fn test_failed_reissues_as_loading() {
        let mut t: AsyncTask<u32> = AsyncTask::Pending;
        t.begin();
        t.fail(AppError::General { message: "down".into() }).unwrap();
        assert_eq!(t.begin(), TaskStatus::Loading);
    }

    #[test]
    fn test_reload_failure_drops_data() {
        let mut t = successful(1);
        t.begin();
        t.fail(AppError::Custom("x".into())).unwrap();
        assert!(t.is_failed());
        assert!(t.data().is_none());
    }

    #[test]
    fn test_resolve_without_request_is_rejected() {
        let mut t: AsyncTask<u32> = AsyncTask::Pending;
        assert_eq!(
            t.succeed(1),
            Err(TaskError::InvalidTransition {
                from: TaskStatus::Pending,
                to: TaskStatus::Successful,
            })
        );

        let mut s = successful(1);
        let err = s.fail(AppError::Custom("late".into())).unwrap_err();
        assert_eq!(err.to_string(), "invalid task transition: successful -> failed");
    }

    #[test]
    fn test_cancellation_never_fails_a_task() {
        let mut t: AsyncTask<u32> = AsyncTask::Pending;
        t.begin();
        assert_eq!(t.fail(AppError::Cancel), Err(TaskError::CancellationNotAFailure));
        assert_eq!(t.status(), TaskStatus::Loading);
    }

    #[test]
    fn test_map_keeps_state() {
        let t = AsyncTask::Reloading { data: 3u32 };
        let mapped = t.map(|d| d * 2);
        assert_eq!(mapped.status(), TaskStatus::Reloading);
        assert_eq!(mapped.into_data(), Some(6));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(TaskStatus::Reloading).unwrap();
        assert_eq!(json, serde_json::json!("reloading"));
    }
}
