//! Optimistic local updates
//!
//! Interactive actions update local state before the backing write settles,
//! then either revert on failure or keep the local value and let a later
//! read reconcile. Which of the two applies is the caller's choice per
//! action: a bookmark star must snap back when the write fails, while a
//! progress step stays local so the user is not yanked backwards mid-lesson.

use std::future::Future;

/// What to do with the local state when the backing write fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Undo the local change and surface the error
    Revert,
    /// Keep the local change, log, and report success
    KeepLocal,
}

/// Apply a local change, run the backing write, and settle per the policy.
///
/// `apply` mutates the local state immediately; `compensate` is its inverse
/// and only runs under `FailurePolicy::Revert` after a failed write.
pub async fn execute<S, E, W, Fut>(
    state: &mut S,
    label: &str,
    policy: FailurePolicy,
    apply: impl FnOnce(&mut S),
    compensate: impl FnOnce(&mut S),
    write: W,
) -> Result<(), E>
where
    E: std::fmt::Display,
    W: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    apply(state);

    match write().await {
        Ok(()) => Ok(()),
        Err(error) => match policy {
            FailurePolicy::Revert => {
                tracing::warn!("Write failed for {}, reverting: {}", label, error);
                compensate(state);
                Err(error)
            }
            FailurePolicy::KeepLocal => {
                tracing::warn!("Write failed for {}, keeping local state: {}", label, error);
                Ok(())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct ViewState {
        bookmarked: bool,
        current_step: u32,
    }

    #[tokio::test]
    async fn successful_write_keeps_the_local_change() {
        let mut view = ViewState {
            bookmarked: false,
            current_step: 0,
        };

        let result: Result<(), String> = execute(
            &mut view,
            "bookmark toggle",
            FailurePolicy::Revert,
            |v| v.bookmarked = true,
            |v| v.bookmarked = false,
            || async { Ok(()) },
        )
        .await;

        assert!(result.is_ok());
        assert!(view.bookmarked);
    }

    #[tokio::test]
    async fn failed_bookmark_toggle_reverts_the_star() {
        let mut view = ViewState {
            bookmarked: false,
            current_step: 0,
        };

        let result = execute(
            &mut view,
            "bookmark toggle",
            FailurePolicy::Revert,
            |v| v.bookmarked = true,
            |v| v.bookmarked = false,
            || async { Err("connection reset".to_string()) },
        )
        .await;

        assert_eq!(result, Err("connection reset".to_string()));
        assert!(!view.bookmarked);
    }

    #[tokio::test]
    async fn failed_progress_write_keeps_the_local_step() {
        let mut view = ViewState {
            bookmarked: false,
            current_step: 2,
        };

        let result = execute(
            &mut view,
            "progress advance",
            FailurePolicy::KeepLocal,
            |v| v.current_step = 3,
            |v| v.current_step = 2,
            || async { Err("connection reset".to_string()) },
        )
        .await;

        assert_eq!(result, Ok(()));
        assert_eq!(view.current_step, 3);
    }
}
