//! Tutorial progress tracking
//!
//! One record per (user, tutorial), created lazily on first interaction.
//! Advancing is a monotonic max so a stale or duplicated write can never
//! move the cursor backwards, which closes the double-click and two-tab
//! races. Only an explicit restart flow could regress a cursor, and no such
//! flow exists.

use crate::db::models::ProgressRecord;
use crate::error::AppResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Client-facing progress view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub tutorial_id: String,
    pub current_step: u32,
    pub completed: bool,
}

impl ProgressView {
    /// The not-started default; absence of a record is not an error
    pub fn not_started(tutorial_id: &str) -> Self {
        Self {
            tutorial_id: tutorial_id.to_string(),
            current_step: 0,
            completed: false,
        }
    }
}

impl From<ProgressRecord> for ProgressView {
    fn from(record: ProgressRecord) -> Self {
        Self {
            tutorial_id: record.tutorial_id,
            current_step: record.current_step as u32,
            completed: record.completed,
        }
    }
}

/// Progress tracker over the progress table
pub struct ProgressTracker {
    db: SqlitePool,
}

impl ProgressTracker {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Fetch the stored record, or the not-started default
    pub async fn get(&self, user_id: &str, tutorial_id: &str) -> AppResult<ProgressView> {
        let record = sqlx::query_as::<_, ProgressRecord>(
            "SELECT user_id, tutorial_id, current_step, completed, updated_at FROM progress
             WHERE user_id = ?1 AND tutorial_id = ?2",
        )
        .bind(user_id)
        .bind(tutorial_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(record
            .map(ProgressView::from)
            .unwrap_or_else(|| ProgressView::not_started(tutorial_id)))
    }

    /// Store a step advance. The cursor only moves forward: the upsert takes
    /// the max of the stored and incoming step, and completion latches on.
    /// Reaching or passing the last step marks the tutorial complete.
    pub async fn advance(
        &self,
        user_id: &str,
        tutorial_id: &str,
        new_step: u32,
        step_count: usize,
    ) -> AppResult<ProgressView> {
        let completed = new_step as usize >= step_count;

        sqlx::query(
            "INSERT INTO progress (user_id, tutorial_id, current_step, completed, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id, tutorial_id) DO UPDATE SET
                 current_step = MAX(progress.current_step, excluded.current_step),
                 completed = progress.completed OR excluded.completed,
                 updated_at = excluded.updated_at",
        )
        .bind(user_id)
        .bind(tutorial_id)
        .bind(new_step as i64)
        .bind(completed)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        self.get(user_id, tutorial_id).await
    }

    /// Set the cursor to the end and mark complete. Idempotent.
    pub async fn mark_complete(
        &self,
        user_id: &str,
        tutorial_id: &str,
        step_count: usize,
    ) -> AppResult<ProgressView> {
        sqlx::query(
            "INSERT INTO progress (user_id, tutorial_id, current_step, completed, updated_at)
             VALUES (?1, ?2, ?3, TRUE, ?4)
             ON CONFLICT(user_id, tutorial_id) DO UPDATE SET
                 current_step = excluded.current_step,
                 completed = TRUE,
                 updated_at = excluded.updated_at",
        )
        .bind(user_id)
        .bind(tutorial_id)
        .bind(step_count as i64)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        self.get(user_id, tutorial_id).await
    }

    /// All progress records for one user, for merging into catalog listings
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<ProgressView>> {
        let records = sqlx::query_as::<_, ProgressRecord>(
            "SELECT user_id, tutorial_id, current_step, completed, updated_at FROM progress
             WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(records.into_iter().map(ProgressView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = "user-1";
    const TUTORIAL: &str = "2";
    const STEPS: usize = 5;

    async fn tracker() -> ProgressTracker {
        ProgressTracker::new(crate::db::memory_pool().await)
    }

    #[tokio::test]
    async fn absence_is_not_started() {
        let tracker = tracker().await;
        let progress = tracker.get(USER, TUTORIAL).await.unwrap();
        assert_eq!(progress, ProgressView::not_started(TUTORIAL));
    }

    #[tokio::test]
    async fn advancing_through_all_steps_completes() {
        let tracker = tracker().await;

        for step in 1..=STEPS as u32 {
            let progress = tracker.advance(USER, TUTORIAL, step, STEPS).await.unwrap();
            assert_eq!(progress.current_step, step);
            assert_eq!(progress.completed, step as usize >= STEPS);
        }
    }

    #[tokio::test]
    async fn next_on_last_step_completes_and_next_again_is_a_noop() {
        let tracker = tracker().await;

        // User sits at step 4 of 5 and clicks Next
        tracker.advance(USER, TUTORIAL, 4, STEPS).await.unwrap();
        let progress = tracker.advance(USER, TUTORIAL, 5, STEPS).await.unwrap();
        assert_eq!(progress.current_step, 5);
        assert!(progress.completed);

        // Clicking Next again changes nothing and still reports completed
        let again = tracker.advance(USER, TUTORIAL, 5, STEPS).await.unwrap();
        assert_eq!(again, progress);
    }

    #[tokio::test]
    async fn lower_step_never_regresses_the_cursor() {
        let tracker = tracker().await;

        tracker.advance(USER, TUTORIAL, 4, STEPS).await.unwrap();
        let progress = tracker.advance(USER, TUTORIAL, 2, STEPS).await.unwrap();
        assert_eq!(progress.current_step, 4);

        // Completion latches even if a stale pre-completion write lands late
        tracker.mark_complete(USER, TUTORIAL, STEPS).await.unwrap();
        let progress = tracker.advance(USER, TUTORIAL, 3, STEPS).await.unwrap();
        assert_eq!(progress.current_step, 5);
        assert!(progress.completed);
    }

    #[tokio::test]
    async fn mark_complete_is_idempotent() {
        let tracker = tracker().await;

        let first = tracker.mark_complete(USER, TUTORIAL, STEPS).await.unwrap();
        let second = tracker.mark_complete(USER, TUTORIAL, STEPS).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.current_step, STEPS as u32);
        assert!(first.completed);
    }

    #[tokio::test]
    async fn completion_implies_cursor_at_or_past_end() {
        let tracker = tracker().await;

        tracker.advance(USER, TUTORIAL, 7, STEPS).await.unwrap();
        let progress = tracker.get(USER, TUTORIAL).await.unwrap();
        assert!(progress.completed);
        assert!(progress.current_step as usize >= STEPS);
    }

    #[tokio::test]
    async fn records_are_scoped_per_tutorial() {
        let tracker = tracker().await;

        tracker.advance(USER, "1", 2, 4).await.unwrap();
        let other = tracker.get(USER, TUTORIAL).await.unwrap();
        assert_eq!(other, ProgressView::not_started(TUTORIAL));

        let all = tracker.list_for_user(USER).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].tutorial_id, "1");
    }
}
