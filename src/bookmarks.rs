//! Bookmark set
//!
//! Presence-only markers per (user, tutorial), independent of progress.
//! Add and remove are idempotent so the HTTP POST/DELETE pair and the
//! toggle operation share one implementation.

use crate::error::AppResult;
use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashSet;

/// Bookmark set over the bookmark table
pub struct BookmarkSet {
    db: SqlitePool,
}

impl BookmarkSet {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn is_bookmarked(&self, user_id: &str, tutorial_id: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookmark WHERE user_id = ?1 AND tutorial_id = ?2",
        )
        .bind(user_id)
        .bind(tutorial_id)
        .fetch_one(&self.db)
        .await?;

        Ok(count > 0)
    }

    /// Mark a tutorial as saved; a repeat add is a no-op
    pub async fn add(&self, user_id: &str, tutorial_id: &str) -> AppResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO bookmark (user_id, tutorial_id, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(user_id)
        .bind(tutorial_id)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Remove the marker; removing an absent marker is a no-op
    pub async fn remove(&self, user_id: &str, tutorial_id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM bookmark WHERE user_id = ?1 AND tutorial_id = ?2")
            .bind(user_id)
            .bind(tutorial_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Flip the marker and return the new state
    pub async fn toggle(&self, user_id: &str, tutorial_id: &str) -> AppResult<bool> {
        if self.is_bookmarked(user_id, tutorial_id).await? {
            self.remove(user_id, tutorial_id).await?;
            Ok(false)
        } else {
            self.add(user_id, tutorial_id).await?;
            Ok(true)
        }
    }

    /// All bookmarked tutorial ids for one user
    pub async fn ids_for_user(&self, user_id: &str) -> AppResult<HashSet<String>> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT tutorial_id FROM bookmark WHERE user_id = ?1")
                .bind(user_id)
                .fetch_all(&self.db)
                .await?;

        Ok(ids.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = "user-1";
    const TUTORIAL: &str = "5";

    async fn bookmarks() -> BookmarkSet {
        BookmarkSet::new(crate::db::memory_pool().await)
    }

    #[tokio::test]
    async fn toggle_is_its_own_inverse() {
        let bookmarks = bookmarks().await;

        assert!(!bookmarks.is_bookmarked(USER, TUTORIAL).await.unwrap());
        assert!(bookmarks.toggle(USER, TUTORIAL).await.unwrap());
        assert!(bookmarks.is_bookmarked(USER, TUTORIAL).await.unwrap());
        assert!(!bookmarks.toggle(USER, TUTORIAL).await.unwrap());
        assert!(!bookmarks.is_bookmarked(USER, TUTORIAL).await.unwrap());
    }

    #[tokio::test]
    async fn add_and_remove_are_idempotent() {
        let bookmarks = bookmarks().await;

        bookmarks.add(USER, TUTORIAL).await.unwrap();
        bookmarks.add(USER, TUTORIAL).await.unwrap();
        assert!(bookmarks.is_bookmarked(USER, TUTORIAL).await.unwrap());

        bookmarks.remove(USER, TUTORIAL).await.unwrap();
        bookmarks.remove(USER, TUTORIAL).await.unwrap();
        assert!(!bookmarks.is_bookmarked(USER, TUTORIAL).await.unwrap());
    }

    #[tokio::test]
    async fn bookmarks_are_scoped_per_user() {
        let bookmarks = bookmarks().await;

        bookmarks.add(USER, TUTORIAL).await.unwrap();
        assert!(!bookmarks.is_bookmarked("user-2", TUTORIAL).await.unwrap());

        bookmarks.add(USER, "1").await.unwrap();
        let ids = bookmarks.ids_for_user(USER).await.unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(TUTORIAL));
        assert!(ids.contains("1"));
    }
}
