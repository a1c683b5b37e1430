//! Tutorial catalog
//!
//! Immutable reference data describing platform skills as ordered step
//! sequences. The database table is the single source of truth; the in-code
//! tables in `seed` exist only to populate an empty catalog and for tests.

pub mod seed;

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

/// Closed difficulty enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// One unit of instruction within a tutorial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: u32,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Estimated duration in minutes
    pub duration: u32,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// A complete tutorial with its ordered steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub platform: String,
    pub difficulty: Difficulty,
    /// Estimated duration in minutes
    pub estimated_time: u32,
    pub steps: Vec<Step>,
}

/// Listing filters; all are optional and combined with AND.
/// Text matching is case-insensitive substring, tags are case-insensitive
/// equality. No ranking.
#[derive(Debug, Clone, Default)]
pub struct TutorialFilter {
    pub query: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub platform: Option<String>,
}

impl TutorialFilter {
    pub fn matches(&self, tutorial: &Tutorial) -> bool {
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let in_title = tutorial.title.to_lowercase().contains(&needle);
            let in_description = tutorial.description.to_lowercase().contains(&needle);
            if !in_title && !in_description {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !tutorial.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(difficulty) = &self.difficulty {
            if !tutorial.difficulty.as_str().eq_ignore_ascii_case(difficulty) {
                return false;
            }
        }
        if let Some(platform) = &self.platform {
            if !tutorial.platform.eq_ignore_ascii_case(platform) {
                return false;
            }
        }
        true
    }
}

/// Read-only catalog over the tutorial table
pub struct TutorialCatalog {
    db: SqlitePool,
}

impl TutorialCatalog {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Fetch one tutorial with its steps
    pub async fn get(&self, tutorial_id: &str) -> AppResult<Tutorial> {
        let row = sqlx::query(
            "SELECT id, title, description, category, platform, difficulty, estimated_time, steps
             FROM tutorial WHERE id = ?1",
        )
        .bind(tutorial_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tutorial not found".to_string()))?;

        tutorial_from_row(&row)
    }

    /// List all tutorials, applying the filter in memory.
    /// The catalog is small, fixed reference data; no pagination.
    pub async fn list(&self, filter: &TutorialFilter) -> AppResult<Vec<Tutorial>> {
        let rows = sqlx::query(
            "SELECT id, title, description, category, platform, difficulty, estimated_time, steps
             FROM tutorial ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        let mut tutorials = Vec::with_capacity(rows.len());
        for row in &rows {
            let tutorial = tutorial_from_row(row)?;
            if filter.matches(&tutorial) {
                tutorials.push(tutorial);
            }
        }

        Ok(tutorials)
    }

    /// Populate an empty catalog from the seed fixtures.
    /// Returns the number of tutorials inserted (0 when already populated).
    pub async fn seed_if_empty(&self) -> AppResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tutorial")
            .fetch_one(&self.db)
            .await?;

        if count > 0 {
            return Ok(0);
        }

        let fixtures = seed::tutorials();
        for tutorial in &fixtures {
            self.insert(tutorial).await?;
        }

        Ok(fixtures.len())
    }

    async fn insert(&self, tutorial: &Tutorial) -> AppResult<()> {
        let steps = serde_json::to_string(&tutorial.steps)
            .map_err(|e| AppError::Internal(format!("Step serialization failed: {}", e)))?;

        sqlx::query(
            "INSERT INTO tutorial (id, title, description, category, platform, difficulty, estimated_time, steps)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&tutorial.id)
        .bind(&tutorial.title)
        .bind(&tutorial.description)
        .bind(&tutorial.category)
        .bind(&tutorial.platform)
        .bind(tutorial.difficulty.as_str())
        .bind(tutorial.estimated_time as i64)
        .bind(steps)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

fn tutorial_from_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<Tutorial> {
    let difficulty_raw: String = row.get("difficulty");
    let difficulty = match difficulty_raw.as_str() {
        "beginner" => Difficulty::Beginner,
        "intermediate" => Difficulty::Intermediate,
        "advanced" => Difficulty::Advanced,
        other => {
            return Err(AppError::Internal(format!(
                "Unknown difficulty in catalog: {}",
                other
            )))
        }
    };

    let steps_raw: String = row.get("steps");
    let steps: Vec<Step> = serde_json::from_str(&steps_raw)
        .map_err(|e| AppError::Internal(format!("Corrupt step data in catalog: {}", e)))?;

    let estimated_time: i64 = row.get("estimated_time");

    Ok(Tutorial {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category: row.get("category"),
        platform: row.get("platform"),
        difficulty,
        estimated_time: estimated_time as u32,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn catalog() -> TutorialCatalog {
        let catalog = TutorialCatalog::new(crate::db::memory_pool().await);
        catalog.seed_if_empty().await.unwrap();
        catalog
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let catalog = catalog().await;
        assert_eq!(catalog.seed_if_empty().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn get_returns_steps_in_order() {
        let catalog = catalog().await;
        let tutorial = catalog.get("2").await.unwrap();

        assert_eq!(tutorial.platform, "whatsapp");
        assert_eq!(tutorial.steps.len(), 5);
        let ids: Vec<u32> = tutorial.steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let catalog = catalog().await;
        assert!(matches!(
            catalog.get("999").await,
            Err(crate::error::AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_without_filter_returns_everything() {
        let catalog = catalog().await;
        let all = catalog.list(&TutorialFilter::default()).await.unwrap();
        assert_eq!(all.len(), seed::tutorials().len());
    }

    #[tokio::test]
    async fn text_filter_is_case_insensitive_substring() {
        let catalog = catalog().await;
        let filter = TutorialFilter {
            query: Some("PHOTOS".to_string()),
            ..Default::default()
        };
        let matched = catalog.list(&filter).await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].platform, "whatsapp");
    }

    #[tokio::test]
    async fn tag_filters_are_equality() {
        let catalog = catalog().await;

        let filter = TutorialFilter {
            platform: Some("Facebook".to_string()),
            difficulty: Some("beginner".to_string()),
            ..Default::default()
        };
        let matched = catalog.list(&filter).await.unwrap();
        assert!(matched.iter().all(|t| t.platform == "facebook"));
        assert!(!matched.is_empty());

        let filter = TutorialFilter {
            difficulty: Some("advanced".to_string()),
            ..Default::default()
        };
        assert!(catalog.list(&filter).await.unwrap().is_empty());
    }
}
