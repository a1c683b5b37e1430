//! Database row records
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User record in the database
///
/// Carries the password hash; never serialize this directly into a response.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub birth_year: Option<i64>,
    /// Encoded image payload, treated as opaque text
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-user preferences row; the blob column holds the serialized
/// accessibility options mapping
#[derive(Debug, Clone, FromRow)]
pub struct PreferenceRecord {
    pub user_id: String,
    pub preferences: String,
    pub updated_at: DateTime<Utc>,
}

/// Per (user, tutorial) progress cursor
#[derive(Debug, Clone, FromRow)]
pub struct ProgressRecord {
    pub user_id: String,
    pub tutorial_id: String,
    pub current_step: i64,
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}
