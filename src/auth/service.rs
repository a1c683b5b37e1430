//! Auth service implementation using runtime queries

use crate::{
    auth::{password, LoginRequest, ProfileUpdate, RegisterRequest, UserView},
    config::ServerConfig,
    db::models::{PreferenceRecord, UserRecord},
    error::{AppError, AppResult},
    preferences::Preferences,
};
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// A well-formed Argon2id hash that matches no password. Verifying against it
/// keeps the unknown-email and wrong-password login paths the same cost.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$RdescudvJCsgt3ub+b+dWRWJTmaaJObG";

/// Auth service; sole owner of the user and user_preference tables
pub struct AuthService {
    db: SqlitePool,
    config: Arc<ServerConfig>,
}

impl AuthService {
    pub fn new(db: SqlitePool, config: Arc<ServerConfig>) -> Self {
        Self { db, config }
    }

    /// Create a new user together with the default preference row.
    /// Fails with DuplicateEmail when the address is taken in any case form.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<UserView> {
        if req.email.is_empty() || req.name.is_empty() || req.password.is_empty() {
            return Err(AppError::Validation(
                "Email, name, and password are required".to_string(),
            ));
        }

        req.validate()
            .map_err(|_| AppError::Validation("Invalid email address".to_string()))?;

        if req.password.len() < self.config.auth.min_password_length {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                self.config.auth.min_password_length
            )));
        }

        if self.email_exists(&req.email).await? {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = password::hash_password(&req.password)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let default_prefs = Preferences::default();

        // User and preference rows are created together
        let mut tx = self.db.begin().await?;

        sqlx::query(
            "INSERT INTO user (id, email, name, password_hash, phone, birth_year, profile_photo, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7)",
        )
        .bind(&id)
        .bind(&req.email)
        .bind(&req.name)
        .bind(&password_hash)
        .bind(&req.phone)
        .bind(req.birth_year)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        sqlx::query(
            "INSERT INTO user_preference (user_id, preferences, updated_at) VALUES (?1, ?2, ?3)",
        )
        .bind(&id)
        .bind(default_prefs.to_json_string())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("register: created user {}", id);

        Ok(UserView {
            id,
            email: req.email,
            name: req.name,
            phone: req.phone,
            birth_year: req.birth_year,
            profile_photo: None,
            created_at: now,
        })
    }

    /// Verify credentials and return the credential-stripped user.
    /// Unknown email and wrong password yield the same error.
    pub async fn login(&self, req: LoginRequest) -> AppResult<UserView> {
        if req.email.is_empty() || req.password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let user = match self.find_by_email(&req.email).await? {
            Some(user) => user,
            None => {
                // Burn a verification so account existence is not observable by timing
                let _ = password::verify_password(&req.password, DUMMY_HASH);
                return Err(AppError::InvalidCredentials);
            }
        };

        let valid = password::verify_password(&req.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user.into())
    }

    /// Fetch a user and their preferences; a missing or corrupt preference
    /// blob degrades to the default set rather than failing the lookup
    pub async fn get_profile(&self, user_id: &str) -> AppResult<(UserView, Preferences)> {
        let user = self.get_user(user_id).await?;

        let record = sqlx::query_as::<_, PreferenceRecord>(
            "SELECT user_id, preferences, updated_at FROM user_preference WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        let prefs = record
            .map(|r| Preferences::from_json_str(&r.preferences))
            .unwrap_or_default();

        Ok((user.into(), prefs))
    }

    /// Partial update of name/email/phone/photo; absent fields are kept
    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> AppResult<UserView> {
        let current = self.get_user(user_id).await?;

        let name = update.name.unwrap_or(current.name);
        let email = update.email.unwrap_or(current.email);
        let phone = update.phone.or(current.phone);
        let profile_photo = update.profile_photo.or(current.profile_photo);

        if name.is_empty() || email.is_empty() {
            return Err(AppError::Validation(
                "Name and email cannot be empty".to_string(),
            ));
        }

        sqlx::query(
            "UPDATE user SET name = ?1, email = ?2, phone = ?3, profile_photo = ?4 WHERE id = ?5",
        )
        .bind(&name)
        .bind(&email)
        .bind(&phone)
        .bind(&profile_photo)
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(map_unique_violation)?;

        self.get_user(user_id).await.map(UserView::from)
    }

    /// Upsert the preference row, replacing the mapping wholesale
    pub async fn update_preferences(
        &self,
        user_id: &str,
        prefs: Preferences,
    ) -> AppResult<Preferences> {
        // Reject writes for unknown users instead of creating orphan rows
        self.get_user(user_id).await?;

        sqlx::query(
            "INSERT INTO user_preference (user_id, preferences, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET
                 preferences = excluded.preferences,
                 updated_at = excluded.updated_at",
        )
        .bind(user_id)
        .bind(prefs.to_json_string())
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        Ok(prefs)
    }

    /// Get user by id
    async fn get_user(&self, user_id: &str) -> AppResult<UserRecord> {
        sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, name, password_hash, phone, birth_year, profile_photo, created_at
             FROM user WHERE id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Find user by email, case-insensitively
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, name, password_hash, phone, birth_year, profile_photo, created_at
             FROM user WHERE LOWER(email) = LOWER(?1)",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user WHERE LOWER(email) = LOWER(?1)")
                .bind(email)
                .fetch_one(&self.db)
                .await?;

        Ok(count > 0)
    }
}

/// A unique-index violation on the email column means the address is taken
fn map_unique_violation(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::DuplicateEmail,
        _ => AppError::Database(err),
    }
}
