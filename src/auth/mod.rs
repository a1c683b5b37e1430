//! Account management
//!
//! Handles user registration, login, profile edits, and preference upserts.
//! This is the only module that reads or writes the user tables.

mod password;
mod service;

pub use password::{hash_password, verify_password};
pub use service::AuthService;

use crate::db::models::UserRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request
///
/// Required string fields default to empty so a missing field surfaces as a
/// 400 validation error instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    pub phone: Option<String>,
    pub birth_year: Option<i64>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Partial profile update; absent fields keep their stored values.
/// There is no credential path here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_photo: Option<String>,
}

/// Client-facing user view with the credential field stripped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub birth_year: Option<i64>,
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserView {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            name: record.name,
            phone: record.phone,
            birth_year: record.birth_year,
            profile_photo: record.profile_photo,
            created_at: record.created_at,
        }
    }
}
