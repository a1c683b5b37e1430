//! Profile and preference endpoints
use crate::{
    auth::{ProfileUpdate, UserView},
    context::AppContext,
    error::{AppError, AppResult},
    preferences::Preferences,
};
use axum::{
    extract::{Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Build profile routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/auth/profile", get(get_profile).put(update_profile))
        .route("/api/auth/preferences", put(update_preferences))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileQuery {
    #[serde(default)]
    user_id: String,
}

#[derive(Debug, Serialize)]
struct ProfileResponse {
    user: UserView,
    preferences: Preferences,
}

async fn get_profile(
    State(ctx): State<AppContext>,
    Query(query): Query<ProfileQuery>,
) -> AppResult<Json<ProfileResponse>> {
    let user_id = require_user_id(&query.user_id)?;
    let (user, preferences) = ctx.auth.get_profile(user_id).await?;

    Ok(Json(ProfileResponse { user, preferences }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest {
    #[serde(default)]
    user_id: String,
    #[serde(flatten)]
    update: ProfileUpdate,
}

#[derive(Debug, Serialize)]
struct UpdateProfileResponse {
    message: String,
    user: UserView,
}

async fn update_profile(
    State(ctx): State<AppContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<Json<UpdateProfileResponse>> {
    let user_id = require_user_id(&req.user_id)?;

    tracing::info!("update_profile: Updating profile for user: {}", user_id);
    let user = ctx.auth.update_profile(user_id, req.update).await?;

    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
        user,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePreferencesRequest {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    preferences: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct UpdatePreferencesResponse {
    message: String,
    preferences: Preferences,
}

async fn update_preferences(
    State(ctx): State<AppContext>,
    Json(req): Json<UpdatePreferencesRequest>,
) -> AppResult<Json<UpdatePreferencesResponse>> {
    let user_id = require_user_id(&req.user_id)?;

    // Unknown options are dropped and missing ones filled with defaults,
    // so an older client can never write a mapping a newer one cannot read
    let preferences = Preferences::from_value(req.preferences);
    let preferences = ctx.auth.update_preferences(user_id, preferences).await?;

    Ok(Json(UpdatePreferencesResponse {
        message: "Preferences updated successfully".to_string(),
        preferences,
    }))
}

pub(super) fn require_user_id(user_id: &str) -> AppResult<&str> {
    if user_id.is_empty() {
        return Err(AppError::Validation("User ID is required".to_string()));
    }
    Ok(user_id)
}
