//! Bookmark endpoints
use crate::{
    api::profile::require_user_id,
    context::AppContext,
    error::{AppError, AppResult},
};
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

/// Build bookmark routes
pub fn routes() -> Router<AppContext> {
    Router::new().route("/api/bookmarks", post(add_bookmark).delete(remove_bookmark))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookmarkRequest {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    tutorial_id: String,
}

#[derive(Debug, Serialize)]
struct BookmarkResponse {
    bookmarked: bool,
}

async fn add_bookmark(
    State(ctx): State<AppContext>,
    Json(req): Json<BookmarkRequest>,
) -> AppResult<Json<BookmarkResponse>> {
    let user_id = validate(&req)?;

    // Adding resolves the tutorial so a stale client cannot save a ghost
    ctx.catalog.get(&req.tutorial_id).await?;
    ctx.bookmarks.add(user_id, &req.tutorial_id).await?;

    Ok(Json(BookmarkResponse { bookmarked: true }))
}

async fn remove_bookmark(
    State(ctx): State<AppContext>,
    Json(req): Json<BookmarkRequest>,
) -> AppResult<Json<BookmarkResponse>> {
    let user_id = validate(&req)?;
    ctx.bookmarks.remove(user_id, &req.tutorial_id).await?;

    Ok(Json(BookmarkResponse { bookmarked: false }))
}

fn validate(req: &BookmarkRequest) -> AppResult<&str> {
    let user_id = require_user_id(&req.user_id)?;
    if req.tutorial_id.is_empty() {
        return Err(AppError::Validation("Tutorial ID is required".to_string()));
    }
    Ok(user_id)
}
