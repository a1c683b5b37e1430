//! Progress endpoints
use crate::{
    api::profile::require_user_id,
    context::AppContext,
    error::{AppError, AppResult},
    progress::ProgressView,
};
use axum::{
    extract::{Query, State},
    routing::put,
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Build progress routes
pub fn routes() -> Router<AppContext> {
    Router::new().route("/api/progress", put(record_progress).get(list_progress))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordProgressRequest {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    tutorial_id: String,
    current_step: Option<u32>,
    completed: Option<bool>,
}

#[derive(Debug, Serialize)]
struct RecordProgressResponse {
    message: String,
    progress: ProgressView,
}

/// Record a step advance or an explicit completion.
/// The tutorial must exist; its step count bounds completion detection.
async fn record_progress(
    State(ctx): State<AppContext>,
    Json(req): Json<RecordProgressRequest>,
) -> AppResult<Json<RecordProgressResponse>> {
    let user_id = require_user_id(&req.user_id)?;
    if req.tutorial_id.is_empty() {
        return Err(AppError::Validation("Tutorial ID is required".to_string()));
    }

    // Resolve the tutorial first so unknown ids are a 404, not a dangling row
    let tutorial = ctx.catalog.get(&req.tutorial_id).await?;
    let step_count = tutorial.steps.len();

    let progress = if req.completed == Some(true) {
        ctx.progress
            .mark_complete(user_id, &req.tutorial_id, step_count)
            .await?
    } else if let Some(step) = req.current_step {
        ctx.progress
            .advance(user_id, &req.tutorial_id, step, step_count)
            .await?
    } else {
        return Err(AppError::Validation(
            "Current step or completed is required".to_string(),
        ));
    };

    tracing::debug!(
        "record_progress: user {} tutorial {} at step {}",
        user_id,
        progress.tutorial_id,
        progress.current_step
    );

    Ok(Json(RecordProgressResponse {
        message: "Progress saved successfully".to_string(),
        progress,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListProgressQuery {
    #[serde(default)]
    user_id: String,
}

#[derive(Debug, Serialize)]
struct ListProgressResponse {
    progress: Vec<ProgressView>,
}

async fn list_progress(
    State(ctx): State<AppContext>,
    Query(query): Query<ListProgressQuery>,
) -> AppResult<Json<ListProgressResponse>> {
    let user_id = require_user_id(&query.user_id)?;
    let progress = ctx.progress.list_for_user(user_id).await?;

    Ok(Json(ListProgressResponse { progress }))
}
