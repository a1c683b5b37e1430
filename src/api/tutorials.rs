//! Tutorial catalog endpoints
//!
//! Listings are read-only catalog data, optionally annotated with the
//! requesting user's progress and bookmarks when a userId is supplied.

use crate::{
    catalog::{Tutorial, TutorialFilter},
    context::AppContext,
    error::AppResult,
    progress::ProgressView,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Build tutorial routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/tutorials", get(list_tutorials))
        .route("/api/tutorials/:id", get(get_tutorial))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TutorialQuery {
    query: Option<String>,
    category: Option<String>,
    difficulty: Option<String>,
    platform: Option<String>,
    user_id: Option<String>,
}

impl TutorialQuery {
    fn filter(&self) -> TutorialFilter {
        TutorialFilter {
            query: self.query.clone(),
            category: self.category.clone(),
            difficulty: self.difficulty.clone(),
            platform: self.platform.clone(),
        }
    }
}

/// A tutorial with the requesting user's state folded in.
/// The per-user fields are omitted entirely for anonymous requests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TutorialWithState {
    #[serde(flatten)]
    tutorial: Tutorial,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<ProgressView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_bookmarked: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ListTutorialsResponse {
    tutorials: Vec<TutorialWithState>,
}

async fn list_tutorials(
    State(ctx): State<AppContext>,
    Query(query): Query<TutorialQuery>,
) -> AppResult<Json<ListTutorialsResponse>> {
    let tutorials = ctx.catalog.list(&query.filter()).await?;

    let tutorials = match query.user_id.as_deref().filter(|id| !id.is_empty()) {
        Some(user_id) => {
            let mut progress: HashMap<String, ProgressView> = ctx
                .progress
                .list_for_user(user_id)
                .await?
                .into_iter()
                .map(|p| (p.tutorial_id.clone(), p))
                .collect();
            let bookmarks = ctx.bookmarks.ids_for_user(user_id).await?;

            tutorials
                .into_iter()
                .map(|tutorial| {
                    let state = progress
                        .remove(&tutorial.id)
                        .unwrap_or_else(|| ProgressView::not_started(&tutorial.id));
                    let is_bookmarked = bookmarks.contains(&tutorial.id);
                    TutorialWithState {
                        tutorial,
                        progress: Some(state),
                        is_bookmarked: Some(is_bookmarked),
                    }
                })
                .collect()
        }
        None => tutorials
            .into_iter()
            .map(|tutorial| TutorialWithState {
                tutorial,
                progress: None,
                is_bookmarked: None,
            })
            .collect(),
    };

    Ok(Json(ListTutorialsResponse { tutorials }))
}

#[derive(Debug, Serialize)]
struct GetTutorialResponse {
    tutorial: TutorialWithState,
}

async fn get_tutorial(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Query(query): Query<TutorialQuery>,
) -> AppResult<Json<GetTutorialResponse>> {
    let tutorial = ctx.catalog.get(&id).await?;

    let tutorial = match query.user_id.as_deref().filter(|id| !id.is_empty()) {
        Some(user_id) => {
            let progress = ctx.progress.get(user_id, &tutorial.id).await?;
            let is_bookmarked = ctx.bookmarks.is_bookmarked(user_id, &tutorial.id).await?;
            TutorialWithState {
                tutorial,
                progress: Some(progress),
                is_bookmarked: Some(is_bookmarked),
            }
        }
        None => TutorialWithState {
            tutorial,
            progress: None,
            is_bookmarked: None,
        },
    };

    Ok(Json(GetTutorialResponse { tutorial }))
}
