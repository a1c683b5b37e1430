//! API routes and handlers
pub mod auth;
pub mod bookmarks;
pub mod profile;
pub mod progress;
pub mod tutorials;

use crate::context::AppContext;
use axum::Router;

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .merge(auth::routes())
        .merge(profile::routes())
        .merge(progress::routes())
        .merge(bookmarks::routes())
        .merge(tutorials::routes())
}
