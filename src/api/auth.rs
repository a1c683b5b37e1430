//! Registration and login endpoints
use crate::{
    auth::{LoginRequest, RegisterRequest, UserView},
    context::AppContext,
    error::AppResult,
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;

/// Build auth routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    message: String,
    user: UserView,
}

async fn register(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    tracing::info!("register: Starting registration for email: {}", req.email);

    let user = ctx.auth.register(req).await?;
    tracing::info!("register: User created with id: {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    tracing::debug!("login: Attempting login");

    let user = ctx.auth.login(req).await?;
    tracing::info!("login: Successful login for user: {}", user.id);

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user,
    }))
}
