//! Handlers for the public root and the authenticated pages.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::auth::current_session;
use crate::db;
use crate::error::AppResult;
use crate::models::UserSummary;
use crate::{views, AppState};

/// The root always points at the landing page; the guard bounces anonymous
/// clients from there to the login form.
pub async fn root() -> Redirect {
    Redirect::to("/home")
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match current_session(&headers, &state).await {
        Some(session) => views::home_page(&session.username).into_response(),
        // The guard already passed, but the session can expire in between.
        None => Redirect::to("/login").into_response(),
    }
}

pub async fn profile(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match current_session(&headers, &state).await {
        Some(session) => views::profile_page(&session.username).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

/// List registered users. Sits behind the session guard and returns
/// summaries only, never password hashes.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserSummary>>> {
    let mut conn = state.pool.get().await?;
    let users = db::users::list_all(&mut conn).await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}
