//! Registration, login, and logout handlers.

use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::db::{self, users::InsertOutcome};
use crate::error::{AppError, AppResult};
use crate::{password, views, AppState};

use super::middleware::{
    build_session_cookie, clear_session_cookie, ensure_logged_out, session_token,
};

/// Urlencoded form body shared by register and login.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub async fn register_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Response> {
    ensure_logged_out(&headers, &state, "register").await?;
    Ok(views::register_page(None, false).into_response())
}

/// Create a user record: hash the password, insert the row.
///
/// A taken username and a malformed submission surface as the same generic
/// message; the distinction only matters for the server log.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(creds): Form<Credentials>,
) -> AppResult<Response> {
    ensure_logged_out(&headers, &state, "register").await?;

    let hashed = password::hash_password(&creds.password, state.config.bcrypt_cost)?;

    let mut conn = state.pool.get().await?;
    match db::users::insert(&mut conn, &creds.username, &hashed).await? {
        InsertOutcome::Created(user) => {
            tracing::info!("Registered new user: {}", user.username);
            // No auto-login; the user proceeds to the login form.
            Ok(views::login_page(Some("Successfully created account!"), false).into_response())
        }
        InsertOutcome::UsernameTaken => Err(AppError::Validation(format!(
            "username already taken: {}",
            creds.username
        ))),
    }
}

pub async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    ensure_logged_out(&headers, &state, "login").await?;
    Ok(views::login_page(None, false).into_response())
}

/// Authenticate and establish a session.
///
/// Unknown usernames and hash mismatches are distinct, user-visible
/// outcomes; neither touches session state.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(creds): Form<Credentials>,
) -> AppResult<Response> {
    ensure_logged_out(&headers, &state, "login").await?;

    let mut conn = state.pool.get().await?;
    let user = db::users::find_by_username(&mut conn, &creds.username)
        .await?
        .ok_or_else(|| AppError::UnknownUser(creds.username.clone()))?;

    if !password::verify_password(&creds.password, &user.password)? {
        return Err(AppError::WrongPassword(user.username));
    }

    let token = state.sessions.create(&user.username).await;
    let cookie = build_session_cookie(
        &state.config.cookie_name,
        &token,
        state.config.session_ttl_secs,
    );

    tracing::info!("Successful login for: {}", user.username);

    Ok((
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/home".to_string()),
            (header::SET_COOKIE, cookie),
        ],
    )
        .into_response())
}

/// Destroy the current session and clear the cookie. A request without a
/// session (or with an unknown token) still gets the confirmation page.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers, &state.config.cookie_name) {
        if state.sessions.destroy(&token).await {
            tracing::info!("Session destroyed on logout");
        }
    }

    (
        [(
            header::SET_COOKIE,
            clear_session_cookie(&state.config.cookie_name),
        )],
        views::logout_page("Successfully Logged Out!"),
    )
        .into_response()
}
