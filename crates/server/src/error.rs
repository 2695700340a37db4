//! Unified error handling for request handlers.
//!
//! `AppError` implements `IntoResponse`, so handlers can use the `?`
//! operator and fall out to the right page. Auth failures re-render forms
//! with a user-visible message; storage failures are logged in full and
//! surface as a generic failure page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

/// Unified error type for request handlers
#[derive(Debug, Error)]
pub enum AppError {
    /// Database connection pool error
    #[error("Database connection error")]
    Pool(#[from] diesel_async::pooled_connection::deadpool::PoolError),

    /// Database query error
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    /// bcrypt failure while hashing or verifying
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Registration rejected; the detail is logged, the user sees one
    /// generic message
    #[error("Registration failed: {0}")]
    Validation(String),

    /// Login attempt for a username with no row
    #[error("No user named {0}")]
    UnknownUser(String),

    /// Login attempt with a hash mismatch
    #[error("Incorrect password for {0}")]
    WrongPassword(String),

    /// Register/login attempted while a session is live
    #[error("Already logged in, refused {attempted}")]
    AlreadyLoggedIn { attempted: &'static str },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Pool(e) => {
                tracing::error!("Connection pool error: {:?}", e);
                (StatusCode::SERVICE_UNAVAILABLE, views::failure_page()).into_response()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, views::failure_page()).into_response()
            }
            AppError::Hash(e) => {
                tracing::error!("Password hashing error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, views::failure_page()).into_response()
            }
            AppError::Validation(detail) => {
                tracing::warn!("Registration rejected: {}", detail);
                views::register_page(
                    Some("Something went wrong. Either your username was invalid or is already taken!"),
                    true,
                )
                .into_response()
            }
            AppError::UnknownUser(username) => {
                tracing::info!("Login attempt for unknown user: {}", username);
                views::register_page(Some("No username found, maybe try registering."), true)
                    .into_response()
            }
            AppError::WrongPassword(username) => {
                tracing::info!("Incorrect password for: {}", username);
                views::login_page(Some("Incorrect password."), true).into_response()
            }
            AppError::AlreadyLoggedIn { attempted } => views::refusal_page(&format!(
                "Can't load {attempted} until you log out!"
            ))
            .into_response(),
        }
    }
}

/// Result type alias for request handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_auth_failures_rerender_forms() {
        let response = AppError::UnknownUser("bob".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = AppError::WrongPassword("alice".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_auth_failures_set_no_cookie() {
        // A rejected login must leave session state untouched.
        for err in [
            AppError::UnknownUser("bob".to_string()),
            AppError::WrongPassword("alice".to_string()),
            AppError::Validation("duplicate".to_string()),
        ] {
            let response = err.into_response();
            assert!(response.headers().get(header::SET_COOKIE).is_none());
        }
    }

    #[test]
    fn test_storage_failures_are_generic() {
        let response = AppError::Database(diesel::result::Error::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_refusal_when_logged_in() {
        let response = AppError::AlreadyLoggedIn {
            attempted: "register",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
