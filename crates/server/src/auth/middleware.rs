//! Session guard middleware and cookie plumbing.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::AppError;
use crate::session::Session;
use crate::AppState;

/// Middleware that requires a live session.
///
/// Applied with `axum::middleware::from_fn_with_state` to the protected
/// subtree. Anonymous requests are redirected to the login page and the
/// downstream handler is never invoked. Requests with a session pass
/// through unchanged; there is no per-request revalidation against the
/// users table.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let token = session_token(request.headers(), &state.config.cookie_name);

    let live = match token {
        Some(token) => state.sessions.get(&token).await.is_some(),
        None => false,
    };

    if !live {
        return Redirect::to("/login").into_response();
    }

    next.run(request).await
}

/// Look up the session for a request, if any.
pub async fn current_session(headers: &HeaderMap, state: &AppState) -> Option<Session> {
    let token = session_token(headers, &state.config.cookie_name)?;
    state.sessions.get(&token).await
}

/// Refuse register/login while a session is live.
pub async fn ensure_logged_out(
    headers: &HeaderMap,
    state: &AppState,
    attempted: &'static str,
) -> Result<(), AppError> {
    match current_session(headers, state).await {
        Some(_) => Err(AppError::AlreadyLoggedIn { attempted }),
        None => Ok(()),
    }
}

/// Pull the session token out of the request's Cookie header.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    for cookie_str in cookie_header.split(';') {
        if let Ok(cookie) = cookie::Cookie::parse(cookie_str.trim()) {
            if cookie.name() == cookie_name {
                return Some(cookie.value().to_string());
            }
        }
    }

    None
}

/// Build a session cookie string.
pub fn build_session_cookie(name: &str, token: &str, ttl_secs: u64) -> String {
    let secure = if std::env::var("RUST_ENV").unwrap_or_default() == "production" {
        "; Secure"
    } else {
        ""
    };
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
        name, token, ttl_secs, secure
    )
}

/// Cookie string that clears the session cookie on the client.
pub fn clear_session_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_session_token_extracted() {
        let headers = headers_with_cookie("session_id=abc123");
        assert_eq!(
            session_token(&headers, "session_id"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_session_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; session_id=abc123; lang=en");
        assert_eq!(
            session_token(&headers, "session_id"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_no_cookie_header() {
        assert_eq!(session_token(&HeaderMap::new(), "session_id"), None);
    }

    #[test]
    fn test_wrong_cookie_name_ignored() {
        let headers = headers_with_cookie("other=abc123");
        assert_eq!(session_token(&headers, "session_id"), None);
    }

    #[test]
    fn test_cookie_strings() {
        let set = build_session_cookie("session_id", "tok", 60);
        assert!(set.starts_with("session_id=tok;"));
        assert!(set.contains("HttpOnly"));
        assert!(set.contains("Max-Age=60"));

        let clear = clear_session_cookie("session_id");
        assert!(clear.contains("Max-Age=0"));
    }
}
