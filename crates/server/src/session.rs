//! In-process session store.
//!
//! Maps opaque tokens (uuid v4, carried in an HttpOnly cookie) to the
//! logged-in username. Sessions live only in memory and do not survive a
//! process restart. Expired entries are evicted lazily on lookup.
//!
//! The session holds nothing but the username; anything else about the
//! user is re-read from the `users` table when needed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

/// A live session for one browser.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    created_at: Instant,
}

impl Session {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        SessionStore {
            ttl,
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a session for `username` and return the opaque token to put
    /// in the cookie.
    pub async fn create(&self, username: &str) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            username: username.to_string(),
            created_at: Instant::now(),
        };

        self.inner.write().await.insert(token.clone(), session);
        token
    }

    /// Look up a session by token. Expired sessions are removed and
    /// reported as absent.
    pub async fn get(&self, token: &str) -> Option<Session> {
        let expired = {
            let sessions = self.inner.read().await;
            match sessions.get(token) {
                Some(session) if session.is_expired(self.ttl) => true,
                Some(session) => return Some(session.clone()),
                None => return None,
            }
        };

        if expired {
            self.inner.write().await.remove(token);
        }
        None
    }

    /// Destroy a session. Returns whether a session existed; destroying an
    /// unknown token is a no-op.
    pub async fn destroy(&self, token: &str) -> bool {
        self.inner.write().await.remove(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let sessions = store();
        let token = sessions.create("alice").await;

        let session = sessions.get(&token).await.expect("session should exist");
        assert_eq!(session.username, "alice");
    }

    #[tokio::test]
    async fn test_unknown_token_absent() {
        let sessions = store();
        assert!(sessions.get("no-such-token").await.is_none());
    }

    #[tokio::test]
    async fn test_destroy_revokes() {
        let sessions = store();
        let token = sessions.create("alice").await;

        assert!(sessions.destroy(&token).await);
        assert!(sessions.get(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_destroy_unknown_token_is_noop() {
        let sessions = store();
        assert!(!sessions.destroy("no-such-token").await);
    }

    #[tokio::test]
    async fn test_expired_session_absent() {
        let sessions = SessionStore::new(Duration::ZERO);
        let token = sessions.create("alice").await;

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(sessions.get(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_tokens_are_unique_per_login() {
        let sessions = store();
        let first = sessions.create("alice").await;
        let second = sessions.create("alice").await;

        assert_ne!(first, second);
        // Destroying one login does not touch the other
        sessions.destroy(&first).await;
        assert!(sessions.get(&second).await.is_some());
    }
}
