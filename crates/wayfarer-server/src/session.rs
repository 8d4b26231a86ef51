//! Cookie sessions.
//!
//! A session is an opaque random token mapped to a user id in memory. It
//! expires [`SESSION_TTL`] after login and does not survive a restart.

use std::collections::HashMap;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use jiff::{SignedDuration, Timestamp};
use tokio::sync::RwLock;
use wayfarer_core::TravelError;

use crate::{error::ApiError, state::AppState};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "wayfarer_session";

/// Lifetime of a session.
pub const SESSION_TTL: SignedDuration = SignedDuration::from_hours(24);

const TOKEN_LEN: usize = 32;

#[derive(Debug, Clone, Copy)]
struct Session {
    user_id: u64,
    expires_at: Timestamp,
}

/// In-memory map from session token to user id.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: SignedDuration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: SignedDuration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Starts a session for `user_id` and returns its token. Expired
    /// sessions are dropped on the way.
    pub async fn create(&self, user_id: u64) -> String {
        let now = Timestamp::now();
        let session = Session {
            user_id,
            expires_at: now.checked_add(self.ttl).unwrap_or(Timestamp::MAX),
        };
        let token = nanoid::nanoid!(TOKEN_LEN);

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(token.clone(), session);
        token
    }

    /// The user behind a live session. An expired token is removed.
    pub async fn resolve(&self, token: &str) -> Option<u64> {
        let session = self.sessions.read().await.get(token).copied()?;
        if session.expires_at > Timestamp::now() {
            return Some(session.user_id);
        }
        self.sessions.write().await.remove(token);
        None
    }

    pub async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Ends every session of a user.
    pub async fn revoke_user(&self, user_id: u64) {
        self.sessions
            .write()
            .await
            .retain(|_, s| s.user_id != user_id);
    }
}

/// `Set-Cookie` value that installs a session.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_TTL.as_secs()
    )
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

/// Reads the session token from the request cookies.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find(|token| !token.is_empty())
        .map(str::to_string)
}

/// The authenticated caller. Rejects the request with 401 when no valid
/// session cookie is present.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: u64,
    pub token: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(TravelError::Unauthenticated)?;
        let user_id = state
            .sessions
            .resolve(&token)
            .await
            .ok_or(TravelError::Unauthenticated)?;
        Ok(CurrentUser { user_id, token })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; wayfarer_session=abc123; lang=en"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));

        let mut other = HeaderMap::new();
        other.insert(header::COOKIE, HeaderValue::from_static("wayfarer_sessionx=1"));
        assert_eq!(session_token(&other), None);
    }

    #[tokio::test]
    async fn test_revoke_user_drops_all_sessions() {
        let store = SessionStore::new();
        let first = store.create(7).await;
        let second = store.create(7).await;
        let other = store.create(8).await;

        store.revoke_user(7).await;
        assert_eq!(store.resolve(&first).await, None);
        assert_eq!(store.resolve(&second).await, None);
        assert_eq!(store.resolve(&other).await, Some(8));
    }

    #[tokio::test]
    async fn test_expired_sessions_are_rejected_and_pruned() {
        let store = SessionStore::with_ttl(SignedDuration::from_secs(-1));
        let first = store.create(7).await;
        assert_eq!(store.resolve(&first).await, None);
        assert!(store.sessions.read().await.is_empty());

        store.create(7).await;
        store.create(8).await;
        assert_eq!(store.sessions.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_live_session_resolves() {
        let store = SessionStore::new();
        let token = store.create(3).await;
        assert_eq!(store.resolve(&token).await, Some(3));
        assert!(session_cookie(&token).contains("Max-Age=86400"));
    }
}
