//! Authenticated session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The signed-in organizer as reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Server-side user id (`_id`).
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<String>,
    /// Account email.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
}

/// Credentials posted to `/login`.
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    /// Account email.
    pub email: String,
    /// Plain-text password; redacted from `Debug`.
    pub password: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Snapshot of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Signed-in user, if any.
    pub user: Option<User>,
    /// Whether `user` is signed in.
    pub is_authenticated: bool,
    /// When the session was last established or refreshed.
    pub authenticated_at: Option<DateTime<Utc>>,
}

/// Shared, explicitly passed session store.
///
/// Cloning hands out another handle to the same session.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    /// An empty, unauthenticated store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.inner.read().await.clone()
    }

    /// Whether a user is currently signed in.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_authenticated
    }

    /// Records a successful login or refresh.
    pub async fn authenticate(&self, user: User) {
        let mut session = self.inner.write().await;
        tracing::debug!(user = ?user.id, "Session authenticated");
        session.user = Some(user);
        session.is_authenticated = true;
        session.authenticated_at = Some(Utc::now());
    }

    /// Forgets the signed-in user.
    pub async fn clear(&self) {
        let mut session = self.inner.write().await;
        if session.is_authenticated {
            tracing::info!("Session cleared");
        }
        *session = Session::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_authenticate_and_clear() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated().await);

        store
            .authenticate(User {
                id: Some("u1".into()),
                ..Default::default()
            })
            .await;

        let session = store.snapshot().await;
        assert!(session.is_authenticated);
        assert!(session.authenticated_at.is_some());
        assert_eq!(session.user.unwrap().id.as_deref(), Some("u1"));

        store.clear().await;
        assert_eq!(store.snapshot().await, Session::default());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = SessionStore::new();
        let handle = store.clone();

        handle.authenticate(User::default()).await;
        assert!(store.is_authenticated().await);
    }

    #[test]
    fn test_user_accepts_mongo_id() {
        let user: User = serde_json::from_str(r#"{"_id":"abc","email":"o@x.com","role":"admin"}"#).unwrap();
        assert_eq!(user.id.as_deref(), Some("abc"));
        assert_eq!(user.email.as_deref(), Some("o@x.com"));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = LoginCredentials {
            email: "o@x.com".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }
}
