use async_trait::async_trait;
use copa_core::{AuthUser, Authenticator, Error, Result};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(2 * 3600);

struct Session {
    user: AuthUser,
    expires_at: Instant,
}

/// Opaque bearer tokens held server-side. A token is a random uuid, so
/// possession is the whole credential; expired tokens are dropped on
/// the verify that finds them.
pub struct SessionAuth {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionAuth {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for SessionAuth {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

#[async_trait]
impl Authenticator for SessionAuth {
    async fn issue(&self, user: AuthUser) -> Result<String> {
        let token = Uuid::new_v4().simple().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            token.clone(),
            Session {
                user,
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(token)
    }

    async fn verify(&self, token: &str) -> Result<AuthUser> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(token) {
            Some(session) if session.expires_at > Instant::now() => Ok(session.user.clone()),
            Some(_) => {
                sessions.remove(token);
                Err(Error::Unauthorized)
            }
            None => Err(Error::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copa_core::Role;

    fn user() -> AuthUser {
        AuthUser {
            id: 7,
            email: "ana@example.com".into(),
            role: Role::Captain,
        }
    }

    #[tokio::test]
    async fn issued_token_verifies_back_to_the_user() {
        let auth = SessionAuth::default();
        let token = auth.issue(user()).await.unwrap();
        let verified = auth.verify(&token).await.unwrap();
        assert_eq!(verified.id, 7);
        assert_eq!(verified.role, Role::Captain);
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let auth = SessionAuth::default();
        assert!(matches!(
            auth.verify("no-such-token").await,
            Err(Error::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized_and_forgotten() {
        let auth = SessionAuth::new(Duration::ZERO);
        let token = auth.issue(user()).await.unwrap();
        assert!(matches!(auth.verify(&token).await, Err(Error::Unauthorized)));
        // second attempt hits the removed-token path
        assert!(matches!(auth.verify(&token).await, Err(Error::Unauthorized)));
    }

    #[tokio::test]
    async fn tokens_are_unique_per_issue() {
        let auth = SessionAuth::default();
        let a = auth.issue(user()).await.unwrap();
        let b = auth.issue(user()).await.unwrap();
        assert_ne!(a, b);
    }
}
