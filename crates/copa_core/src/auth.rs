use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::Role;
use crate::Result;

/// Identity carried by a verified bearer credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: u64,
    pub email: String,
    pub role: Role,
}

/// Issues and verifies bearer credentials.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Issue a bearer token for the given user
    async fn issue(&self, user: AuthUser) -> Result<String>;

    /// Verify a bearer token, yielding the identity it was issued for.
    /// Unknown or expired tokens fail with `Error::Unauthorized`.
    async fn verify(&self, token: &str) -> Result<AuthUser>;
}
