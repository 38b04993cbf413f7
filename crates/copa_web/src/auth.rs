use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use copa_core::{AuthUser, Error, Result, Role};

use crate::state::AppState;

/// Token from an `Authorization: Bearer <token>` header; anything else
/// is unauthorized.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers.get(AUTHORIZATION).ok_or(Error::Unauthorized)?;
    let value = value.to_str().map_err(|_| Error::Unauthorized)?;
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(Error::Unauthorized),
    }
}

/// Verified identity of the request, or `Unauthorized`.
pub async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<AuthUser> {
    let token = bearer_token(headers)?;
    state.auth.verify(token).await
}

pub fn require_role(user: &AuthUser, role: Role) -> Result<()> {
    if user.role == role {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}
