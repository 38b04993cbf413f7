use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use copa_core::{AuthUser, Error, NewUser, PublicUser, Role};
use copa_store::password::{hash_password, verify_password};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::auth::require_user;
use crate::error::ApiError;
use crate::state::AppState;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let email = body.email.unwrap_or_default().trim().to_lowercase();
    let password = body.password.unwrap_or_default().trim().to_string();

    let mut problems = Vec::new();
    if !EMAIL.is_match(&email) {
        problems.push("email: invalid format");
    }
    if password.len() < 6 {
        problems.push("password: minimum 6 characters");
    }
    if !problems.is_empty() {
        return Err(Error::InvalidRequest(problems.join("; ")).into());
    }

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(Error::Conflict("email already registered".into()).into());
    }

    let user = state
        .users
        .create(NewUser {
            name: body.name,
            email,
            password_hash: hash_password(&password),
            role: body.role.unwrap_or(Role::Captain),
        })
        .await?;

    // auto-login: hand back a token with the created account
    let token = state
        .auth
        .issue(AuthUser {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        })
        .await?;

    info!(user = user.id, "account registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.public(),
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(Error::InvalidRequest("email and password are required".into()).into());
    };
    let email = email.trim().to_lowercase();

    let Some(user) = state.users.find_by_email(&email).await? else {
        return Err(Error::Unauthorized.into());
    };
    if !verify_password(&password, &user.password_hash) {
        return Err(Error::Unauthorized.into());
    }

    let token = state
        .auth
        .issue(AuthUser {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        })
        .await?;

    Ok(Json(AuthResponse {
        token,
        user: user.public(),
    }))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<PublicUser>, ApiError> {
    let auth_user = require_user(&state, &headers).await?;
    let Some(user) = state.users.find_by_email(&auth_user.email).await? else {
        return Err(Error::Unauthorized.into());
    };
    Ok(Json(user.public()))
}
