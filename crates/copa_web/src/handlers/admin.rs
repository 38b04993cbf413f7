use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use copa_core::{Error, Registration, RegistrationStatus, Role};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::auth::{require_role, require_user};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetStatusBody {
    pub status: Option<String>,
}

pub async fn list_all(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Registration>>, ApiError> {
    let user = require_user(&state, &headers).await?;
    require_role(&user, Role::Admin)?;
    Ok(Json(state.registrations.list().await?))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Registration>, ApiError> {
    let user = require_user(&state, &headers).await?;
    require_role(&user, Role::Admin)?;

    let registration = state
        .registrations
        .find(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("registration {}", id)))?;
    Ok(Json(registration))
}

pub async fn set_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<SetStatusBody>,
) -> Result<Json<Registration>, ApiError> {
    let user = require_user(&state, &headers).await?;
    require_role(&user, Role::Admin)?;

    // reject unknown status values explicitly instead of trusting serde
    // to produce a useful message
    let status = body
        .status
        .as_deref()
        .and_then(RegistrationStatus::parse)
        .ok_or_else(|| {
            Error::InvalidRequest("status must be pending, approved or rejected".into())
        })?;

    let updated = state
        .registrations
        .set_status(&id, status)
        .await?
        .ok_or_else(|| Error::NotFound(format!("registration {}", id)))?;

    info!(registration = %updated.id, status = ?updated.status, admin = user.id, "status updated");
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user = require_user(&state, &headers).await?;
    require_role(&user, Role::Admin)?;

    if !state.registrations.delete(&id).await? {
        return Err(Error::NotFound(format!("registration {}", id)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
