use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use copa_core::{
    Athlete, AuthUser, Error, Manager, NewRegistration, Registration, RegistrationPatch,
    RegistrationStatus, Team,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::auth::require_user;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRegistrationBody {
    pub team: Team,
    pub manager: Manager,
    #[serde(default)]
    pub athletes: Vec<Athlete>,
}

fn validate(body: &CreateRegistrationBody) -> Result<(), Error> {
    if body.team.name.trim().is_empty() || body.manager.name.trim().is_empty() {
        return Err(Error::InvalidRequest(
            "team and manager names are required".into(),
        ));
    }
    if body.athletes.is_empty() {
        return Err(Error::InvalidRequest(
            "at least one athlete is required".into(),
        ));
    }
    Ok(())
}

/// Fetch a registration and check it belongs to the caller.
async fn owned_registration(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> Result<Registration, Error> {
    let registration = state
        .registrations
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("registration {}", id)))?;
    if registration.user_id != user.id {
        return Err(Error::Forbidden);
    }
    Ok(registration)
}

fn ensure_pending(registration: &Registration) -> Result<(), Error> {
    if registration.status != RegistrationStatus::Pending {
        return Err(Error::InvalidRequest(
            "only pending registrations can be changed".into(),
        ));
    }
    Ok(())
}

pub async fn list_mine(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Registration>>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let mine = state.registrations.list_by_user(user.id).await?;
    Ok(Json(mine))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateRegistrationBody>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let user = require_user(&state, &headers).await?;
    validate(&body)?;

    let created = state
        .registrations
        .create(NewRegistration {
            user_id: user.id,
            team: body.team,
            manager: body.manager,
            athletes: body.athletes,
        })
        .await?;

    info!(registration = %created.id, user = user.id, "registration submitted");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Registration>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let registration = owned_registration(&state, &user, &id).await?;
    Ok(Json(registration))
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<RegistrationPatch>,
) -> Result<Json<Registration>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let registration = owned_registration(&state, &user, &id).await?;
    ensure_pending(&registration)?;

    let updated = state
        .registrations
        .update(&id, patch)
        .await?
        .ok_or_else(|| Error::NotFound(format!("registration {}", id)))?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user = require_user(&state, &headers).await?;
    let registration = owned_registration(&state, &user, &id).await?;
    ensure_pending(&registration)?;

    state.registrations.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
