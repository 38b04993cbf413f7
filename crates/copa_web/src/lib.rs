use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/news", get(handlers::news::get_news))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/me", get(handlers::auth::me))
        .route(
            "/api/registrations",
            get(handlers::registrations::list_mine).post(handlers::registrations::create),
        )
        .route(
            "/api/registrations/:id",
            get(handlers::registrations::get_one)
                .patch(handlers::registrations::edit)
                .delete(handlers::registrations::remove),
        )
        .route("/api/admin/registrations", get(handlers::admin::list_all))
        .route(
            "/api/admin/registrations/:id",
            get(handlers::admin::get_one).delete(handlers::admin::remove),
        )
        .route(
            "/api/admin/registrations/:id/status",
            patch(handlers::admin::set_status),
        )
        .route("/api/telemetry/status", get(handlers::telemetry::status))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use super::{create_app, AppState};
    pub use copa_core::{Error, Result};
}
