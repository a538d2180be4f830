//! Route definitions for the Folio HTTP API.
//!
//! Resource routes are mounted under `/api/v1`; stored certificate files
//! are served from the configured public path. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::get,
    routing::post,
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.storage.max_upload_size_bytes).unwrap_or(usize::MAX);
    let files_path = format!(
        "{}/{{name}}",
        state.config.upload.public_path.trim_end_matches('/')
    );

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(certification_routes())
        .merge(experience_routes())
        .merge(project_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(health_routes())
        .route(&files_path, get(handlers::files::serve_certification_file))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Session endpoints: login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Certification list, lookup, batch upload, delete
fn certification_routes() -> Router<AppState> {
    use handlers::certification::*;

    Router::new()
        .route(
            "/upload-certificates",
            get(list_certifications).post(upload_certificates),
        )
        .route(
            "/upload-certificates/{id}",
            get(get_certification).delete(delete_certification),
        )
}

/// Experience CRUD
fn experience_routes() -> Router<AppState> {
    use handlers::experience::*;

    Router::new()
        .route("/experiences", get(list_experiences).post(create_experience))
        .route(
            "/experiences/{id}",
            get(get_experience)
                .patch(update_experience)
                .delete(delete_experience),
        )
}

/// Project CRUD
fn project_routes() -> Router<AppState> {
    use handlers::project::*;

    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).patch(update_project).delete(delete_project),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
