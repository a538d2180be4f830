//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use folio_core::config::AppConfig;
use folio_core::traits::ObjectStore;
use folio_database::Repositories;
use folio_service::{AuthService, CertificationService, ExperienceService, ProjectService};

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Repositories for the selected backend
    pub repositories: Repositories,
    /// Certificate file store
    pub object_store: Arc<dyn ObjectStore>,
    /// Per-client request throttle
    pub rate_limiter: RateLimiter,
    /// Cancelled when the server begins shutting down
    pub shutdown: CancellationToken,

    // ── Services ─────────────────────────────────────────────
    /// Session login and validation
    pub auth_service: Arc<AuthService>,
    /// Certification upload, lookup and delete
    pub certification_service: Arc<CertificationService>,
    /// Experience CRUD
    pub experience_service: Arc<ExperienceService>,
    /// Project CRUD
    pub project_service: Arc<ProjectService>,
}

impl AppState {
    /// Wires services over the given repositories and object store.
    pub fn new(
        config: AppConfig,
        repositories: Repositories,
        object_store: Arc<dyn ObjectStore>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repositories.auth),
            config.auth.session_ttl_seconds,
        ));
        let certification_service = Arc::new(CertificationService::new(
            Arc::clone(&repositories.certifications),
            Arc::clone(&object_store),
            &config.upload,
        ));
        let experience_service = Arc::new(ExperienceService::new(Arc::clone(
            &repositories.experiences,
        )));
        let project_service = Arc::new(ProjectService::new(Arc::clone(&repositories.projects)));
        let rate_limiter = RateLimiter::from_config(&config.rate_limit);

        Self {
            config: Arc::new(config),
            repositories,
            object_store,
            rate_limiter,
            shutdown: CancellationToken::new(),
            auth_service,
            certification_service,
            experience_service,
            project_service,
        }
    }
}
