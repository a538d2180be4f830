//! Backend selection: builds the full repository set from configuration.

use std::sync::Arc;

use tracing::info;

use folio_core::config::{DatabaseBackend, DatabaseConfig};
use folio_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{
    MemoryAuthRepository, MemoryCertificationRepository, MemoryExperienceRepository,
    MemoryProjectRepository,
};
use crate::migration::run_migrations;
use crate::repositories::{
    AuthRepository, CertificationRepository, CertificationStore, ExperienceRepository,
    ExperienceStore, ProjectRepository, ProjectStore, SqliteAuthRepository,
};

/// Every repository the services need, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    /// Certification metadata.
    pub certifications: Arc<CertificationStore>,
    /// Work experiences.
    pub experiences: Arc<ExperienceStore>,
    /// Projects.
    pub projects: Arc<ProjectStore>,
    /// Users and sessions.
    pub auth: Arc<dyn AuthRepository>,
    /// The SQLite pool, when the backend has one.
    pub pool: Option<DatabasePool>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl Repositories {
    /// Connect (and migrate) the configured backend.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Sqlite => {
                let db = DatabasePool::connect(config).await?;
                run_migrations(db.pool()).await?;
                Ok(Self::sqlite(db))
            }
            DatabaseBackend::Memory => {
                info!("Using in-memory repositories; data will not survive a restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Repositories over an existing SQLite pool.
    pub fn sqlite(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            certifications: Arc::new(CertificationRepository::new(pool.clone())),
            experiences: Arc::new(ExperienceRepository::new(pool.clone())),
            projects: Arc::new(ProjectRepository::new(pool.clone())),
            auth: Arc::new(SqliteAuthRepository::new(pool)),
            pool: Some(db),
        }
    }

    /// Fresh, empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            certifications: Arc::new(MemoryCertificationRepository::new()),
            experiences: Arc::new(MemoryExperienceRepository::new()),
            projects: Arc::new(MemoryProjectRepository::new()),
            auth: Arc::new(MemoryAuthRepository::new()),
            pool: None,
        }
    }

    /// Backend connectivity check; always healthy without a pool.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(db) => db.health_check().await,
            None => Ok(true),
        }
    }

    /// Close the pool, if any.
    pub async fn close(&self) {
        if let Some(db) = &self.pool {
            db.close().await;
        }
    }
}
