//! Cookie-session authentication.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use folio_core::error::AppError;
use folio_database::repositories::AuthRepository;
use folio_entity::{Session, User};

use super::password::PasswordHasher;

/// Logs users in and out and resolves session cookies to users.
#[derive(Clone)]
pub struct AuthService {
    /// Users and sessions.
    repo: Arc<dyn AuthRepository>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// How long a new session lives.
    session_ttl: Duration,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("session_ttl", &self.session_ttl)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates a new auth service issuing sessions that live `session_ttl_seconds`.
    pub fn new(repo: Arc<dyn AuthRepository>, session_ttl_seconds: i64) -> Self {
        Self {
            repo,
            hasher: PasswordHasher::new(),
            session_ttl: Duration::seconds(session_ttl_seconds),
        }
    }

    /// Session lifetime.
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Verifies credentials and opens a session.
    ///
    /// Expired sessions of every user are purged first. Unknown email and
    /// wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, Session), AppError> {
        let now = Utc::now();
        let purged = self.repo.delete_expired_sessions(now).await?;
        if purged > 0 {
            debug!(purged, "Purged expired sessions");
        }

        let invalid = || AppError::authentication("invalid email or password");

        let Some(user) = self.repo.find_user_by_email(email).await? else {
            warn!(email, "Login attempt for unknown user");
            return Err(invalid());
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(invalid());
        }

        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: user.id,
            expires_at: now + self.session_ttl,
            created_at: now,
        };
        self.repo.create_session(&session).await?;

        info!(user_id = user.id, "User logged in");
        Ok((user, session))
    }

    /// Resolves a session id to its user.
    ///
    /// An expired session is deleted on sight.
    pub async fn validate_session(&self, session_id: &str) -> Result<User, AppError> {
        let session = self
            .repo
            .find_session(session_id)
            .await?
            .ok_or_else(|| AppError::authentication("session not found"))?;

        if session.is_expired_at(Utc::now()) {
            self.repo.delete_session(session_id).await?;
            return Err(AppError::authentication("session has expired"));
        }

        self.repo
            .find_user_by_id(session.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("session not found"))
    }

    /// Ends a session. Unknown ids are ignored.
    pub async fn logout(&self, session_id: &str) -> Result<(), AppError> {
        if self.repo.delete_session(session_id).await? {
            info!("User logged out");
        }
        Ok(())
    }

    /// Creates an account with a freshly hashed password.
    pub async fn create_user(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("a valid email is required"));
        }
        if password.is_empty() {
            return Err(AppError::validation("password must not be empty"));
        }

        let hash = self.hasher.hash(password)?;
        let user = self.repo.create_user(email, &hash).await?;
        info!(user_id = user.id, email = %user.email, "User created");
        Ok(user)
    }
}
