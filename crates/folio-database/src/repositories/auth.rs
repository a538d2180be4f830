//! User and session persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use folio_core::result::AppResult;
use folio_entity::{Session, User};

use super::db_error;

/// Storage for the account and its login sessions.
#[async_trait]
pub trait AuthRepository: Send + Sync + 'static {
    /// Create a user. Fails with a conflict if the email is taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> AppResult<User>;

    /// Find a user by email.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by id.
    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Persist a new session.
    async fn create_session(&self, session: &Session) -> AppResult<()>;

    /// Find a session by its cookie value.
    async fn find_session(&self, id: &str) -> AppResult<Option<Session>>;

    /// Delete a session. Returns `true` if it existed.
    async fn delete_session(&self, id: &str) -> AppResult<bool>;

    /// Delete every session expired at `now`. Returns how many were removed.
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// SQLite implementation of [`AuthRepository`].
#[derive(Debug, Clone)]
pub struct SqliteAuthRepository {
    pool: SqlitePool,
}

impl SqliteAuthRepository {
    /// Create a new auth repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepository for SqliteAuthRepository {
    async fn create_user(&self, email: &str, password_hash: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create user", e))
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user by email", e))
    }

    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user", e))
    }

    async fn create_session(&self, session: &Session) -> AppResult<()> {
        sqlx::query("INSERT INTO sessions (id, user_id, expires_at, created_at) VALUES (?, ?, ?, ?)")
            .bind(&session.id)
            .bind(session.user_id)
            .bind(session.expires_at)
            .bind(session.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create session", e))?;
        Ok(())
    }

    async fn find_session(&self, id: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find session", e))
    }

    async fn delete_session(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete session", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete expired sessions", e))?;
        Ok(result.rows_affected())
    }
}
