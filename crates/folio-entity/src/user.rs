//! User and session entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The portfolio owner account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Login email, unique.
    pub email: String,
    /// Argon2id PHC string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// A server-side login session referenced by the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Random session identifier (UUID v4, also the cookie value).
    pub id: String,
    /// The user this session belongs to.
    pub user_id: i64,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
