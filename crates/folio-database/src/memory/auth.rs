use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use folio_core::error::AppError;
use folio_core::result::AppResult;
use folio_entity::{Session, User};

use super::MemoryTable;
use crate::repositories::AuthRepository;

/// In-memory users and sessions.
#[derive(Debug)]
pub struct MemoryAuthRepository {
    users: MemoryTable<User>,
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemoryAuthRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            users: MemoryTable::new(),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryAuthRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthRepository for MemoryAuthRepository {
    async fn create_user(&self, email: &str, password_hash: &str) -> AppResult<User> {
        if self.users.any(|u| u.email == email).await {
            return Err(AppError::conflict("Failed to create user: duplicate entry"));
        }

        Ok(self
            .users
            .insert_with(|id| User {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at: Utc::now(),
            })
            .await)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.all().await.into_iter().find(|u| u.email == email))
    }

    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.get(id).await)
    }

    async fn create_session(&self, session: &Session) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(AppError::conflict("Failed to create session: duplicate entry"));
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn find_session(&self, id: &str) -> AppResult<Option<Session>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn delete_session(&self, id: &str) -> AppResult<bool> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}
