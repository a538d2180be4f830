//! `AuthUser` extractor: resolves the session cookie to the logged-in user.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use folio_core::error::AppError;
use folio_entity::User;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated user behind the request's session cookie.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The account.
    pub user: User,
    /// Session id taken from the cookie.
    pub session_id: String,
}

impl std::ops::Deref for AuthUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar
            .get(&state.config.auth.cookie_name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::authentication("authentication required"))?;

        let user = state.auth_service.validate_session(&session_id).await?;

        Ok(Self { user, session_id })
    }
}
