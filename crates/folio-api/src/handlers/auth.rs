//! Auth handlers: login, logout, me.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use folio_core::config::{AuthConfig, SameSitePolicy};

use crate::dto::request::{LoginRequest, validate_request};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Builds the session cookie carrying `value` for `max_age_seconds`.
fn session_cookie(config: &AuthConfig, value: String, max_age_seconds: i64) -> Cookie<'static> {
    let same_site = match config.cookie_same_site {
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::None => SameSite::None,
    };

    let mut builder = Cookie::build((config.cookie_name.clone(), value))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(same_site)
        .max_age(cookie::time::Duration::seconds(max_age_seconds));

    if let Some(domain) = &config.cookie_domain {
        builder = builder.domain(domain.clone());
    }

    builder.build()
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<UserResponse>>), ApiError> {
    validate_request(&req)?;

    let (user, session) = state.auth_service.login(&req.email, &req.password).await?;
    let cookie = session_cookie(
        &state.config.auth,
        session.id,
        state.auth_service.session_ttl().num_seconds(),
    );

    Ok((
        jar.add(cookie),
        Json(ApiResponse::with_message(user.into(), "login successful")),
    ))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    let config = &state.config.auth;

    if let Some(session_id) = jar.get(&config.cookie_name).map(|c| c.value().to_string()) {
        state.auth_service.logout(&session_id).await?;
    }

    let expired = session_cookie(config, String::new(), 0);
    Ok((
        jar.remove(expired),
        Json(ApiResponse::ok(MessageResponse::new("logged out"))),
    ))
}

/// GET /api/v1/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(auth.user.into()))
}
