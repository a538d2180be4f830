//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Cookie `SameSite` policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    /// `SameSite=Lax`
    #[default]
    Lax,
    /// `SameSite=Strict`
    Strict,
    /// `SameSite=None` (requires `Secure`)
    None,
}

/// Authentication and session cookie settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in seconds; also the cookie max-age.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: i64,
    /// Whether the cookie carries the `Secure` attribute.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Optional cookie domain.
    #[serde(default)]
    pub cookie_domain: Option<String>,
    /// `SameSite` attribute.
    #[serde(default)]
    pub cookie_same_site: SameSitePolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            session_ttl_seconds: default_session_ttl(),
            cookie_secure: false,
            cookie_domain: None,
            cookie_same_site: SameSitePolicy::default(),
        }
    }
}

fn default_cookie_name() -> String {
    "session_id".to_string()
}

fn default_session_ttl() -> i64 {
    2 * 60 * 60
}
