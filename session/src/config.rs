//! Session configuration.
//!
//! A browser SPA has no process environment at runtime, so configuration is
//! a plain value constructed once at startup and handed down with the rest
//! of the dependency graph.

/// Default REST base path, matching the reverse-proxy layout in production.
pub const DEFAULT_API_BASE: &str = "/api";

/// Access tokens within this many milliseconds of expiry are refreshed
/// proactively instead of waiting for a request to 401.
pub const DEFAULT_REFRESH_LEEWAY_MS: i64 = 60_000;

/// Settings shared by the auth client and the request gateway.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base path prepended to every endpoint path. No trailing slash;
    /// endpoint paths start with `/`.
    pub api_base: String,
    /// Grace window for proactive access-token refresh.
    pub refresh_leeway_ms: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            refresh_leeway_ms: DEFAULT_REFRESH_LEEWAY_MS,
        }
    }
}

impl SessionConfig {
    /// Config pointing at a non-default API origin (tests, staging builds).
    #[must_use]
    pub fn with_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    /// Full URL for an endpoint path like `/items`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}
