//! Login, registration, logout, and the refresh-token exchange.
//!
//! ARCHITECTURE
//! ============
//! `AuthClient` is the only code in the application that talks to the
//! `/auth/*` endpoints. Pages never call it directly for data — they go
//! through the gateway, which consults this client for token validity and
//! delegates the actual refresh exchange here. The session controller
//! calls `login`/`register`/`logout` on behalf of the UI forms.
//!
//! TRADE-OFFS
//! ==========
//! `refresh_access_token` is deliberately fire-once: any failure clears
//! the whole session rather than leaving a half-dead token pair behind
//! for callers to retry against. Re-authentication after a failed
//! refresh always goes through `login`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::clock;
use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, HttpSend, Method};
use crate::tokens::{SessionTokens, TokenStore};

/// Registration payload for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Role is assigned by an admin later when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginReply {
    token: String,
    refresh_token: String,
    expires_in_ms: i64,
    refresh_expires_in_ms: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshReply {
    token: String,
    expires_in_ms: i64,
}

/// Client for the authentication endpoints, plus token-state queries.
pub struct AuthClient {
    store: Rc<TokenStore>,
    transport: Rc<dyn HttpSend>,
    config: SessionConfig,
}

impl AuthClient {
    #[must_use]
    pub fn new(store: Rc<TokenStore>, transport: Rc<dyn HttpSend>, config: SessionConfig) -> Self {
        Self {
            store,
            transport,
            config,
        }
    }

    /// Exchange credentials for a full token set and persist it.
    ///
    /// # Errors
    ///
    /// `Authentication` on any non-2xx (the server's message is attached
    /// when it sent one), `MalformedResponse` for an undecodable 2xx body,
    /// and `Network` for transport failures. Nothing is persisted on error.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionTokens, ApiError> {
        let response = self
            .transport
            .send(HttpRequest {
                method: Method::Post,
                url: self.config.endpoint("/auth/login"),
                bearer: None,
                body: Some(json!({ "username": username, "password": password })),
            })
            .await?;

        if !response.is_success() {
            return Err(ApiError::Authentication(rejection_text(
                &response,
                "invalid username or password",
            )));
        }

        let reply: LoginReply =
            serde_json::from_str(&response.body).map_err(|_| ApiError::MalformedResponse)?;
        let now = clock::now_ms();
        let tokens = SessionTokens {
            access_token: reply.token,
            access_expires_at_ms: now + reply.expires_in_ms,
            refresh_token: reply.refresh_token,
            refresh_expires_at_ms: now + reply.refresh_expires_in_ms,
        };
        self.store.write(&tokens);
        Ok(tokens)
    }

    /// Create an account. Does not establish a session — callers follow up
    /// with an explicit [`AuthClient::login`].
    ///
    /// # Errors
    ///
    /// `Authentication` on any non-2xx, `Network` on transport failure.
    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let body = serde_json::to_value(registration).map_err(|_| ApiError::MalformedResponse)?;
        let response = self
            .transport
            .send(HttpRequest {
                method: Method::Post,
                url: self.config.endpoint("/auth/register"),
                bearer: None,
                body: Some(body),
            })
            .await?;

        if !response.is_success() {
            return Err(ApiError::Authentication(rejection_text(
                &response,
                "registration rejected",
            )));
        }
        Ok(())
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Fire-once: returns the new access token on success, `None` on any
    /// failure — and every failure path (dead refresh token, transport
    /// error, rejection, undecodable body) logs the session out first. A
    /// known-dead refresh token is never sent over the wire.
    pub async fn refresh_access_token(&self) -> Option<String> {
        if !self.store.read_refresh_token_valid() {
            self.logout();
            return None;
        }
        let refresh_token = self.store.refresh_token()?;

        let sent = self
            .transport
            .send(HttpRequest {
                method: Method::Post,
                url: self.config.endpoint("/auth/refresh"),
                bearer: None,
                body: Some(json!({ "refreshToken": refresh_token })),
            })
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(err) => {
                log::warn!("token refresh failed: {err}");
                self.logout();
                return None;
            }
        };
        if !response.is_success() {
            log::warn!("token refresh rejected with status {}", response.status);
            self.logout();
            return None;
        }
        let reply: RefreshReply = match serde_json::from_str(&response.body) {
            Ok(reply) => reply,
            Err(_) => {
                log::warn!("token refresh response was not decodable");
                self.logout();
                return None;
            }
        };

        self.store
            .write_access_only(&reply.token, clock::now_ms() + reply.expires_in_ms);
        log::debug!("access token refreshed");
        Some(reply.token)
    }

    /// Drop the persisted session. Idempotent, client-side only — the
    /// server is not informed and the refresh token is not revoked.
    pub fn logout(&self) {
        self.store.clear();
    }

    /// The current access token while unexpired. Never triggers a refresh;
    /// that decision belongs to the gateway.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.read_access_token()
    }

    /// Whether the session can still mint access tokens (valid refresh
    /// token), regardless of the access token's state.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.read_refresh_token_valid()
    }

    /// Whether any refresh token is stored, live or stale. The gateway
    /// keys off presence, not validity: a stale stored session must fail
    /// over to the login view, not silently degrade to anonymous calls.
    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        self.store.refresh_token().is_some()
    }

    /// Whether the access token is inside the proactive-refresh window.
    /// An absent token or expiry counts as expiring.
    #[must_use]
    pub fn is_token_expiring_soon(&self) -> bool {
        self.is_token_expiring_soon_at(clock::now_ms())
    }

    fn is_token_expiring_soon_at(&self, now_ms: i64) -> bool {
        match self.store.access_token_expires_at() {
            Some(expires_at) => expires_at - now_ms < self.config.refresh_leeway_ms,
            None => true,
        }
    }
}

/// Pull a human-readable rejection message out of an error body, falling
/// back to a fixed description when the body carries none.
fn rejection_text(response: &HttpResponse, fallback: &str) -> String {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(Value::as_str)
        .map_or_else(|| fallback.to_owned(), ToOwned::to_owned)
}
