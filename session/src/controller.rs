//! Session bootstrap and identity population.
//!
//! ARCHITECTURE
//! ============
//! `SessionController` is what the UI's reactive session provider calls
//! into: it composes the auth client (credentials, tokens) with the
//! gateway (identity fetch) and reduces every outcome to a
//! [`SessionSnapshot`] the view layer can store in a signal. Bootstrap
//! never fails outward. A session that cannot be revived demotes to a
//! signed-out snapshot, keeping the app shell alive.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::rc::Rc;

use serde::Deserialize;

use crate::auth::{AuthClient, Registration};
use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::jwt;

/// User record fetched from `GET /users/{id}` during bootstrap.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Read model handed to the reactive layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub username: Option<String>,
    pub role: Option<String>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    fn signed_in(account: &UserAccount) -> Self {
        Self {
            authenticated: true,
            username: Some(account.username.clone()),
            role: account.role.clone(),
        }
    }
}

/// Orchestrates login, registration, logout, and reload bootstrap.
pub struct SessionController {
    auth: Rc<AuthClient>,
    gateway: Rc<ApiGateway>,
}

impl SessionController {
    #[must_use]
    pub fn new(auth: Rc<AuthClient>, gateway: Rc<ApiGateway>) -> Self {
        Self { auth, gateway }
    }

    /// Revive a persisted session after a page load.
    ///
    /// Never returns an error: any bootstrap problem (dead tokens,
    /// identity fetch failure, undecodable token) signs the session out
    /// and yields the signed-out snapshot.
    pub async fn initialize(&self) -> SessionSnapshot {
        if !self.auth.is_authenticated() {
            return SessionSnapshot::signed_out();
        }
        match self.load_identity().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!("session bootstrap failed, signing out: {err}");
                self.auth.logout();
                SessionSnapshot::signed_out()
            }
        }
    }

    /// Authenticate and populate identity in one awaited step.
    ///
    /// # Errors
    ///
    /// `Authentication` for rejected credentials (state unchanged), or
    /// whatever the identity fetch fails with, in which case the
    /// half-open session is closed before the error is returned.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionSnapshot, ApiError> {
        self.auth.login(username, password).await?;
        match self.load_identity().await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                self.auth.logout();
                Err(err)
            }
        }
    }

    /// Create the account, then log in with the same credentials.
    /// Registration alone never establishes a session.
    ///
    /// # Errors
    ///
    /// As [`SessionController::login`], plus `Authentication` when the
    /// registration itself is rejected.
    pub async fn register_and_login(
        &self,
        registration: &Registration,
    ) -> Result<SessionSnapshot, ApiError> {
        self.auth.register(registration).await?;
        self.login(&registration.username, &registration.password)
            .await
    }

    /// Drop the session and return the signed-out snapshot.
    pub fn logout(&self) -> SessionSnapshot {
        self.auth.logout();
        SessionSnapshot::signed_out()
    }

    /// Token → `userId` claim → full user record through the gateway.
    async fn load_identity(&self) -> Result<SessionSnapshot, ApiError> {
        let Some(token) = self.gateway.bearer_token().await else {
            return Err(ApiError::SessionExpired);
        };
        let user_id = match jwt::decode_user_id(&token) {
            Ok(user_id) => user_id,
            Err(err) => {
                log::warn!("access token payload is unusable: {err}");
                return Err(ApiError::MalformedResponse);
            }
        };
        let value = self.gateway.get(&format!("/users/{user_id}")).await?;
        let account: UserAccount =
            serde_json::from_value(value).map_err(|_| ApiError::MalformedResponse)?;
        Ok(SessionSnapshot::signed_in(&account))
    }
}
