//! Reactive session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as an `RwSignal<SessionState>` from the app root. Route guards
//! and user-aware components read it to coordinate login redirects and
//! role-dependent rendering; only the bootstrap effect and the login/logout
//! flows write it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use session::controller::SessionSnapshot;

/// Where the session provider is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Bootstrap from storage has not settled yet.
    #[default]
    Initializing,
    Unauthenticated,
    Authenticated,
}

/// Capability flags derived from the user's role string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleFlags {
    pub is_admin: bool,
    pub is_production: bool,
    pub is_warehouse: bool,
}

impl RoleFlags {
    /// Map a role string onto flags; unknown or missing roles grant nothing.
    #[must_use]
    pub fn from_role(role: Option<&str>) -> Self {
        let Some(role) = role else {
            return Self::default();
        };
        let role = role.trim().to_ascii_uppercase();
        Self {
            is_admin: role == "ADMIN",
            is_production: role == "PRODUCTION",
            is_warehouse: role == "WAREHOUSE",
        }
    }
}

/// Session state tracking the current user identity and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub username: Option<String>,
    pub role: Option<String>,
}

impl SessionState {
    /// Fold a controller snapshot into reactive state.
    #[must_use]
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        if snapshot.authenticated {
            Self {
                phase: SessionPhase::Authenticated,
                username: snapshot.username.clone(),
                role: snapshot.role.clone(),
            }
        } else {
            Self::signed_out()
        }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self {
            phase: SessionPhase::Unauthenticated,
            username: None,
            role: None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Initializing
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    #[must_use]
    pub fn flags(&self) -> RoleFlags {
        RoleFlags::from_role(self.role.as_deref())
    }
}
