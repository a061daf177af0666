//! Expiry-aware token persistence.
//!
//! ARCHITECTURE
//! ============
//! Four fields survive a page reload: the access token, the refresh token,
//! and their absolute expiry instants (epoch milliseconds, stored as
//! strings). The store never talks to the network and never decides to
//! refresh — it only answers "is this credential still usable right now."
//! Reads are expiry-aware but non-destructive: an expired access token is
//! reported as absent without deleting anything, because the refresh token
//! next to it may still be able to replace it.
//!
//! Persistence goes through the [`TokenBackend`] seam so the browser can
//! supply `localStorage` while native builds and tests use [`MemoryBackend`].

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::clock;

// ===== STORAGE KEYS =====
// Key names are part of the deployed storage layout; changing them logs
// every existing browser session out.

pub const ACCESS_TOKEN_KEY: &str = "authToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const ACCESS_EXPIRY_KEY: &str = "tokenExpiry";
pub const REFRESH_EXPIRY_KEY: &str = "refreshTokenExpiry";

/// Key/value persistence for token fields.
///
/// Implementations are infallible by contract: a backend that can fail
/// (quota, private-browsing restrictions) degrades by dropping the write
/// and logging, which at worst costs the user a re-login.
pub trait TokenBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn delete(&self, key: &str);
}

/// In-memory backend for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }

    fn delete(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// A full credential set as issued at login.
///
/// Expiries are absolute wall-clock instants computed at issuance from the
/// server-provided TTLs; the refresh window always outlasts the access
/// window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub access_expires_at_ms: i64,
    pub refresh_token: String,
    pub refresh_expires_at_ms: i64,
}

/// Expiry-aware store over a [`TokenBackend`].
pub struct TokenStore {
    backend: Rc<dyn TokenBackend>,
}

impl TokenStore {
    #[must_use]
    pub fn new(backend: Rc<dyn TokenBackend>) -> Self {
        Self { backend }
    }

    /// Persist a full credential set (login path).
    pub fn write(&self, tokens: &SessionTokens) {
        self.backend.write(ACCESS_TOKEN_KEY, &tokens.access_token);
        self.backend
            .write(ACCESS_EXPIRY_KEY, &tokens.access_expires_at_ms.to_string());
        self.backend.write(REFRESH_TOKEN_KEY, &tokens.refresh_token);
        self.backend.write(
            REFRESH_EXPIRY_KEY,
            &tokens.refresh_expires_at_ms.to_string(),
        );
    }

    /// Replace only the access pair (refresh path — the refresh token does
    /// not rotate).
    pub fn write_access_only(&self, token: &str, expires_at_ms: i64) {
        self.backend.write(ACCESS_TOKEN_KEY, token);
        self.backend
            .write(ACCESS_EXPIRY_KEY, &expires_at_ms.to_string());
    }

    /// The access token, only while unexpired. The boundary instant counts
    /// as expired. Never deletes.
    #[must_use]
    pub fn read_access_token(&self) -> Option<String> {
        self.read_access_token_at(clock::now_ms())
    }

    fn read_access_token_at(&self, now_ms: i64) -> Option<String> {
        let expires_at = self.read_expiry(ACCESS_EXPIRY_KEY)?;
        if now_ms >= expires_at {
            return None;
        }
        self.backend.read(ACCESS_TOKEN_KEY)
    }

    /// Whether the stored refresh token is present and unexpired, i.e.
    /// whether the session can still mint fresh access tokens.
    #[must_use]
    pub fn read_refresh_token_valid(&self) -> bool {
        self.read_refresh_token_valid_at(clock::now_ms())
    }

    fn read_refresh_token_valid_at(&self, now_ms: i64) -> bool {
        let Some(expires_at) = self.read_expiry(REFRESH_EXPIRY_KEY) else {
            return false;
        };
        now_ms < expires_at && self.backend.read(REFRESH_TOKEN_KEY).is_some()
    }

    /// Raw refresh-token read, without a validity check. The exchange call
    /// needs the value itself after validity has been established.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.backend.read(REFRESH_TOKEN_KEY)
    }

    /// Absolute expiry of the access token, if one is stored.
    #[must_use]
    pub fn access_token_expires_at(&self) -> Option<i64> {
        self.read_expiry(ACCESS_EXPIRY_KEY)
    }

    /// Delete all four fields.
    pub fn clear(&self) {
        self.backend.delete(ACCESS_TOKEN_KEY);
        self.backend.delete(ACCESS_EXPIRY_KEY);
        self.backend.delete(REFRESH_TOKEN_KEY);
        self.backend.delete(REFRESH_EXPIRY_KEY);
    }

    fn read_expiry(&self, key: &str) -> Option<i64> {
        let raw = self.backend.read(key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("discarding unparseable expiry under {key}: {raw:?}");
                None
            }
        }
    }
}
