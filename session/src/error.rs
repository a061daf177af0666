//! Error taxonomy for session and gateway operations.
//!
//! The gateway recovers locally only from the 401-refresh-retry cycle and
//! the proactive refresh path; everything else lands here and is surfaced
//! to the calling page. Network failures are deliberately not subdivided
//! (offline, DNS, and aborted requests all behave the same to the UI).

use thiserror::Error;

/// Failure of an auth or gateway operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login or registration rejected by the server. Carries the server's
    /// message when one was provided, for display on the form.
    #[error("authentication rejected: {0}")]
    Authentication(String),

    /// The session can no longer produce a valid access token. The store
    /// has already been cleared and the login redirect fired by the time
    /// a caller sees this.
    #[error("session expired")]
    SessionExpired,

    /// Non-2xx response outside the 401-recovery path.
    #[error("request failed with status {status}")]
    Http {
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// 2xx response whose non-empty body was not valid JSON.
    #[error("response body is not valid json")]
    MalformedResponse,

    /// Transport-level failure with no HTTP status attached.
    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    /// True for failures that end the session rather than a single call.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}
