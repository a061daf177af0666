//! Authenticated request gateway.
//!
//! ARCHITECTURE
//! ============
//! Every data fetch in the application funnels through one `ApiGateway`
//! instance, which owns the three behaviors pages must never reimplement:
//! attaching the bearer token, refreshing it (proactively near expiry,
//! reactively on a 401), and coordinating concurrent refreshes. The
//! refresh flight state lives on the instance — the app constructs one
//! gateway at startup and hands it out by `Rc` — so tests get isolated
//! state instead of cross-contaminating module globals.
//!
//! DESIGN
//! ======
//! Single-flight refresh: the first caller to need a refresh becomes the
//! leader and performs the exchange; callers arriving while it is in
//! flight park a oneshot sender on the wait queue and share the leader's
//! outcome. Whatever the concurrency level, at most one refresh request
//! is ever outstanding. The flight state sits in a `RefCell` whose
//! borrows are confined to short synchronous sections — never held
//! across an await.
//!
//! TRADE-OFFS
//! ==========
//! A transport call that never settles leaves followers parked forever;
//! there are no timeouts here, matching the rest of the stack. A 401 is
//! retried exactly once after a successful refresh — a second 401 means
//! the server disagrees about the fresh token and the session is ended
//! rather than looped.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use serde_json::{Map, Value};

use crate::auth::AuthClient;
use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, HttpSend, Method};

/// Invoked when the session is terminally dead (no refresh possible).
/// The browser client installs a redirect to the login view here.
pub type SessionExpiredHook = Box<dyn Fn()>;

#[derive(Default)]
struct RefreshFlight {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<Option<String>>>,
}

enum FlightRole {
    Leader,
    Follower(oneshot::Receiver<Option<String>>),
}

/// Single chokepoint for authenticated REST calls.
pub struct ApiGateway {
    auth: Rc<AuthClient>,
    transport: Rc<dyn HttpSend>,
    config: SessionConfig,
    flight: RefCell<RefreshFlight>,
    on_session_expired: SessionExpiredHook,
}

impl ApiGateway {
    #[must_use]
    pub fn new(
        auth: Rc<AuthClient>,
        transport: Rc<dyn HttpSend>,
        config: SessionConfig,
        on_session_expired: SessionExpiredHook,
    ) -> Self {
        Self {
            auth,
            transport,
            config,
            flight: RefCell::new(RefreshFlight::default()),
            on_session_expired,
        }
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::call`].
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.call(Method::Get, path, None).await
    }

    /// `POST` a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::call`].
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.call(Method::Post, path, Some(body)).await
    }

    /// `PUT` a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::call`].
    pub async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.call(Method::Put, path, Some(body)).await
    }

    /// `DELETE` a resource.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::call`].
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.call(Method::Delete, path, None).await
    }

    /// Dispatch an API call with token attach, refresh, and one 401 retry.
    ///
    /// An empty 2xx body decodes to `{}` so callers can treat every
    /// success uniformly as JSON.
    ///
    /// # Errors
    ///
    /// `SessionExpired` when the session dies during token acquisition or
    /// the 401 retry (the store is already cleared and the login redirect
    /// fired); `Http` for any other non-2xx; `MalformedResponse` for an
    /// undecodable body; `Network` for transport failures.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        // Proactive refresh, skipped when one is already running; a failure
        // here surfaces through the token read below.
        if self.auth.is_token_expiring_soon()
            && self.auth.is_authenticated()
            && !self.refresh_in_flight()
        {
            self.shared_refresh().await;
        }

        let had_session = self.auth.has_refresh_token();
        let token = self.bearer_token().await;
        if had_session && token.is_none() {
            // The refresh path already logged the session out.
            (self.on_session_expired)();
            return Err(ApiError::SessionExpired);
        }

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: self.config.endpoint(path),
                bearer: token,
                body: body.clone(),
            })
            .await?;

        if response.status == 401 && self.auth.has_refresh_token() && !is_auth_path(path) {
            log::debug!("401 from {path}, refreshing and retrying once");
            let Some(fresh) = self.shared_refresh().await else {
                (self.on_session_expired)();
                return Err(ApiError::SessionExpired);
            };
            let retry = self
                .transport
                .send(HttpRequest {
                    method,
                    url: self.config.endpoint(path),
                    bearer: Some(fresh),
                    body,
                })
                .await?;
            if retry.status == 401 {
                // The server rejects even a freshly-minted token; end the
                // session instead of looping.
                log::warn!("retry after refresh still unauthorized for {path}");
                self.auth.logout();
                (self.on_session_expired)();
                return Err(ApiError::SessionExpired);
            }
            return decode_response(&retry);
        }

        decode_response(&response)
    }

    /// A usable access token: the stored one while live, otherwise the
    /// outcome of a (shared) refresh. `None` means no session exists or
    /// the refresh failed and the session was cleared.
    ///
    /// A stored-but-stale refresh token still enters the refresh path;
    /// the auth client detects it there, skips the network, and clears
    /// the session, which is what routes "session rotted while the tab
    /// was closed" to the login view instead of anonymous dispatch.
    pub async fn bearer_token(&self) -> Option<String> {
        if let Some(token) = self.auth.token() {
            return Some(token);
        }
        if !self.auth.has_refresh_token() {
            return None;
        }
        self.shared_refresh().await
    }

    fn refresh_in_flight(&self) -> bool {
        self.flight.borrow().in_flight
    }

    /// Join the current refresh cycle, starting one if none is running.
    fn join_flight(&self) -> FlightRole {
        let mut flight = self.flight.borrow_mut();
        if flight.in_flight {
            let (sender, receiver) = oneshot::channel();
            flight.waiters.push(sender);
            FlightRole::Follower(receiver)
        } else {
            flight.in_flight = true;
            FlightRole::Leader
        }
    }

    /// Single-flight refresh: one leader performs the exchange while every
    /// concurrent caller waits on the queue, and all of them observe the
    /// same outcome.
    async fn shared_refresh(&self) -> Option<String> {
        match self.join_flight() {
            FlightRole::Leader => {
                let outcome = self.auth.refresh_access_token().await;
                let waiters = {
                    let mut flight = self.flight.borrow_mut();
                    flight.in_flight = false;
                    std::mem::take(&mut flight.waiters)
                };
                log::debug!("refresh settled, releasing {} waiter(s)", waiters.len());
                for waiter in waiters {
                    // A dropped receiver means that caller is gone; the
                    // outcome still reaches everyone else.
                    let _ = waiter.send(outcome.clone());
                }
                outcome
            }
            FlightRole::Follower(receiver) => receiver.await.unwrap_or(None),
        }
    }
}

/// Auth endpoints handle their own status codes; a 401 from them must not
/// trigger the refresh cycle.
fn is_auth_path(path: &str) -> bool {
    path.starts_with("/auth/")
}

/// Empty 2xx bodies decode to `{}`; non-2xx statuses and undecodable
/// bodies map to their taxonomy errors.
fn decode_response(response: &HttpResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Http {
            status: response.status,
        });
    }
    let raw = response.body.trim();
    if raw.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(raw).map_err(|_| ApiError::MalformedResponse)
}
