//! HTTP transport seam.
//!
//! The auth client and the gateway never touch a concrete HTTP library;
//! they hand fully-described requests to an [`HttpSend`] implementation.
//! The browser client implements it over `gloo-net`; unit tests use the
//! scripted double at the bottom of this module. Futures here are not
//! `Send` — the whole stack runs on one logical thread (browser event
//! loop, or a single-threaded executor under test).

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;

/// HTTP method subset used by the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Wire name of the method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully-described outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute-path URL, base path already applied.
    pub url: String,
    /// Access token to attach as `Authorization: Bearer <token>`, if any.
    pub bearer: Option<String>,
    /// JSON body; implies a JSON content type when present.
    pub body: Option<Value>,
}

/// Status and raw body of a settled request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport capable of delivering an [`HttpRequest`].
///
/// Implementations return `Err` only when no HTTP status was obtained
/// (offline, DNS failure, aborted request); any response with a status,
/// including 4xx/5xx, is an `Ok`.
#[async_trait(?Send)]
pub trait HttpSend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

// ===== SCRIPTED TEST TRANSPORT =====

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport double shared by the crate's unit tests.
    //!
    //! Replies are queued per URL and consumed in order; unscripted URLs
    //! answer 404. A reply marked `paused` yields to the executor once
    //! before settling, which lets tests interleave concurrent callers
    //! across the await point the way the browser event loop would.

    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use async_trait::async_trait;
    use serde_json::Value;

    use super::{HttpRequest, HttpResponse, HttpSend};
    use crate::error::ApiError;

    /// One canned reply.
    pub(crate) struct Reply {
        status: u16,
        body: String,
        paused: bool,
        network_failure: Option<String>,
    }

    impl Reply {
        pub(crate) fn json(status: u16, body: &Value) -> Self {
            Self {
                status,
                body: body.to_string(),
                paused: false,
                network_failure: None,
            }
        }

        pub(crate) fn text(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_owned(),
                paused: false,
                network_failure: None,
            }
        }

        pub(crate) fn empty(status: u16) -> Self {
            Self::text(status, "")
        }

        pub(crate) fn offline(message: &str) -> Self {
            Self {
                status: 0,
                body: String::new(),
                paused: false,
                network_failure: Some(message.to_owned()),
            }
        }

        /// Yield once to the executor before settling this reply.
        pub(crate) fn paused(mut self) -> Self {
            self.paused = true;
            self
        }
    }

    #[derive(Default)]
    pub(crate) struct ScriptedTransport {
        scripts: RefCell<HashMap<String, VecDeque<Reply>>>,
        log: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Queue a reply for the given full URL (base path included).
        pub(crate) fn script(&self, url: &str, reply: Reply) {
            self.scripts
                .borrow_mut()
                .entry(url.to_owned())
                .or_default()
                .push_back(reply);
        }

        /// Number of requests delivered to the given URL.
        pub(crate) fn calls_to(&self, url: &str) -> usize {
            self.log.borrow().iter().filter(|r| r.url == url).count()
        }

        /// Every request delivered, in arrival order.
        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.log.borrow().clone()
        }

        /// Bearer attached to the most recent request for the given URL.
        pub(crate) fn last_bearer_to(&self, url: &str) -> Option<String> {
            self.log
                .borrow()
                .iter()
                .rev()
                .find(|r| r.url == url)
                .and_then(|r| r.bearer.clone())
        }
    }

    #[async_trait(?Send)]
    impl HttpSend for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let url = request.url.clone();
            self.log.borrow_mut().push(request);
            let reply = self
                .scripts
                .borrow_mut()
                .get_mut(&url)
                .and_then(VecDeque::pop_front);
            let Some(reply) = reply else {
                return Ok(HttpResponse {
                    status: 404,
                    body: String::new(),
                });
            };
            if reply.paused {
                yield_once().await;
            }
            match reply.network_failure {
                Some(message) => Err(ApiError::Network(message)),
                None => Ok(HttpResponse {
                    status: reply.status,
                    body: reply.body,
                }),
            }
        }
    }

    /// Suspend once, waking immediately, so sibling futures get a turn.
    pub(crate) async fn yield_once() {
        struct YieldOnce(bool);

        impl Future for YieldOnce {
            type Output = ();

            fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
                if self.0 {
                    Poll::Ready(())
                } else {
                    self.0 = true;
                    cx.waker().wake_by_ref();
                    Poll::Pending
                }
            }
        }

        YieldOnce(false).await;
    }
}
