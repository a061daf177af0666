//! Authentication and session lifecycle for the Stockroom warehouse front end.
//!
//! This crate is the engine behind the SPA's login state: it owns token
//! persistence, the refresh-token exchange, and the authenticated HTTP
//! gateway every data fetch goes through. It is platform-agnostic by
//! design — the browser client plugs in a `localStorage` token backend and
//! a `gloo-net` transport, while native test builds substitute in-memory
//! doubles and run the whole stack on a single-threaded executor.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`tokens`] | Expiry-aware token persistence behind [`tokens::TokenBackend`] |
//! | [`auth`] | Login, registration, logout, and the refresh exchange |
//! | [`gateway`] | Authenticated request chokepoint with single-flight refresh |
//! | [`controller`] | Session bootstrap and identity population |
//! | [`jwt`] | Unverified JWT payload decoding (informational only) |
//! | [`http`] | Transport seam ([`http::HttpSend`]) and request/response types |
//! | [`error`] | The [`error::ApiError`] taxonomy |
//! | [`config`] | API base path and refresh leeway settings |

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod http;
pub mod jwt;
pub mod tokens;

pub(crate) mod clock;
