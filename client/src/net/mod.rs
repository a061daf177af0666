//! Networking modules: transport, browser storage, typed REST helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` adapts the browser Fetch API to the core transport seam, `browser`
//! adapts localStorage and location, and `api` gives pages typed views over
//! the gateway's JSON responses.

pub mod api;
pub mod browser;
pub mod http;
