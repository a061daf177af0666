//! # client
//!
//! Leptos + WASM front end for the Stockroom warehouse application.
//!
//! This crate is the presentational layer: pages, navigation, and reactive
//! session context. All credential handling, token storage, and authenticated
//! HTTP traffic live in the `session` crate; this crate wires that core to
//! the browser (localStorage, Fetch, location) and renders the result.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

#[cfg(feature = "csr")]
use wasm_bindgen::prelude::wasm_bindgen;

/// Browser entry point: installs panic/log hooks and mounts the app.
#[cfg(feature = "csr")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
