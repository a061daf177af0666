//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome shared across routes while reading session
//! state and services from Leptos context providers.

pub mod guard;
pub mod nav;
