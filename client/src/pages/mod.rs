//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: it wires signals and
//! resources to the shared service graph and delegates chrome to
//! `components`. Form handling and response shaping live in small plain
//! functions next to each page so they stay unit-testable.

pub mod categories;
pub mod dashboard;
pub mod items;
pub mod locations;
pub mod login;
pub mod register;
pub mod reports;
pub mod transactions;
