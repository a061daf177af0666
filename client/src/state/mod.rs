//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The session signal is the only cross-page state; everything else a page
//! needs (lists, filters, form fields) stays local to that page.

pub mod session;
