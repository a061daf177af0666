//! Browser storage and navigation glue.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only module that touches `web_sys` directly. Pages and the core stay
//! unaware of localStorage and `window.location`; they see the storage trait
//! and a redirect callback instead.

use session::tokens::TokenBackend;

/// Token persistence in `window.localStorage`.
///
/// Storage failures degrade to "no stored value": a browser that rejects
/// writes leaves the app signed out instead of crashing it.
#[derive(Debug, Default)]
pub struct BrowserBackend;

impl BrowserBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenBackend for BrowserBackend {
    fn read(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn write(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn delete(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// Hard-navigate to the login page, dropping all in-memory state.
pub fn redirect_to_login() {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
    }
}
