//! Route guard for authenticated screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every warehouse route wraps its content in [`RequireAuth`], which waits
//! for the session bootstrap to settle and then either renders the page or
//! sends the visitor to `/login`. Route components get identical redirect
//! behavior without repeating it.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;

/// True once bootstrap has settled with nobody signed in.
fn should_redirect(state: &SessionState) -> bool {
    !state.is_loading() && !state.is_authenticated()
}

/// Renders `children` only for an authenticated session.
///
/// While the session provider is still initializing this shows a holding
/// message instead of redirecting, so a page reload with stored tokens
/// does not bounce through `/login`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if should_redirect(&session.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });

    view! {
        <Show
            when=move || session.get().is_authenticated()
            fallback=move || {
                view! {
                    <div class="guard-screen">
                        <p>
                            {move || {
                                if session.get().is_loading() {
                                    "Loading session..."
                                } else {
                                    "Redirecting to login..."
                                }
                            }}
                        </p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
