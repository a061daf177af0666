//! Navigation rail shared by every authenticated screen.

use leptos::prelude::*;

use crate::app::ServicesHandle;
use crate::net::browser;
use crate::state::session::SessionState;

/// Left-hand navigation with role-gated links and the signed-in identity.
#[component]
pub fn SideNav() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let services = expect_context::<ServicesHandle>();

    let identity = move || {
        let state = session.get();
        (
            state.username.unwrap_or_else(|| "account".to_owned()),
            state.role.unwrap_or_else(|| "member".to_owned()),
        )
    };

    // Logout is local-only: drop tokens, reset state, hard-redirect so no
    // in-memory view of the old session survives.
    let on_logout = move |_| {
        let snapshot = services.with_value(|s| s.controller.logout());
        session.set(SessionState::from_snapshot(&snapshot));
        browser::redirect_to_login();
    };

    view! {
        <aside class="side-nav">
            <div class="side-nav__brand">"Stockroom"</div>
            <nav class="side-nav__links">
                <a class="side-nav__link" href="/">"Dashboard"</a>
                <a class="side-nav__link" href="/items">"Items"</a>
                <a class="side-nav__link" href="/categories">"Categories"</a>
                <a class="side-nav__link" href="/locations">"Locations"</a>
                <a class="side-nav__link" href="/transactions">"Transactions"</a>
                <Show when=move || session.get().flags().is_admin>
                    <a class="side-nav__link" href="/reports">"Reports"</a>
                </Show>
            </nav>
            <div class="side-nav__footer">
                <span class="side-nav__user">{move || identity().0}</span>
                <span class="side-nav__role">{move || identity().1}</span>
                <button class="btn side-nav__logout" on:click=on_logout>
                    "Logout"
                </button>
            </div>
        </aside>
    }
}
