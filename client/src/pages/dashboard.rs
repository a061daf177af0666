//! Dashboard page with a stock overview.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It greets the signed-in user
//! and shows warehouse-wide stock totals fetched through the gateway.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::app::ServicesHandle;
use crate::components::guard::RequireAuth;
use crate::components::nav::SideNav;
use crate::net::api::{self, StockSummary};
use crate::state::session::SessionState;

/// Greeting line for the page header.
fn greeting_line(state: &SessionState) -> String {
    match &state.username {
        Some(name) => format!("Welcome back, {name}."),
        None => "Welcome back.".to_owned(),
    }
}

/// Stat cards in display order.
fn summary_cards(summary: &StockSummary) -> Vec<(&'static str, i64)> {
    vec![
        ("Items", summary.total_items),
        ("Units on hand", summary.total_quantity),
        ("Low stock", summary.low_stock),
    ]
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let services = expect_context::<ServicesHandle>();

    let summary = LocalResource::new(move || {
        let gateway = services.with_value(|s| s.gateway.clone());
        async move {
            api::fetch_stock_summary(&gateway)
                .await
                .map_err(|e| e.to_string())
        }
    });

    view! {
        <RequireAuth>
            <div class="app-shell">
                <SideNav/>
                <main class="app-shell__content dashboard-page">
                    <header class="page-head">
                        <h1>"Dashboard"</h1>
                        <p class="page-head__sub">{move || greeting_line(&session.get())}</p>
                    </header>
                    <Suspense fallback=move || view! { <p>"Loading stock summary..."</p> }>
                        {move || {
                            summary
                                .get()
                                .map(|outcome| match outcome {
                                    Ok(totals) => {
                                        view! {
                                            <div class="stat-grid">
                                                {summary_cards(&totals)
                                                    .into_iter()
                                                    .map(|(label, value)| {
                                                        view! {
                                                            <div class="stat-card">
                                                                <span class="stat-card__value">{value}</span>
                                                                <span class="stat-card__label">{label}</span>
                                                            </div>
                                                        }
                                                    })
                                                    .collect::<Vec<_>>()}
                                            </div>
                                        }
                                            .into_any()
                                    }
                                    Err(message) => {
                                        view! { <p class="page-error">{message}</p> }.into_any()
                                    }
                                })
                        }}
                    </Suspense>
                </main>
            </div>
        </RequireAuth>
    }
}
