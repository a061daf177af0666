//! Reports page with warehouse-wide stock figures, admin only.

use leptos::prelude::*;

use crate::app::ServicesHandle;
use crate::components::guard::RequireAuth;
use crate::components::nav::SideNav;
use crate::net::api;
use crate::state::session::SessionState;

#[component]
pub fn ReportsPage() -> impl IntoView {
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
                <main class="app-shell__content reports-page">
                    <header class="page-head">
                        <h1>"Reports"</h1>
                    </header>
                    <Show
                        when=move || session.get().flags().is_admin
                        fallback=|| {
                            view! {
                                <p class="page-error">
                                    "Reports are only available to administrators."
                                </p>
                            }
                        }
                    >
                        <Suspense fallback=move || view! { <p>"Loading report..."</p> }>
                            {move || {
                                summary
                                    .get()
                                    .map(|outcome| match outcome {
                                        Ok(totals) => {
                                            view! {
                                                <table class="data-table data-table--narrow">
                                                    <tbody>
                                                        <tr>
                                                            <td>"Distinct items"</td>
                                                            <td>{totals.total_items}</td>
                                                        </tr>
                                                        <tr>
                                                            <td>"Units on hand"</td>
                                                            <td>{totals.total_quantity}</td>
                                                        </tr>
                                                        <tr>
                                                            <td>"Items below reorder level"</td>
                                                            <td>{totals.low_stock}</td>
                                                        </tr>
                                                    </tbody>
                                                </table>
                                            }
                                                .into_any()
                                        }
                                        Err(message) => {
                                            view! { <p class="page-error">{message}</p> }.into_any()
                                        }
                                    })
                            }}
                        </Suspense>
                    </Show>
                </main>
            </div>
        </RequireAuth>
    }
}
