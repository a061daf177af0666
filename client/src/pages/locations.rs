//! Locations page listing storage areas and their capacity.

use leptos::prelude::*;

use crate::app::ServicesHandle;
use crate::components::guard::RequireAuth;
use crate::components::nav::SideNav;
use crate::net::api;

#[component]
pub fn LocationsPage() -> impl IntoView {
    let services = expect_context::<ServicesHandle>();

    let locations = LocalResource::new(move || {
        let gateway = services.with_value(|s| s.gateway.clone());
        async move {
            api::fetch_locations(&gateway)
                .await
                .map_err(|e| e.to_string())
        }
    });

    view! {
        <RequireAuth>
            <div class="app-shell">
                <SideNav/>
                <main class="app-shell__content locations-page">
                    <header class="page-head">
                        <h1>"Locations"</h1>
                    </header>
                    <Suspense fallback=move || view! { <p>"Loading locations..."</p> }>
                        {move || {
                            locations
                                .get()
                                .map(|outcome| match outcome {
                                    Ok(rows) if rows.is_empty() => {
                                        view! { <p class="page-empty">"No locations defined."</p> }
                                            .into_any()
                                    }
                                    Ok(rows) => {
                                        view! {
                                            <table class="data-table">
                                                <thead>
                                                    <tr>
                                                        <th>"Name"</th>
                                                        <th>"Capacity"</th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    {rows
                                                        .into_iter()
                                                        .map(|location| {
                                                            let capacity = location
                                                                .capacity
                                                                .map_or_else(|| "-".to_owned(), |c| c.to_string());
                                                            view! {
                                                                <tr>
                                                                    <td>{location.name}</td>
                                                                    <td>{capacity}</td>
                                                                </tr>
                                                            }
                                                        })
                                                        .collect::<Vec<_>>()}
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
                </main>
            </div>
        </RequireAuth>
    }
}
