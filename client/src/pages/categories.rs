//! Categories page listing item groupings and their match keywords.

use leptos::prelude::*;

use crate::app::ServicesHandle;
use crate::components::guard::RequireAuth;
use crate::components::nav::SideNav;
use crate::net::api;

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let services = expect_context::<ServicesHandle>();

    let categories = LocalResource::new(move || {
        let gateway = services.with_value(|s| s.gateway.clone());
        async move {
            api::fetch_categories(&gateway)
                .await
                .map_err(|e| e.to_string())
        }
    });

    view! {
        <RequireAuth>
            <div class="app-shell">
                <SideNav/>
                <main class="app-shell__content categories-page">
                    <header class="page-head">
                        <h1>"Categories"</h1>
                    </header>
                    <Suspense fallback=move || view! { <p>"Loading categories..."</p> }>
                        {move || {
                            categories
                                .get()
                                .map(|outcome| match outcome {
                                    Ok(rows) if rows.is_empty() => {
                                        view! { <p class="page-empty">"No categories defined."</p> }
                                            .into_any()
                                    }
                                    Ok(rows) => {
                                        view! {
                                            <table class="data-table">
                                                <thead>
                                                    <tr>
                                                        <th>"Name"</th>
                                                        <th>"Keywords"</th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    {rows
                                                        .into_iter()
                                                        .map(|category| {
                                                            let keywords = if category.keywords.is_empty() {
                                                                "-".to_owned()
                                                            } else {
                                                                category.keywords.join(", ")
                                                            };
                                                            view! {
                                                                <tr>
                                                                    <td>{category.name}</td>
                                                                    <td>{keywords}</td>
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
