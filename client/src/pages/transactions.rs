//! Transactions page listing recent stock movements.

#[cfg(test)]
#[path = "transactions_test.rs"]
mod transactions_test;

use leptos::prelude::*;

use crate::app::ServicesHandle;
use crate::components::guard::RequireAuth;
use crate::components::nav::SideNav;
use crate::net::api;

/// Human-readable form of the server's transaction type constant.
fn kind_label(kind: &str) -> String {
    let mut label = kind.trim().replace('_', " ").to_lowercase();
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    label
}

#[component]
pub fn TransactionsPage() -> impl IntoView {
    let services = expect_context::<ServicesHandle>();

    let transactions = LocalResource::new(move || {
        let gateway = services.with_value(|s| s.gateway.clone());
        async move {
            api::fetch_transactions(&gateway)
                .await
                .map_err(|e| e.to_string())
        }
    });

    view! {
        <RequireAuth>
            <div class="app-shell">
                <SideNav/>
                <main class="app-shell__content transactions-page">
                    <header class="page-head">
                        <h1>"Transactions"</h1>
                    </header>
                    <Suspense fallback=move || view! { <p>"Loading transactions..."</p> }>
                        {move || {
                            transactions
                                .get()
                                .map(|outcome| match outcome {
                                    Ok(rows) if rows.is_empty() => {
                                        view! { <p class="page-empty">"No transactions recorded."</p> }
                                            .into_any()
                                    }
                                    Ok(rows) => {
                                        view! {
                                            <table class="data-table">
                                                <thead>
                                                    <tr>
                                                        <th>"Date"</th>
                                                        <th>"Type"</th>
                                                        <th>"Item"</th>
                                                        <th>"Quantity"</th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    {rows
                                                        .into_iter()
                                                        .map(|record| {
                                                            let label = kind_label(&record.kind);
                                                            view! {
                                                                <tr>
                                                                    <td class="data-table__mono">{record.created_at}</td>
                                                                    <td>{label}</td>
                                                                    <td>{record.item_name}</td>
                                                                    <td>{record.quantity}</td>
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
