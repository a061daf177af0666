//! Items page: searchable stock list plus item creation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The list re-fetches whenever the search box changes. Creating an item
//! is limited to admin and warehouse roles and refetches the list on
//! success so the table reflects the server's row.

#[cfg(test)]
#[path = "items_test.rs"]
mod items_test;

use leptos::prelude::*;

use crate::app::ServicesHandle;
use crate::components::guard::RequireAuth;
use crate::components::nav::SideNav;
use crate::net::api::{self, Item, ItemDraft};
use crate::state::session::{RoleFlags, SessionState};

/// Roles allowed to add stock items.
fn can_manage_items(flags: RoleFlags) -> bool {
    flags.is_admin || flags.is_warehouse
}

/// Shape the form fields into a create request.
fn validate_item_draft(name: &str, sku: &str, quantity: &str) -> Result<ItemDraft, &'static str> {
    let name = name.trim();
    let sku = sku.trim();
    if name.is_empty() || sku.is_empty() {
        return Err("Name and SKU are required.");
    }
    let Ok(quantity) = quantity.trim().parse::<i64>() else {
        return Err("Quantity must be a whole number of 0 or more.");
    };
    if quantity < 0 {
        return Err("Quantity must be a whole number of 0 or more.");
    }
    Ok(ItemDraft {
        name: name.to_owned(),
        sku: sku.to_owned(),
        quantity,
    })
}

/// Table cell text for optional columns.
fn display_or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_owned())
}

#[component]
pub fn ItemsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let services = expect_context::<ServicesHandle>();

    let search = RwSignal::new(String::new());

    // Reading `search` here makes the list re-fetch on every edit.
    let items = LocalResource::new(move || {
        let term = search.get();
        let gateway = services.with_value(|s| s.gateway.clone());
        async move {
            api::fetch_items(&gateway, &term)
                .await
                .map_err(|e| e.to_string())
        }
    });

    view! {
        <RequireAuth>
            <div class="app-shell">
                <SideNav/>
                <main class="app-shell__content items-page">
                    <header class="page-head">
                        <h1>"Items"</h1>
                        <input
                            class="search-input"
                            type="search"
                            placeholder="Search by name or SKU..."
                            prop:value=move || search.get()
                            on:input=move |ev| search.set(event_target_value(&ev))
                        />
                    </header>
                    <Show when=move || can_manage_items(session.get().flags())>
                        <NewItemForm items=items/>
                    </Show>
                    <Suspense fallback=move || view! { <p>"Loading items..."</p> }>
                        {move || {
                            items
                                .get()
                                .map(|outcome| match outcome {
                                    Ok(rows) if rows.is_empty() => {
                                        view! { <p class="page-empty">"No items found."</p> }
                                            .into_any()
                                    }
                                    Ok(rows) => item_table(rows).into_any(),
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

fn item_table(rows: Vec<Item>) -> impl IntoView {
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"SKU"</th>
                    <th>"Quantity"</th>
                    <th>"Category"</th>
                    <th>"Location"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|item| {
                        view! {
                            <tr>
                                <td>{item.name}</td>
                                <td class="data-table__mono">{item.sku}</td>
                                <td>{item.quantity}</td>
                                <td>{display_or_dash(item.category)}</td>
                                <td>{display_or_dash(item.location)}</td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>()}
            </tbody>
        </table>
    }
}

/// Inline create form shown to stock-managing roles.
#[component]
fn NewItemForm(items: LocalResource<Result<Vec<Item>, String>>) -> impl IntoView {
    let services = expect_context::<ServicesHandle>();

    let name = RwSignal::new(String::new());
    let sku = RwSignal::new(String::new());
    let quantity = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let draft = match validate_item_draft(&name.get(), &sku.get(), &quantity.get()) {
            Ok(draft) => draft,
            Err(text) => {
                message.set(text.to_owned());
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let gateway = services.with_value(|s| s.gateway.clone());
            let items = items.clone();
            leptos::task::spawn_local(async move {
                match api::create_item(&gateway, &draft).await {
                    Ok(_) => {
                        name.set(String::new());
                        sku.set(String::new());
                        quantity.set(String::new());
                        message.set("Item added.".to_owned());
                        items.refetch();
                    }
                    Err(err) => message.set(format!("Could not add the item: {err}")),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = draft;
            let _ = &items;
            let _ = &services;
            busy.set(false);
        }
    };

    view! {
        <form class="item-form" on:submit=on_submit>
            <input
                class="item-form__input"
                type="text"
                placeholder="Name"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <input
                class="item-form__input"
                type="text"
                placeholder="SKU"
                prop:value=move || sku.get()
                on:input=move |ev| sku.set(event_target_value(&ev))
            />
            <input
                class="item-form__input item-form__input--qty"
                type="text"
                inputmode="numeric"
                placeholder="Qty"
                prop:value=move || quantity.get()
                on:input=move |ev| quantity.set(event_target_value(&ev))
            />
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                "Add Item"
            </button>
            <Show when=move || !message.get().is_empty()>
                <span class="item-form__message">{move || message.get()}</span>
            </Show>
        </form>
    }
}
