//! Login page with username + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use session::error::ApiError;

use crate::app::ServicesHandle;
use crate::state::session::SessionState;

/// Trim the username and require both fields.
///
/// The password is passed through untouched; leading or trailing spaces
/// may be part of it.
fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Message shown under the form when sign-in fails.
fn login_failed_message(err: &ApiError) -> String {
    match err {
        ApiError::Authentication(text) if !text.is_empty() => text.clone(),
        ApiError::Authentication(_) => "Login failed. Check your username and password.".to_owned(),
        other => format!("Login failed: {other}"),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let services = expect_context::<ServicesHandle>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Already signed in (or a login just completed): straight to the app.
    Effect::new(move || {
        if session.get().is_authenticated() {
            navigate("/", NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (username_value, password_value) =
            match validate_login_input(&username.get(), &password.get()) {
                Ok(values) => values,
                Err(text) => {
                    message.set(text.to_owned());
                    return;
                }
            };
        busy.set(true);
        message.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let controller = services.with_value(|s| s.controller.clone());
            leptos::task::spawn_local(async move {
                match controller.login(&username_value, &password_value).await {
                    Ok(snapshot) => {
                        session.set(SessionState::from_snapshot(&snapshot));
                    }
                    Err(err) => {
                        message.set(login_failed_message(&err));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (username_value, password_value);
            let _ = &services;
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Stockroom"</h1>
                <p class="login-card__subtitle">"Warehouse sign in"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !message.get().is_empty()>
                    <p class="login-message">{move || message.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "No account yet? "
                    <a href="/register">"Register"</a>
                </p>
            </div>
        </div>
    }
}
