//! Self-service registration page.
//!
//! Registration alone never signs anyone in; on success the page chains
//! straight into a normal login with the same credentials.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use session::auth::Registration;
use session::error::ApiError;

use crate::app::ServicesHandle;
use crate::state::session::SessionState;

/// Shape the form fields into a registration request.
///
/// Roles are not chosen here; an admin assigns one later.
fn validate_registration_input(
    username: &str,
    password: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Registration, &'static str> {
    let username = username.trim();
    let email = email.trim();
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    if username.is_empty()
        || password.is_empty()
        || email.is_empty()
        || first_name.is_empty()
        || last_name.is_empty()
    {
        return Err("All fields are required.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    if password.len() < 8 {
        return Err("Password must be at least 8 characters.");
    }
    Ok(Registration {
        username: username.to_owned(),
        password: password.to_owned(),
        email: email.to_owned(),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        role: None,
    })
}

/// Message shown under the form when registration fails.
fn registration_failed_message(err: &ApiError) -> String {
    match err {
        ApiError::Authentication(text) if !text.is_empty() => text.clone(),
        ApiError::Authentication(_) => "Registration was rejected.".to_owned(),
        other => format!("Registration failed: {other}"),
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let services = expect_context::<ServicesHandle>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

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
        let registration = match validate_registration_input(
            &username.get(),
            &password.get(),
            &email.get(),
            &first_name.get(),
            &last_name.get(),
        ) {
            Ok(registration) => registration,
            Err(text) => {
                message.set(text.to_owned());
                return;
            }
        };
        busy.set(true);
        message.set("Creating account...".to_owned());

        #[cfg(feature = "csr")]
        {
            let controller = services.with_value(|s| s.controller.clone());
            leptos::task::spawn_local(async move {
                match controller.register_and_login(&registration).await {
                    Ok(snapshot) => {
                        session.set(SessionState::from_snapshot(&snapshot));
                    }
                    Err(err) => {
                        message.set(registration_failed_message(&err));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = registration;
            let _ = &services;
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Stockroom"</h1>
                <p class="login-card__subtitle">"Create an account"</p>
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
                        type="email"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <div class="login-form__row">
                        <input
                            class="login-input"
                            type="text"
                            placeholder="First name"
                            prop:value=move || first_name.get()
                            on:input=move |ev| first_name.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Last name"
                            prop:value=move || last_name.get()
                            on:input=move |ev| last_name.set(event_target_value(&ev))
                        />
                    </div>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password (8+ characters)"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Register"
                    </button>
                </form>
                <Show when=move || !message.get().is_empty()>
                    <p class="login-message">{move || message.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
