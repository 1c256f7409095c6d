//! Account creation page.

use leptos::prelude::*;
use leptos_router::components::A;

use super::forms::validate_credentials;
use crate::state::route::Route;

#[component]
pub fn CreateAccountPage(on_create_account: Callback<(String, String)>) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let repeated = RwSignal::new(String::new());
    let hint = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if password.get() != repeated.get() {
            hint.set("Passwords do not match.".to_owned());
            return;
        }
        match validate_credentials(&email.get(), &password.get()) {
            Ok(credentials) => {
                hint.set(String::new());
                on_create_account.run(credentials);
            }
            Err(message) => hint.set(message.to_owned()),
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Courses"</h1>
                <p class="login-card__subtitle">"Create account"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Repeat password"
                        prop:value=move || repeated.get()
                        on:input=move |ev| repeated.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit">
                        "Create account"
                    </button>
                </form>
                <Show when=move || !hint.get().is_empty()>
                    <p class="login-message">{move || hint.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <A href=Route::Login.path()>"Back to login"</A>
            </div>
        </div>
    }
}
