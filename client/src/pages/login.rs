//! Login page with email + password sign-in.

use leptos::prelude::*;
use leptos_router::components::A;

use super::forms::validate_credentials;
use crate::state::route::Route;

#[component]
pub fn LoginPage(on_login: Callback<(String, String)>) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let hint = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_credentials(&email.get(), &password.get()) {
            Ok(credentials) => {
                hint.set(String::new());
                on_login.run(credentials);
            }
            Err(message) => hint.set(message.to_owned()),
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Courses"</h1>
                <p class="login-card__subtitle">"Sign in"</p>
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
                    <button class="login-button" type="submit">
                        "Login"
                    </button>
                </form>
                <Show when=move || !hint.get().is_empty()>
                    <p class="login-message">{move || hint.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <A href=Route::CreateAccount.path()>"Create account"</A>
                <A href=Route::RecoverPassword.path()>"Forgot password?"</A>
            </div>
        </div>
    }
}
