//! Password recovery page: sends a reset email.

use leptos::prelude::*;
use leptos_router::components::A;

use super::forms::validate_email;
use crate::state::route::Route;

#[component]
pub fn RecoverPasswordPage(on_recover: Callback<String>) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let hint = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_email(&email.get()) {
            Ok(address) => {
                hint.set(String::new());
                on_recover.run(address);
            }
            Err(message) => hint.set(message.to_owned()),
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Courses"</h1>
                <p class="login-card__subtitle">"Recover password"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit">
                        "Send reset email"
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
