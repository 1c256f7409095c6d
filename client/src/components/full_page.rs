//! Full-page layout wrapper and loading overlay.

use leptos::prelude::*;

/// Centers its children over the whole viewport.
#[component]
pub fn FullPageLayout(#[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    view! { <div class=format!("full-page-layout {class}")>{children()}</div> }
}

/// Blocking spinner shown while an action is in flight.
#[component]
pub fn FullPageLoader() -> impl IntoView {
    view! {
        <FullPageLayout class="full-page-loader">
            <div class="full-page-loader__spinner" role="progressbar" aria-label="Loading"></div>
        </FullPageLayout>
    }
}
