//! Message box with an icon and a single dismiss button.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use leptos::prelude::*;

use super::full_page::FullPageLayout;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IconVariant {
    #[default]
    Info,
    Error,
}

impl IconVariant {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "message__icon message__icon--info",
            Self::Error => "message__icon message__icon--error",
        }
    }

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Error => "!",
        }
    }
}

/// Inline message card.
#[component]
pub fn Message(
    #[prop(into)] message: String,
    #[prop(optional)] icon_variant: IconVariant,
    #[prop(into, default = "OK".to_owned())] button_label: String,
    #[prop(optional, into)] class: String,
    on_button_click: Callback<()>,
) -> impl IntoView {
    view! {
        <div class=format!("message {class}")>
            <span class=icon_variant.class() aria-hidden="true">{icon_variant.glyph()}</span>
            <p class="message__text">{message}</p>
            <button class="btn message__button" on:click=move |_| on_button_click.run(())>
                {button_label}
            </button>
        </div>
    }
}

/// [`Message`] centered over the whole page.
#[component]
pub fn FullPageMessage(
    #[prop(into)] message: String,
    #[prop(optional)] icon_variant: IconVariant,
    #[prop(into, default = "OK".to_owned())] button_label: String,
    on_button_click: Callback<()>,
) -> impl IntoView {
    view! {
        <FullPageLayout class="full-page-message">
            <Message
                message=message
                icon_variant=icon_variant
                button_label=button_label
                on_button_click=on_button_click
            />
        </FullPageLayout>
    }
}
