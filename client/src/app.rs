//! Root application component with routing, context providers, and the portal shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the state signal and the controller once, provides both via
//! context, and kicks off session restoration. Every route renders `Portal`,
//! which asks [`select_view`] what to draw and wires page callbacks to
//! controller actions.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::hooks::use_location;
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::full_page::{FullPageLayout, FullPageLoader};
use crate::components::message::{FullPageMessage, IconVariant, Message};
use crate::config::ClientConfig;
use crate::controller::AppController;
use crate::net::courses::FirebaseCourses;
use crate::net::identity::FirebaseIdentity;
use crate::pages::{
    courses::CoursesPage, create_account::CreateAccountPage, login::LoginPage,
    recover_password::RecoverPasswordPage,
};
use crate::state::AppState;
use crate::state::route;
use crate::state::view::{Overlay, Screen, ViewSelection, select_view};

/// Controller bound to the app's reactive state.
pub type PortalController = AppController<RwSignal<AppState>>;

/// Context handle for the controller; its collaborators are not `Send`.
pub type ControllerHandle = StoredValue<PortalController, LocalStorage>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Run a controller action on the browser's task queue. Server renders never
/// trigger actions, so the future is dropped there.
fn dispatch(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(task);
    #[cfg(not(feature = "hydrate"))]
    drop(task);
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let body = match ClientConfig::from_build_env() {
        Ok(config) => {
            let state = RwSignal::new(AppState::default());
            let controller: ControllerHandle = StoredValue::new_local(PortalController::new(
                state,
                Rc::new(FirebaseIdentity::new(config.clone())),
                Rc::new(FirebaseCourses::new(config)),
            ));
            provide_context(state);
            provide_context(controller);

            // Mount-only: restoration is guarded inside the controller as well.
            Effect::new(move || {
                let controller = controller.get_value();
                dispatch(async move {
                    controller.restore_session().await;
                });
            });

            view! {
                <Router>
                    <Routes fallback=|| view! { <Portal/> }>
                        <Route path=StaticSegment("") view=Portal/>
                        <Route path=StaticSegment("login") view=Portal/>
                        <Route path=StaticSegment("create-account") view=Portal/>
                        <Route path=StaticSegment("recover-password") view=Portal/>
                    </Routes>
                </Router>
            }
            .into_any()
        }
        Err(err) => {
            log::error!("client configuration invalid: {err}");
            view! {
                <FullPageMessage
                    message=format!("Configuration error: {err}")
                    icon_variant=IconVariant::Error
                    button_label="Reload"
                    on_button_click=Callback::new(|()| reload_page())
                />
            }
            .into_any()
        }
    };

    view! {
        <Stylesheet id="leptos" href="/pkg/course-portal.css"/>
        <Title text="Courses"/>
        {body}
    }
}

fn reload_page() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}

/// Selection for the current path, plus the screen alone.
///
/// Pages own their input signals, so they are rebuilt only when `screen`
/// changes, never on an overlay transition.
fn view_memos(state: RwSignal<AppState>, pathname: Signal<String>) -> (Memo<ViewSelection>, Memo<Option<Screen>>) {
    let selection = Memo::new(move |_| {
        let current = route::Route::from_path(&pathname.get());
        state.with(|s| select_view(&s.session, current, &s.status))
    });
    let screen = Memo::new(move |_| selection.with(|s| s.screen));
    (selection, screen)
}

/// Screen + overlay for the current location.
#[component]
fn Portal() -> impl IntoView {
    let state = expect_context::<RwSignal<AppState>>();
    let controller = expect_context::<ControllerHandle>();
    let location = use_location();

    let (selection, screen) = view_memos(state, location.pathname.into());
    let courses = Signal::derive(move || state.with(|s| s.courses.clone()));
    let user_email = Signal::derive(move || {
        state.with(|s| s.session.user().map(|u| u.email.clone()).unwrap_or_default())
    });

    let on_login = Callback::new(move |(email, password): (String, String)| {
        let controller = controller.get_value();
        dispatch(async move {
            controller.login(&email, &password).await;
        });
    });
    let on_create_account = Callback::new(move |(email, password): (String, String)| {
        let controller = controller.get_value();
        dispatch(async move {
            controller.create_account(&email, &password).await;
        });
    });
    let on_recover = Callback::new(move |email: String| {
        let controller = controller.get_value();
        dispatch(async move {
            controller.recover_password(&email).await;
        });
    });
    let on_refresh = Callback::new(move |()| {
        let controller = controller.get_value();
        dispatch(async move {
            controller.refresh_courses().await;
        });
    });
    let on_log_out = Callback::new(move |()| {
        let controller = controller.get_value();
        dispatch(async move {
            if let Err(err) = controller.log_out().await {
                log::error!("log out failed: {err}");
            }
        });
    });
    let on_dismiss_error = Callback::new(move |()| controller.with_value(PortalController::dismiss_error));
    let on_dismiss_message = Callback::new(move |()| controller.with_value(PortalController::dismiss_message));

    view! {
        <div class="portal">
            {move || match screen.get() {
                Some(Screen::Courses) => {
                    view! {
                        <CoursesPage
                            courses=courses
                            user_email=user_email
                            on_log_out=on_log_out
                            on_refresh=on_refresh
                        />
                    }
                        .into_any()
                }
                Some(Screen::Login) => view! { <LoginPage on_login=on_login/> }.into_any(),
                Some(Screen::CreateAccount) => {
                    view! { <CreateAccountPage on_create_account=on_create_account/> }.into_any()
                }
                Some(Screen::RecoverPassword) => view! { <RecoverPasswordPage on_recover=on_recover/> }.into_any(),
                None => ().into_any(),
            }}
            {move || {
                selection
                    .with(|s| s.overlay.clone())
                    .map(|overlay| match overlay {
                        Overlay::Loader => view! { <FullPageLoader/> }.into_any(),
                        Overlay::Info(message) => {
                            view! {
                                <FullPageMessage
                                    message=message
                                    icon_variant=IconVariant::Info
                                    button_label="OK"
                                    on_button_click=on_dismiss_message
                                />
                            }
                                .into_any()
                        }
                        Overlay::Error(message) => {
                            view! {
                                <FullPageLayout class="full-page-error">
                                    <Message
                                        message=message
                                        icon_variant=IconVariant::Error
                                        on_button_click=on_dismiss_error
                                    />
                                </FullPageLayout>
                            }
                                .into_any()
                        }
                    })
            }}
        </div>
    }
}
