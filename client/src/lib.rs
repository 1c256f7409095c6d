//! # client
//!
//! Leptos + WASM frontend for the course portal.
//!
//! This crate contains the application state machines, the controller that
//! sequences identity and course-data calls around them, the network
//! collaborators, and the pages/components that render the result. The
//! host binary renders [`app::shell`] on the server; the browser bundle
//! hydrates it through [`hydrate`].

pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;

/// Browser entry point: installs console logging and hydrates the SSR shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
