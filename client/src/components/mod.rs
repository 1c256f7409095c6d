//! Reusable presentational components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render full-page chrome and overlays from props only; pages and
//! the app shell decide what to show.

pub mod full_page;
pub mod message;
