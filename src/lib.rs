//! # catalog-console
//!
//! Leptos + WASM frontend for the multi-tenant catalog management console.
//!
//! The core of this crate is the session and authorization-gating
//! subsystem: the `state` module owns the session state machine and its
//! persisted credential, `net` is the single HTTP boundary every backend
//! call passes through, and the route gates in `components` decide which
//! screens may render. Pages are a thin layer over those pieces.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

/// Client-side entry point: install logging and panic reporting, then
/// hydrate the server-rendered DOM.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(crate::app::App);
}
