//! # client
//!
//! Leptos + WASM frontend for the record grid. Renders one REST collection
//! as a sortable, searchable, paginated table with create/edit dialogs and a
//! delete confirmation, all driven by the `grid` crate's session state.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
