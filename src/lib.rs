mod api;
mod app;
mod bookmarks;
mod components;
mod config;
mod dashboard;
mod logging;
mod models;
mod pages;
mod state;
mod storage;
mod util;
mod worker;

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
pub use worker::{handle_worker_event, start_background_worker};

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();

    // The service worker loads the same module and has no window to mount
    // into; its script calls `start_background_worker` instead.
    if web_sys::window().is_none() {
        return;
    }
    mount_to_body(app::App);
}
