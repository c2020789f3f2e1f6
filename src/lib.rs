/// Veil - tabbed proxy front end with stealth mode
/// Built with Rust + WASM + Yew

pub mod config;
pub mod error;
mod frame;
mod proxy;
mod resolver;
mod session;
mod stealth;
pub mod storage;
mod tab_data;
mod title;
mod widgets;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Expose the address-bar resolver for JavaScript callers
#[wasm_bindgen]
pub fn resolve_input(query: &str) -> String {
    resolver::resolve_input(query, &config::AppConfig::default()).unwrap_or_default()
}

// Start the Yew app in #app
#[wasm_bindgen]
pub fn start_app() {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"));

    match root {
        Some(root) => {
            yew::Renderer::<ui::app::App>::with_root(root).render();
        }
        None => {
            log::warn!("#app not found, rendering into body");
            yew::Renderer::<ui::app::App>::new().render();
        }
    }
}
