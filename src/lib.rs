#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
pub mod contact;
pub mod content;
pub mod lifecycle;
pub mod menu;
pub mod particles;
#[cfg(feature = "ssr")]
pub mod relay;
pub mod scroll;
pub mod toast;
pub mod typewriter;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("couldn't initialize logging: {e}");
    }
    leptos::mount::hydrate_body(App);
}
