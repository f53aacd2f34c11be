use leptos::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::menu::ScrollLock;
use crate::scroll::SectionRect;

/// Bounding rect of the section element with this id, if it is mounted.
pub fn section_rect(id: &str) -> Option<SectionRect> {
    let rect = document().get_element_by_id(id)?.get_bounding_client_rect();
    Some(SectionRect {
        top: rect.top(),
        bottom: rect.bottom(),
    })
}

/// Eased scroll so the section's top meets the top of the viewport.
pub fn scroll_to_section(id: &str) {
    let Some(el) = document().get_element_by_id(id) else {
        log::debug!("scroll target #{id} is not mounted");
        return;
    };
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    opts.set_inline(ScrollLogicalPosition::Nearest);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}

pub fn open_in_new_tab(url: &str) {
    if let Err(e) = window().open_with_url_and_target(url, "_blank") {
        log::warn!("couldn't open {url}: {e:?}");
    }
}

pub fn viewport_size() -> (f64, f64) {
    let w = window();
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (dim(w.inner_width()), dim(w.inner_height()))
}

/// Locks page scrolling by setting `overflow: hidden` on `<body>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyScrollLock;

impl ScrollLock for BodyScrollLock {
    fn set_locked(&mut self, locked: bool) {
        // no document while rendering on the server
        if cfg!(feature = "ssr") {
            return;
        }
        let Some(body) = document().body() else {
            return;
        };
        let style = body.style();
        let res = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        if let Err(e) = res {
            log::warn!("couldn't update body scroll lock: {e:?}");
        }
    }
}
