use leptos::{ev, html, prelude::*};
use leptos_use::{use_document, use_event_listener, use_window};
use wasm_bindgen::JsCast;

use crate::content::{NavigationItem, PORTFOLIO};
use crate::menu::{MenuEvent, MenuState, MobileMenu, PointerTarget};
use crate::scroll::ScrollTracker;

use super::dom::{scroll_to_section, section_rect, BodyScrollLock};

/// Active section id, re-evaluated on every scroll and resize.
fn use_active_section(sections: Vec<String>) -> ReadSignal<String> {
    let tracker = StoredValue::new(ScrollTracker::new(sections));
    let (active, set_active) = signal(tracker.with_value(|t| t.active().to_string()));

    let refresh = move || {
        let changed = tracker
            .try_update_value(|t| t.update(section_rect).map(str::to_string))
            .flatten();
        if let Some(id) = changed {
            set_active.set(id);
        }
    };

    let _ = use_event_listener(use_window(), ev::scroll, move |_| refresh());
    let _ = use_event_listener(use_window(), ev::resize, move |_| refresh());
    // sections are in the DOM by the time effects run
    Effect::new(move |_| refresh());

    active
}

#[component]
pub fn NavBar() -> impl IntoView {
    let items = PORTFOLIO.navigation.clone();
    let active = use_active_section(PORTFOLIO.section_ids());

    let (open, set_open) = signal(false);
    let menu = StoredValue::new(MobileMenu::new(BodyScrollLock));
    let dispatch = move |event: MenuEvent| {
        if let Some(state) = menu.try_update_value(|m| m.handle(event)) {
            set_open.set(state == MenuState::Open);
        }
    };
    on_cleanup(move || {
        menu.try_update_value(|m| m.release());
    });

    let menu_ref = NodeRef::<html::Div>::new();
    let toggle_ref = NodeRef::<html::Button>::new();
    let _ = use_event_listener(use_document(), ev::pointerdown, move |ev| {
        if !open.get_untracked() {
            return;
        }
        let node = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        let target = PointerTarget {
            in_menu: menu_ref
                .get_untracked()
                .is_some_and(|el| el.contains(node.as_ref())),
            in_toggle: toggle_ref
                .get_untracked()
                .is_some_and(|el| el.contains(node.as_ref())),
        };
        dispatch(MenuEvent::PointerDown(target));
    });

    let navigate = move |id: &str| {
        scroll_to_section(id);
        dispatch(MenuEvent::Navigate);
    };

    let home_id = items
        .first()
        .map(|i| i.id.clone())
        .unwrap_or_else(|| "home".to_string());
    let desktop_items = items.clone();

    view! {
        <nav class="fixed top-0 w-full z-50 bg-black/90 backdrop-blur-md border-b border-gray-800 transition-all duration-500">
            <div class="container mx-auto px-4 sm:px-6 py-4">
                <div class="flex justify-between items-center">
                    <div
                        class="text-xl sm:text-2xl font-bold text-indigo-400 cursor-pointer transition-all duration-300 hover:text-indigo-300"
                        on:click=move |_| navigate(&home_id)
                    >
                        {PORTFOLIO.owner.name.clone()}
                    </div>

                    <div class="hidden md:flex space-x-6 lg:space-x-8">
                        {desktop_items
                            .into_iter()
                            .map(|item| {
                                view! {
                                    <NavButton
                                        item
                                        active
                                        base_class="no-focus-outline px-2 py-2 text-white hover:text-indigo-400"
                                        on_select=navigate
                                    />
                                }
                            })
                            .collect_view()}
                    </div>

                    <button
                        node_ref=toggle_ref
                        class="md:hidden text-white text-2xl hover:text-indigo-400 transition-colors duration-300"
                        aria-label="Toggle navigation menu"
                        aria-expanded=move || open.get().to_string()
                        on:click=move |_| dispatch(MenuEvent::Toggle)
                    >
                        {move || if open.get() { "✕" } else { "☰" }}
                    </button>
                </div>

                <Show when=move || open.get()>
                    <div
                        node_ref=menu_ref
                        class="md:hidden mt-4 pb-4 border-t border-gray-800"
                    >
                        <div class="flex justify-end pt-2">
                            <button
                                class="text-gray-400 hover:text-white px-2"
                                aria-label="Close navigation menu"
                                on:click=move |_| dispatch(MenuEvent::Close)
                            >
                                "Close"
                            </button>
                        </div>
                        <div class="flex flex-col space-y-3 pt-2">
                            {items
                                .clone()
                                .into_iter()
                                .map(|item| {
                                    view! {
                                        <NavButton
                                            item
                                            active
                                            base_class="text-left px-2 py-2 text-white hover:text-indigo-400 transition-all duration-300"
                                            on_select=navigate
                                        />
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                </Show>
            </div>
        </nav>
    }
}

#[component]
fn NavButton<F>(
    item: NavigationItem,
    active: ReadSignal<String>,
    base_class: &'static str,
    on_select: F,
) -> impl IntoView
where
    F: Fn(&str) + Copy + Send + Sync + 'static,
{
    let NavigationItem { id, label } = item;
    let is_active = {
        let id = id.clone();
        move || active.with(|a| *a == id)
    };
    view! {
        <button
            class=move || {
                if is_active() { format!("{base_class} text-indigo-400") } else { base_class.to_string() }
            }
            on:click=move |_| on_select(&id)
        >
            {label}
        </button>
    }
}
