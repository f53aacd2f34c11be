use std::time::Duration;

use leptos::prelude::*;

use crate::toast::{ToastId, ToastKind, Toaster, TOAST_DURATION_MS};

pub fn use_toaster() -> RwSignal<Toaster> {
    expect_context::<RwSignal<Toaster>>()
}

/// Removes a resolved toast once it has been on screen long enough.
pub fn dismiss_later(toaster: RwSignal<Toaster>, id: ToastId) {
    set_timeout(
        move || {
            toaster.try_update(|t| t.dismiss(id));
        },
        Duration::from_millis(TOAST_DURATION_MS),
    );
}

/// Shows a failure that has no request behind it.
pub fn flash_error(toaster: RwSignal<Toaster>, text: String) {
    if let Some(id) = toaster.try_update(|t| t.error(text)) {
        dismiss_later(toaster, id);
    }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toaster = use_toaster();

    view! {
        <div class="fixed top-4 left-1/2 -translate-x-1/2 z-[60] flex flex-col gap-2 items-center pointer-events-none">
            <For
                each=move || toaster.with(|t| t.toasts().to_vec())
                key=|toast| (toast.id, toast.kind)
                children=move |toast| {
                    let (icon, class) = match toast.kind {
                        ToastKind::Pending => ("…", "border-indigo-500/40 text-indigo-200"),
                        ToastKind::Success => ("✓", "border-green-500/40 text-green-300"),
                        ToastKind::Failure => ("✗", "border-red-500/40 text-red-300"),
                    };
                    view! {
                        <div
                            role="status"
                            class=format!(
                                "pointer-events-auto px-4 py-2 rounded-md bg-black/90 border shadow-lg text-sm {class}",
                            )
                        >
                            <span class="mr-2">{icon}</span>
                            {toast.text}
                        </div>
                    }
                }
            />
        </div>
    }
}
