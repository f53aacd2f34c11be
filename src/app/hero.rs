use leptos::prelude::*;
use leptos_use::use_interval_fn;

use crate::content::PORTFOLIO;
use crate::typewriter::Typewriter;

use super::dom::scroll_to_section;

const TICK_MS: u64 = 20;

#[component]
fn TypewriterText(words: Vec<String>) -> impl IntoView {
    let typewriter = StoredValue::new(Typewriter::new(&words));
    let (text, set_text) = signal(String::new());

    let _ = use_interval_fn(
        move || {
            let changed = typewriter.try_update_value(|t| t.advance(TICK_MS as f64).then(|| t.text()));
            if let Some(Some(s)) = changed {
                set_text(s);
            }
        },
        TICK_MS,
    );

    view! {
        <span>{text}</span>
        <span class="animate-pulse">"|"</span>
    }
}

#[component]
pub fn HeroSection() -> impl IntoView {
    let owner = &PORTFOLIO.owner;
    view! {
        <section id="home" class="relative h-screen flex items-center justify-center overflow-hidden">
            <div class="relative z-20 text-center text-white px-4 sm:px-6">
                <h1 class="text-4xl sm:text-6xl md:text-8xl font-bold mb-4 sm:mb-6 bg-gradient-to-r from-indigo-400 via-violet-400 to-white bg-clip-text text-transparent drop-shadow-2xl">
                    {owner.name.clone()}
                </h1>
                <div class="text-xl sm:text-2xl md:text-3xl mb-6 sm:mb-8 text-indigo-300 min-h-[2.5rem] sm:min-h-[3rem] flex items-center justify-center">
                    <TypewriterText words=PORTFOLIO.hero.roles.clone() />
                </div>
                <div class="flex flex-col sm:flex-row gap-4 justify-center px-4">
                    <button
                        class="bg-indigo-600 hover:bg-indigo-700 text-white px-6 sm:px-8 py-3 rounded-md text-base sm:text-lg font-semibold transform hover:scale-105 transition-all duration-500 shadow-lg"
                        on:click=move |_| scroll_to_section("projects")
                    >
                        "View My Work"
                    </button>
                    <button
                        class="border border-indigo-400 text-indigo-400 hover:bg-indigo-400 hover:text-white px-6 sm:px-8 py-3 rounded-md text-base sm:text-lg transform hover:scale-105 transition-all duration-500"
                        on:click=move |_| scroll_to_section("contact")
                    >
                        "Contact Me"
                    </button>
                </div>
            </div>
        </section>
    }
}
