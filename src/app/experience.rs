use leptos::prelude::*;

use crate::content::{Experience, PORTFOLIO};

#[component]
pub fn ExperienceSection() -> impl IntoView {
    view! {
        <section id="experience" class="relative py-16 sm:py-20 px-4 sm:px-6 bg-gray-900/20">
            <div class="relative z-20 container mx-auto max-w-4xl">
                <h2 class="text-3xl sm:text-4xl font-bold text-center mb-12 sm:mb-16 bg-gradient-to-r from-purple-400 via-indigo-400 to-violet-400 bg-clip-text text-transparent">
                    "Experience"
                </h2>
                <div class="space-y-6 sm:space-y-8">
                    {PORTFOLIO
                        .experience
                        .iter()
                        .map(|exp| view! { <ExperienceCard exp=exp.clone() /> })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn ExperienceCard(exp: Experience) -> impl IntoView {
    view! {
        <div class="bg-black/80 border border-gray-800 hover:border-indigo-500/40 rounded-lg p-6 transition-all duration-500">
            <div class="flex flex-col sm:flex-row sm:justify-between sm:items-start gap-2 mb-3">
                <div>
                    <h3 class="text-lg sm:text-xl font-semibold text-white">{exp.title}</h3>
                    <p class="text-indigo-400">{exp.company}</p>
                </div>
                <span class="text-sm text-gray-400 whitespace-nowrap">{exp.period}</span>
            </div>
            <p class="text-gray-300 mb-4 leading-relaxed">{exp.description}</p>
            <div class="flex flex-wrap gap-2">
                {exp
                    .technologies
                    .into_iter()
                    .map(|t| {
                        view! {
                            <span class="px-2 py-1 text-xs rounded-md bg-indigo-500/10 text-indigo-300 border border-indigo-500/20">
                                {t}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
