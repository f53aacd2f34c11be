use leptos::prelude::*;

use crate::content::{SkillGroup, PORTFOLIO};

#[component]
pub fn SkillsSection() -> impl IntoView {
    view! {
        <section id="skills" class="relative py-16 sm:py-20 px-4 sm:px-6">
            <div class="relative z-20 container mx-auto max-w-6xl">
                <h2 class="text-3xl sm:text-4xl font-bold text-center mb-12 sm:mb-16 bg-gradient-to-r from-indigo-400 via-violet-400 to-purple-400 bg-clip-text text-transparent">
                    "Skills & Technologies"
                </h2>
                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6 sm:gap-8">
                    {PORTFOLIO
                        .skills
                        .iter()
                        .map(|group| view! { <SkillCard group=group.clone() /> })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn SkillCard(group: SkillGroup) -> impl IntoView {
    view! {
        <div class="bg-black/80 border border-gray-800 hover:border-violet-500/40 rounded-lg p-6 transition-all duration-500">
            <h3 class="text-lg font-semibold text-white mb-4">{group.title}</h3>
            <div class="grid grid-cols-2 sm:grid-cols-3 gap-3">
                {group
                    .skills
                    .into_iter()
                    .map(|skill| {
                        view! {
                            <div class="flex flex-col items-center gap-2 p-3 rounded-md bg-gray-900/60 hover:bg-gray-800 transition-colors duration-300">
                                <img src=skill.logo_url() alt=skill.name.clone() class="w-8 h-8" loading="lazy" />
                                <span class="text-xs text-gray-300 text-center">{skill.name}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
