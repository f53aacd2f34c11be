use leptos::prelude::*;

use crate::content::PORTFOLIO;

use super::background::ParticleBackground;

#[component]
pub fn AboutSection() -> impl IntoView {
    let about = &PORTFOLIO.about;
    let owner = &PORTFOLIO.owner;

    view! {
        <section
            id="about"
            class="relative z-10 py-16 sm:py-20 px-4 sm:px-6 overflow-hidden bg-black/50"
        >
            <div class="absolute inset-0 z-0 pointer-events-none">
                <ParticleBackground config=PORTFOLIO.backgrounds.about.clone() />
            </div>
            <div class="relative z-20 container mx-auto max-w-4xl">
                <h2 class="text-3xl sm:text-4xl font-bold text-center mb-12 sm:mb-16 bg-gradient-to-r from-indigo-400 via-violet-400 to-purple-400 bg-clip-text text-transparent">
                    "About Me"
                </h2>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-10 sm:gap-12 items-start">
                    <div class="flex justify-center md:justify-start">
                        <div class="relative group w-56 h-56 sm:w-72 sm:h-72 rounded-2xl shadow-xl ring-2 ring-indigo-400/30">
                            <img
                                src=owner.profile_image.clone()
                                alt=owner.name.clone()
                                class="w-full h-full rounded-2xl object-cover"
                            />
                        </div>
                    </div>
                    <div class="text-gray-300 flex flex-col justify-between">
                        <div class="space-y-4 sm:space-y-6 text-center md:text-left">
                            {about
                                .paragraphs
                                .iter()
                                .map(|p| {
                                    view! {
                                        <p class="text-base sm:text-lg leading-relaxed">{p.clone()}</p>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <div class="flex gap-4 pt-6 justify-center md:justify-start">
                            {about
                                .socials
                                .iter()
                                .map(|s| {
                                    view! {
                                        <a
                                            href=s.url.clone()
                                            target="_blank"
                                            rel="noopener noreferrer"
                                            class="text-2xl text-indigo-300 hover:text-white transition-colors duration-300"
                                            aria-label=s.label.clone()
                                        >
                                            <i class=s.icon.clone()></i>
                                        </a>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}
