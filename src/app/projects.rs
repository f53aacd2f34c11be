use leptos::prelude::*;

use crate::content::{Project, ProjectFilter, PORTFOLIO};

#[component]
pub fn ProjectsSection() -> impl IntoView {
    let (filter, set_filter) = signal(ProjectFilter::default());
    let visible = move || {
        filter
            .get()
            .apply(&PORTFOLIO.projects)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    };

    view! {
        <section id="projects" class="relative py-16 sm:py-20 px-4 sm:px-6 bg-gray-900/20">
            <div class="relative z-20 container mx-auto max-w-6xl">
                <h2 class="text-3xl sm:text-4xl font-bold text-center mb-8 sm:mb-12 bg-gradient-to-r from-violet-400 via-indigo-400 to-purple-400 bg-clip-text text-transparent">
                    "Featured Projects"
                </h2>
                <div class="flex flex-wrap justify-center gap-3 mb-10 sm:mb-12">
                    {ProjectFilter::OPTIONS
                        .into_iter()
                        .map(|option| {
                            view! {
                                <button
                                    class=move || {
                                        if filter.get() == option {
                                            "px-4 py-2 rounded-md text-sm bg-indigo-600 text-white transition-all duration-300"
                                        } else {
                                            "px-4 py-2 rounded-md text-sm border border-gray-700 text-gray-300 hover:border-indigo-400 hover:text-white transition-all duration-300"
                                        }
                                    }
                                    on:click=move |_| set_filter.set(option)
                                >
                                    {option.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6 sm:gap-8">
                    <For
                        each=visible
                        key=|project| project.title.clone()
                        children=|project| view! { <ProjectCard project /> }
                    />
                </div>
            </div>
        </section>
    }
}

#[component]
fn ProjectCard(project: Project) -> impl IntoView {
    let Project {
        title,
        description,
        technologies,
        github_url,
        live_url,
        image_url,
        ..
    } = project;

    view! {
        <div class="group bg-black/80 border border-gray-800 hover:border-indigo-500/40 rounded-lg overflow-hidden transition-all duration-500 flex flex-col">
            <div class="h-48 overflow-hidden">
                <img
                    src=image_url
                    alt=title.clone()
                    loading="lazy"
                    class="w-full h-full object-cover group-hover:scale-105 transition-transform duration-500"
                />
            </div>
            <div class="p-6 flex flex-col flex-1">
                <h3 class="text-lg sm:text-xl font-semibold text-white mb-2">{title}</h3>
                <p class="text-gray-400 text-sm leading-relaxed mb-4 flex-1">{description}</p>
                <div class="flex flex-wrap gap-2 mb-4">
                    {technologies
                        .into_iter()
                        .map(|t| {
                            view! {
                                <span class="px-2 py-1 text-xs rounded-md bg-violet-500/10 text-violet-300 border border-violet-500/20">
                                    {t}
                                </span>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="flex gap-4 text-sm">
                    <a
                        href=github_url
                        target="_blank"
                        rel="noopener noreferrer"
                        class="text-indigo-400 hover:text-white transition-colors duration-300"
                    >
                        <i class="devicon-github-original mr-1"></i>
                        "Code"
                    </a>
                    {live_url
                        .map(|url| {
                            view! {
                                <a
                                    href=url
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class="text-indigo-400 hover:text-white transition-colors duration-300"
                                >
                                    "Live Demo"
                                </a>
                            }
                        })}
                </div>
            </div>
        </div>
    }
}
