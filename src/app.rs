mod about;
mod background;
mod contact;
mod dom;
mod experience;
mod hero;
mod nav;
mod projects;
mod skills;
mod toast;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::content::{copyright_year, PORTFOLIO};
use crate::toast::Toaster;

use about::AboutSection;
use background::ParticleBackground;
use contact::ContactSection;
use experience::ExperienceSection;
use hero::HeroSection;
use nav::NavBar;
use projects::ProjectsSection;
use skills::SkillsSection;
use toast::ToastStack;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <link
                    rel="stylesheet"
                    href="https://cdn.jsdelivr.net/gh/devicons/devicon@latest/devicon.min.css"
                />
                <MetaTags />
            </head>
            <body class="bg-black text-white">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    let owner = &PORTFOLIO.owner;

    view! {
        <Title text=format!("{} | {}", owner.name, owner.tagline) />
        <Meta name="description" content=owner.description.clone() />
        <Link rel="icon" href=owner.tab_image.clone() />

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=path!("/") view=PortfolioPage />
            </Routes>
        </Router>
    }
}

/// The single scrolling page. Each mount owns its own toasts, menu and tracker.
#[component]
fn PortfolioPage() -> impl IntoView {
    provide_context(RwSignal::new(Toaster::default()));

    view! {
        <div class="min-h-screen bg-black relative">
            <div class="fixed inset-0 z-0 pointer-events-none">
                <ParticleBackground config=PORTFOLIO.backgrounds.global.clone() />
            </div>
            <NavBar />
            <HeroSection />
            <AboutSection />
            <ExperienceSection />
            <SkillsSection />
            <ProjectsSection />
            <ContactSection />
            <Footer />
            <ToastStack />
        </div>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="relative py-6 sm:py-8 px-4 sm:px-6 border-t border-gray-800">
            <div class="relative z-20 container mx-auto text-center text-gray-400">
                <p class="text-sm sm:text-base">
                    {format!(
                        "© {} {}. All rights reserved.",
                        copyright_year(),
                        PORTFOLIO.owner.name,
                    )}
                </p>
            </div>
        </footer>
    }
}
