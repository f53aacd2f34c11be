use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Utc};
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::particles::BackgroundConfig;

const CONTENT_FILE: &str = "portfolio.json";

pub static PORTFOLIO: LazyLock<Portfolio> = LazyLock::new(|| {
    Portfolio::load().expect("Embedded portfolio content should be valid")
});

/// Year the site was built, for the footer. Falls back to the current year.
pub fn copyright_year() -> i32 {
    DateTime::parse_from_rfc3339(env!("BUILD_TIME"))
        .map(|t| t.year())
        .unwrap_or_else(|_| Utc::now().year())
}

#[derive(Embed)]
#[folder = "content"]
pub struct Assets;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("Content file not found: {0}")]
    Missing(&'static str),
    #[error("Couldn't parse content: {0}")]
    Parse(String),
    #[error("Invalid content: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub profile_image: String,
    pub tab_image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct About {
    pub paragraphs: Vec<String>,
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub logo: String,
}

impl Skill {
    /// Logos are either site-relative paths or devicon slugs like `rust/rust-original.svg`.
    pub fn logo_url(&self) -> String {
        if self.logo.starts_with('/') || self.logo.starts_with("http") {
            self.logo.clone()
        } else {
            format!(
                "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/{}",
                self.logo
            )
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    pub title: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    Web,
    AiMl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub github_url: String,
    #[serde(default)]
    pub live_url: Option<String>,
    pub image_url: String,
    pub kind: ProjectKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Kind(ProjectKind),
}

impl ProjectFilter {
    pub const OPTIONS: [ProjectFilter; 3] = [
        ProjectFilter::All,
        ProjectFilter::Kind(ProjectKind::Web),
        ProjectFilter::Kind(ProjectKind::AiMl),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectFilter::All => "All Projects",
            ProjectFilter::Kind(ProjectKind::Web) => "Web Development",
            ProjectFilter::Kind(ProjectKind::AiMl) => "AI / ML",
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Kind(kind) => project.kind == *kind,
        }
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messaging {
    pub domain: String,
    pub recipient: String,
    pub default_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTime {
    pub channel: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub email_address: String,
    pub email_subject_prefix: String,
    pub messaging: Messaging,
    pub response_times: Vec<ResponseTime>,
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backgrounds {
    pub global: BackgroundConfig,
    pub about: BackgroundConfig,
    pub contact: BackgroundConfig,
}

/// Everything the page shows. Content is data: revisions differ here, not in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub owner: Owner,
    pub navigation: Vec<NavigationItem>,
    pub hero: Hero,
    pub about: About,
    pub experience: Vec<Experience>,
    pub skills: Vec<SkillGroup>,
    pub projects: Vec<Project>,
    pub contact: Contact,
    pub backgrounds: Backgrounds,
}

impl Portfolio {
    pub fn load() -> Result<Self, ContentError> {
        let file = Assets::get(CONTENT_FILE).ok_or(ContentError::Missing(CONTENT_FILE))?;
        let text =
            std::str::from_utf8(&file.data).map_err(|e| ContentError::Parse(e.to_string()))?;
        Self::from_json(text)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let portfolio: Portfolio =
            serde_json::from_str(json).map_err(|e| ContentError::Parse(e.to_string()))?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        let first = self
            .navigation
            .first()
            .ok_or_else(|| ContentError::Invalid("navigation is empty".to_string()))?;
        if first.id != "home" {
            return Err(ContentError::Invalid(format!(
                "first section must be 'home', found '{}'",
                first.id
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.navigation.iter().find(|i| !seen.insert(i.id.as_str())) {
            return Err(ContentError::Invalid(format!(
                "duplicate section id '{}'",
                dup.id
            )));
        }
        for (name, bg) in [
            ("global", &self.backgrounds.global),
            ("about", &self.backgrounds.about),
            ("contact", &self.backgrounds.contact),
        ] {
            if bg.layers.iter().any(|l| l.count == 0 || l.extent <= 0.0) {
                return Err(ContentError::Invalid(format!(
                    "background '{name}' has an empty layer"
                )));
            }
        }
        Ok(())
    }

    pub fn section_ids(&self) -> Vec<String> {
        self.navigation.iter().map(|i| i.id.clone()).collect()
    }
}
