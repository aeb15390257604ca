use serde::Serialize;

use super::editor_state::{CustomColors, EditorMode, EditorState};
use super::portfolio::{
    Education, Experience, PortfolioData, PortfolioSection, Project, SectionKind, SocialLink,
    SocialPlatform, ONGOING_END_YEAR,
};

//
// ──────────────────────────────────────────────────────────
// Template catalog + default blueprint
// ──────────────────────────────────────────────────────────
//
// The blueprint is an immutable recipe, never a shared value: every
// constructor below builds a fresh tree per call, so no session can reach
// another session's arrays through it.
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateLayout {
    Classic,
    Modern,
    Creative,
    Minimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub thumbnail: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub font_family: &'static str,
    pub layout: TemplateLayout,
}

pub fn template_catalog() -> Vec<TemplateConfig> {
    vec![
        TemplateConfig {
            id: "minimal",
            name: "Minimal",
            description: "Clean and simple with generous whitespace",
            thumbnail: "/templates/minimal.png",
            primary_color: "#1a1a1a",
            secondary_color: "#f5f5f5",
            font_family: "Inter",
            layout: TemplateLayout::Minimal,
        },
        TemplateConfig {
            id: "modern",
            name: "Modern",
            description: "Bold gradients and contemporary design",
            thumbnail: "/templates/modern.png",
            primary_color: "#6366f1",
            secondary_color: "#0f172a",
            font_family: "Outfit",
            layout: TemplateLayout::Modern,
        },
        TemplateConfig {
            id: "creative",
            name: "Creative",
            description: "Vibrant colors and playful layouts",
            thumbnail: "/templates/creative.png",
            primary_color: "#ec4899",
            secondary_color: "#fdf2f8",
            font_family: "Outfit",
            layout: TemplateLayout::Creative,
        },
        TemplateConfig {
            id: "professional",
            name: "Professional",
            description: "Corporate and structured presentation",
            thumbnail: "/templates/professional.png",
            primary_color: "#0369a1",
            secondary_color: "#f0f9ff",
            font_family: "Inter",
            layout: TemplateLayout::Classic,
        },
    ]
}

pub fn default_portfolio_data() -> PortfolioData {
    PortfolioData {
        name: "Your Name".to_string(),
        title: "Your Professional Title".to_string(),
        bio: "Write a brief introduction about yourself, your experience, \
              and what you're passionate about."
            .to_string(),
        photo: String::new(),
        skills: vec![
            "JavaScript".to_string(),
            "React".to_string(),
            "Node.js".to_string(),
            "UI/UX Design".to_string(),
        ],
        projects: vec![Project {
            id: "1".to_string(),
            title: "Project One".to_string(),
            description: "A brief description of your amazing project.".to_string(),
            image: String::new(),
            link: "https://example.com".to_string(),
            tags: vec!["React".to_string(), "TypeScript".to_string()],
        }],
        education: vec![Education {
            id: "1".to_string(),
            institution: "University Name".to_string(),
            degree: "Bachelor's Degree".to_string(),
            field: "Computer Science".to_string(),
            start_year: "2018".to_string(),
            end_year: "2022".to_string(),
        }],
        experience: vec![Experience {
            id: "1".to_string(),
            company: "Company Name".to_string(),
            position: "Software Developer".to_string(),
            description: "Brief description of your role and achievements.".to_string(),
            start_year: "2022".to_string(),
            end_year: ONGOING_END_YEAR.to_string(),
            current: true,
        }],
        social_links: vec![
            SocialLink {
                id: "1".to_string(),
                platform: SocialPlatform::Github,
                url: "https://github.com".to_string(),
            },
            SocialLink {
                id: "2".to_string(),
                platform: SocialPlatform::Linkedin,
                url: "https://linkedin.com".to_string(),
            },
        ],
        sections: default_sections(),
        section_titles: None,
    }
}

fn default_sections() -> Vec<PortfolioSection> {
    let order = [
        ("hero", SectionKind::Hero),
        ("about", SectionKind::About),
        ("skills", SectionKind::Skills),
        ("projects", SectionKind::Projects),
        ("education", SectionKind::Education),
        ("contact", SectionKind::Contact),
    ];

    order
        .into_iter()
        .enumerate()
        .map(|(i, (id, kind))| PortfolioSection {
            id: id.to_string(),
            kind,
            visible: true,
            order: i as u32,
        })
        .collect()
}

pub fn default_editor_state() -> EditorState {
    EditorState {
        mode: EditorMode::Template,
        selected_template: None,
        portfolio_data: default_portfolio_data(),
        canvas_elements: Vec::new(),
        custom_colors: CustomColors {
            primary: "#f97316".to_string(),
            secondary: "#1f2937".to_string(),
            background: "#ffffff".to_string(),
            text: "#111827".to_string(),
        },
        custom_font: "Inter".to_string(),
    }
}
