use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────
// Portfolio content model
// ──────────────────────────────────────────────────────────
//
// These shapes are the published snapshot. Field names follow the stored
// document format (camelCase), so a record written by the publish pipeline
// deserializes unchanged on the public read path.
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_year: String,
    pub end_year: String,
}

/// Display sentinel for an ongoing position; when `current` is set,
/// `end_year` carries this value and is not independently meaningful.
pub const ONGOING_END_YEAR: &str = "Present";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_year: String,
    pub end_year: String,
    pub current: bool,
}

/// Platform is fixed at creation. The editor only ever rewrites the `url`
/// of an existing link; there is no operation that changes a link's
/// platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Github,
    Linkedin,
    Twitter,
    Instagram,
    Website,
    Email,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub platform: SocialPlatform,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    About,
    Skills,
    Projects,
    Education,
    Contact,
}

/// Renderer configuration: which blocks are shown and in what order.
/// The editor carries these through; none of the core protocols mutate
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSection {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub visible: bool,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub name: String,
    pub title: String,
    pub bio: String,
    /// Empty, or a URL / opaque reference. Never inline binary.
    pub photo: String,
    /// Display order; duplicates permitted.
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub social_links: Vec<SocialLink>,
    pub sections: Vec<PortfolioSection>,
    /// Per-section display-label overrides, keyed by section key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_titles: Option<BTreeMap<String, String>>,
}

/// Shallow-merge patch for `PortfolioData`. List-valued fields are
/// whole-list replacements: supplying `skills` swaps the entire sequence,
/// never merges elementwise. Keyed-by-id merging exists only for canvas
/// elements, on the session API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDataPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub skills: Option<Vec<String>>,
    pub projects: Option<Vec<Project>>,
    pub education: Option<Vec<Education>>,
    pub experience: Option<Vec<Experience>>,
    pub social_links: Option<Vec<SocialLink>>,
    pub sections: Option<Vec<PortfolioSection>>,
    pub section_titles: Option<BTreeMap<String, String>>,
}

impl PortfolioData {
    pub fn apply(&mut self, patch: PortfolioDataPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(photo) = patch.photo {
            self.photo = photo;
        }
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        if let Some(projects) = patch.projects {
            self.projects = projects;
        }
        if let Some(education) = patch.education {
            self.education = education;
        }
        if let Some(experience) = patch.experience {
            self.experience = experience;
        }
        if let Some(social_links) = patch.social_links {
            self.social_links = social_links;
        }
        if let Some(sections) = patch.sections {
            self.sections = sections;
        }
        if let Some(section_titles) = patch.section_titles {
            self.section_titles = Some(section_titles);
        }
    }

    /// Rewrite the URL of an existing social link. Returns false when no
    /// link has that id. The platform is intentionally untouchable here.
    pub fn update_social_link_url(&mut self, id: &str, url: String) -> bool {
        match self.social_links.iter_mut().find(|l| l.id == id) {
            Some(link) => {
                link.url = url;
                true
            }
            None => false,
        }
    }
}
