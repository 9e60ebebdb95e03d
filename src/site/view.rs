//! The aggregated home view.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::{
    decode_items, AboutSkill, Certification, Education, Experience, Project, TechSkill,
};
use crate::store::{Store, StoreError};

use super::SiteState;

/// Everything the home page renders, in one payload.
///
/// `Deserialize` is derived so integration tests can read the payload back;
/// the site only ever serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeView {
    pub name: String,
    pub specialization: String,
    pub bio: String,
    pub about_bio: String,
    pub about_heading: String,
    pub skills: Vec<String>,
    /// Comma-joined skills for the landing-page typing animation.
    pub typed_items: String,
    pub about_skills: Vec<AboutSkill>,
    pub experiences: BTreeMap<String, Experience>,
    pub education: BTreeMap<String, Education>,
    pub professional_summary: String,
    pub technical_skills: Vec<TechSkill>,
    pub certifications: BTreeMap<String, Certification>,
    pub projects: BTreeMap<String, Project>,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub telegram: String,
    pub whatsapp: String,
    pub github: String,
}

/// Assemble the home view. Each section degrades independently: a failed
/// read logs a warning and renders that section's default, so a flaky store
/// never takes the whole page down.
pub(super) async fn assemble_home<S: Store + 'static>(state: &SiteState<S>) -> HomeView {
    let store = &state.store;
    let content = &state.content;

    let skills: Vec<String> = decode_items(or_default(
        "landing skills",
        content.landing_skills().gather_list(store, "skills").await,
    ));
    let typed_items = if skills.is_empty() {
        state.owner_tagline.clone()
    } else {
        skills.join(", ")
    };

    let links = or_default("links", content.contact_links(store).await);

    HomeView {
        name: state.owner_name.clone(),
        specialization: state.owner_tagline.clone(),
        bio: or_default("landing bio", content.landing_bio().get_text(store, "bio").await)
            .unwrap_or_default(),
        about_bio: or_default("about bio", content.about_bio().get_text(store, "bio").await)
            .unwrap_or_default(),
        about_heading: or_default(
            "about heading",
            content.about_heading().get_text(store, "heading").await,
        )
        .unwrap_or_default(),
        skills,
        typed_items,
        about_skills: decode_items(or_default(
            "about skills",
            content.about_skills().gather_list(store, "skills").await,
        )),
        experiences: or_default("experience", content.experience().list(store).await),
        education: or_default("education", content.education().list(store).await),
        professional_summary: or_default(
            "professional summary",
            content.professional_summary().get_text(store, "summary").await,
        )
        .unwrap_or_default(),
        technical_skills: decode_items(or_default(
            "technical skills",
            content.technical_skills().gather_list(store, "skills").await,
        )),
        certifications: or_default("certifications", content.certifications().list(store).await),
        projects: or_default("projects", content.projects().list(store).await),
        email: links.email,
        phone: links.phone,
        linkedin: links.linkedin,
        telegram: links.telegram,
        whatsapp: links.whatsapp,
        github: links.github,
    }
}

fn or_default<T: Default>(section: &'static str, result: Result<T, StoreError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(section, %err, "store read failed; rendering default");
            T::default()
        }
    }
}
