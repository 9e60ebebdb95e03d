//! Record shapes stored in the content tree.
//!
//! Field names (and, for the about skills, field casing) match the JSON
//! already in the store — existing data keeps decoding.

use serde::{Deserialize, Serialize};

/// One work-history entry under `/experience`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub description: String,
}

/// One education entry under `/resume/education`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub designation: String,
    pub period: String,
    pub description: String,
}

/// One certification card under `/certifications`. `image` is the
/// site-relative path of the uploaded badge image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub title: String,
    pub image: String,
    pub filter: String,
    #[serde(default)]
    pub url: String,
}

/// One project card under `/projects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub url: String,
}

/// A skill card in the about section's `skills` list. The capitalized field
/// names are what the original dashboard wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutSkill {
    #[serde(rename = "Skill")]
    pub skill: String,
    #[serde(rename = "Description")]
    pub description: String,
    pub percentage: u8,
    pub category: String,
}

/// A skill meter in the resume's `technical_skills` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechSkill {
    pub name: String,
    pub percentage: u8,
}

/// Pointer to the uploaded resume file, kept in the `/about/resume`
/// singleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeFile {
    pub filename: String,
    pub file_type: String,
}

/// Contact and social links from the fixed links record. Only the public
/// fields — the admin credentials stored alongside them are read by
/// [`crate::auth`], never decoded into view data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactLinks {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub telegram: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub github: String,
}
