//! Typed access to the content sections of the store tree.
//!
//! The tree has two shapes of section:
//!
//! - **Collections** — records keyed by store-generated push ids
//!   (`/experience`, `/projects`, `/certifications`, `/resume/education`),
//!   accessed through [`Collection`].
//! - **Singletons stored as one-record collections** — single-valued content
//!   (bio, heading, skills lists, the resume pointer) lives as the sole
//!   entry of a collection: `{ <push-id>: { field: value } }`. [`Singleton`]
//!   makes that pattern explicit instead of relying on mapping iteration
//!   order.
//!
//! [`Content`] knows where each section lives and hands out the accessors.

mod collection;
mod records;
mod singleton;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::store::{NodePath, Store, StoreError};

pub use collection::Collection;
pub use records::{
    AboutSkill, Certification, ContactLinks, Education, Experience, Project, ResumeFile, TechSkill,
};
pub use singleton::Singleton;

/// The section map: every path the two services touch.
///
/// Collection and singleton paths are fixed; only the links record id is
/// deployment-specific (the record predates this code and its push id is
/// part of the stored data).
#[derive(Debug, Clone)]
pub struct Content {
    links_key: String,
}

impl Content {
    pub fn new(links_key: &str) -> Self {
        Content { links_key: links_key.to_string() }
    }

    pub fn experience(&self) -> Collection<Experience> {
        Collection::new("experience")
    }

    pub fn education(&self) -> Collection<Education> {
        Collection::new("resume/education")
    }

    pub fn certifications(&self) -> Collection<Certification> {
        Collection::new("certifications")
    }

    pub fn projects(&self) -> Collection<Project> {
        Collection::new("projects")
    }

    pub fn landing_bio(&self) -> Singleton {
        Singleton::new("landing/bio")
    }

    pub fn landing_skills(&self) -> Singleton {
        Singleton::new("landing/skills-list")
    }

    pub fn about_bio(&self) -> Singleton {
        Singleton::new("about/bio")
    }

    pub fn about_heading(&self) -> Singleton {
        Singleton::new("about/heading")
    }

    pub fn about_skills(&self) -> Singleton {
        Singleton::new("about/skills")
    }

    pub fn about_resume(&self) -> Singleton {
        Singleton::new("about/resume")
    }

    pub fn professional_summary(&self) -> Singleton {
        Singleton::new("resume/professional_summary")
    }

    pub fn technical_skills(&self) -> Singleton {
        Singleton::new("resume/technical_skills")
    }

    /// The fixed record holding contact links and the admin credentials.
    pub fn links_path(&self) -> NodePath {
        NodePath::new("links").join(&self.links_key).join("links")
    }

    /// Contact links, absent fields defaulting to empty strings.
    pub async fn contact_links<S: Store + ?Sized>(
        &self,
        store: &S,
    ) -> Result<ContactLinks, StoreError> {
        let path = self.links_path();
        match store.fetch(&path).await? {
            Some(node) => serde_json::from_value(node).map_err(|err| StoreError::Decode {
                path: path.to_string(),
                message: err.to_string(),
            }),
            None => Ok(ContactLinks::default()),
        }
    }

    /// Overwrite one field of the links record.
    pub async fn set_link_field<S: Store + ?Sized>(
        &self,
        store: &S,
        field: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        store
            .replace_field(&self.links_path(), field, Value::String(value.to_string()))
            .await
    }
}

/// Decode a list of JSON items into `T`, skipping entries that no longer
/// match the expected shape. The store has no schema; old writers may have
/// left strays behind.
pub fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!(%err, "skipping undecodable list item");
                None
            }
        })
        .collect()
}
