//! About section: bio, heading, skill cards, and the resume upload.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Redirect;
use axum::{Extension, Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::FlashLevel;
use crate::content::{decode_items, AboutSkill, ResumeFile};
use crate::store::{Store, StoreError};

use super::{
    flash_outcome, parse_index, parse_percentage, read_multipart, required, trimmed, with_flashes,
    AdminState, FormFields, Page, SessionToken,
};

const DEFAULT_CATEGORY: &str = "Cloud & DevOps";

#[derive(Debug, Serialize, Deserialize)]
pub struct AboutView {
    pub bio: String,
    pub heading: String,
    pub skills: Vec<AboutSkill>,
    pub resume: Option<ResumeFile>,
}

async fn about_view<S: Store + 'static>(state: &AdminState<S>) -> AboutView {
    let content = &state.content;
    let store = &state.store;

    let bio = content
        .about_bio()
        .get_text(store, "bio")
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "about bio read failed");
            None
        })
        .unwrap_or_default();
    let heading = content
        .about_heading()
        .get_text(store, "heading")
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "about heading read failed");
            None
        })
        .unwrap_or_default();
    let skills = content
        .about_skills()
        .gather_list(store, "skills")
        .await
        .map(decode_items)
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "about skills read failed");
            Vec::new()
        });
    let resume = content
        .about_resume()
        .get_record::<ResumeFile, _>(store)
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "resume pointer read failed");
            None
        });

    AboutView { bio, heading, skills, resume }
}

/// `GET /admin-about`.
pub(crate) async fn page<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Json<Page<AboutView>> {
    let view = about_view(&state).await;
    Json(with_flashes(&state.sessions, &token, view))
}

/// `POST /admin-about` — bio, heading, and skill-card edits.
pub(crate) async fn submit<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<FormFields>,
) -> Redirect {
    let sessions = &state.sessions;
    let store = &state.store;
    let skills = state.content.about_skills();

    if form.contains_key("new_title") {
        match new_skill_from(&form) {
            Ok(Some(card)) => {
                let result = append_skill(&skills, store, card).await;
                flash_outcome(sessions, &token, result, None);
            }
            Ok(None) => {}
            Err(message) => sessions.flash(&token, FlashLevel::Error, message),
        }
    } else if let Some(heading) = trimmed(&form, "edited_bio_heading") {
        let result =
            state.content.about_heading().set_field(store, "heading", Value::String(heading)).await;
        flash_outcome(sessions, &token, result, None);
    } else if let Some(bio) = trimmed(&form, "edited_bio") {
        let result = state.content.about_bio().set_field(store, "bio", Value::String(bio)).await;
        flash_outcome(sessions, &token, result, None);
    } else if form.contains_key("delete_index") {
        match parse_index(&form, "delete_index") {
            Ok(index) => {
                let result = skills.list_remove(store, "skills", index).await;
                flash_outcome(sessions, &token, result, None);
            }
            Err(message) => sessions.flash(&token, FlashLevel::Error, message),
        }
    } else if form.contains_key("edited_skill")
        && form.contains_key("edited_description")
        && form.contains_key("edited_percentage")
    {
        match edited_skill_from(&form) {
            Ok((index, card)) => match serde_json::to_value(&card) {
                Ok(value) => {
                    let result = skills.list_set(store, "skills", index, value).await;
                    flash_outcome(sessions, &token, result, None);
                }
                Err(err) => sessions.flash(&token, FlashLevel::Error, err.to_string()),
            },
            Err(message) => sessions.flash(&token, FlashLevel::Error, message),
        }
    }

    Redirect::to("/admin-about")
}

/// `POST /admin-about/resume` — multipart resume upload; stores the file
/// locally and records its name and type in the store.
pub(crate) async fn upload_resume<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    multipart: Multipart,
) -> Redirect {
    let sessions = &state.sessions;

    let file = match read_multipart(multipart, "resume_file").await {
        Ok((_, Some(file))) => file,
        Ok((_, None)) => {
            sessions.flash(&token, FlashLevel::Error, "No resume file in the upload.");
            return Redirect::to("/admin-about");
        }
        Err(message) => {
            sessions.flash(&token, FlashLevel::Error, message);
            return Redirect::to("/admin-about");
        }
    };

    let stored = match state.uploads.save_resume(&file.name, &file.bytes).await {
        Ok(stored) => stored,
        Err(err) => {
            tracing::warn!(%err, "resume upload rejected");
            sessions.flash(
                &token,
                FlashLevel::Error,
                "Invalid file type. Please upload a PDF or TXT file.",
            );
            return Redirect::to("/admin-about");
        }
    };

    let resume = state.content.about_resume();
    let result = async {
        resume
            .set_field(&state.store, "filename", Value::String(stored.filename.clone()))
            .await?;
        resume.set_field(&state.store, "file_type", Value::String(stored.file_type.clone())).await
    }
    .await;
    flash_outcome(sessions, &token, result, Some("Resume uploaded successfully!"));

    Redirect::to("/admin-about")
}

/// Build a new skill card from the add form. `Ok(None)` when the form is
/// incomplete (blank title or description) — a silent no-op, as the
/// dashboard has always treated it.
fn new_skill_from(form: &FormFields) -> Result<Option<AboutSkill>, String> {
    let percentage = parse_percentage(form, "new_percentage")?;
    let (Some(title), Some(description)) =
        (required(form, "new_title"), required(form, "new_description"))
    else {
        return Ok(None);
    };
    let category = required(form, "new_category").unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    Ok(Some(AboutSkill { skill: title, description, percentage, category }))
}

fn edited_skill_from(form: &FormFields) -> Result<(usize, AboutSkill), String> {
    let index = parse_index(form, "edit_index")?;
    let percentage = parse_percentage(form, "edited_percentage")?;
    let title = trimmed(form, "edited_skill").unwrap_or_default();
    let description = trimmed(form, "edited_description").unwrap_or_default();
    let category =
        required(form, "edited_category").unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    Ok((index, AboutSkill { skill: title, description, percentage, category }))
}

async fn append_skill<S: Store + 'static>(
    skills: &crate::content::Singleton,
    store: &S,
    card: AboutSkill,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(&card).map_err(|err| StoreError::Decode {
        path: skills.path().to_string(),
        message: err.to_string(),
    })?;
    skills.list_append(store, "skills", value).await
}
