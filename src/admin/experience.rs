//! Experience page: professional summary, technical skill meters, and the
//! work-history records.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::FlashLevel;
use crate::content::{decode_items, Experience, TechSkill};
use crate::store::{Store, StoreError};

use super::{
    flash_outcome, parse_index, parse_percentage, required, with_flashes, AdminState, FormFields,
    Page, SessionToken,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct ExperienceView {
    pub professional_summary: String,
    pub technical_skills: Vec<TechSkill>,
    pub experiences: BTreeMap<String, Experience>,
}

/// Returned by the edit-button flow so the frontend can pre-fill the form.
#[derive(Debug, Serialize, Deserialize)]
pub struct EditView<T> {
    pub key: String,
    #[serde(flatten)]
    pub record: T,
}

async fn experience_view<S: Store + 'static>(state: &AdminState<S>) -> ExperienceView {
    let content = &state.content;
    let store = &state.store;

    let professional_summary = content
        .professional_summary()
        .get_text(store, "summary")
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "professional summary read failed");
            None
        })
        .unwrap_or_default();
    let technical_skills = content
        .technical_skills()
        .gather_list(store, "skills")
        .await
        .map(decode_items)
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "technical skills read failed");
            Vec::new()
        });
    let experiences = content.experience().list(store).await.unwrap_or_else(|err| {
        tracing::warn!(%err, "experience read failed");
        BTreeMap::new()
    });

    ExperienceView { professional_summary, technical_skills, experiences }
}

/// `GET /admin-experience`.
pub(crate) async fn page<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Json<Page<ExperienceView>> {
    let view = experience_view(&state).await;
    Json(with_flashes(&state.sessions, &token, view))
}

/// `POST /admin-experience` — summary, technical skills, and record CRUD,
/// dispatched by field presence. The edit-button branch answers with the
/// record to pre-fill instead of redirecting.
pub(crate) async fn submit<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<FormFields>,
) -> Response {
    let sessions = &state.sessions;
    let store = &state.store;
    let content = &state.content;

    if let Some(summary) = required(&form, "edited_professional_summary") {
        let result =
            content.professional_summary().set_field(store, "summary", Value::String(summary)).await;
        flash_outcome(sessions, &token, result, Some("Professional Summary updated successfully!"));
    } else if form.contains_key("new_tech_skill_name") {
        match tech_skill_from(&form, "new_tech_skill_name", "new_tech_skill_percentage") {
            Ok(Some(skill)) => {
                let result = append_tech_skill(state.as_ref(), skill).await;
                flash_outcome(sessions, &token, result, Some("Technical skill added successfully!"));
            }
            Ok(None) => {}
            Err(message) => sessions.flash(&token, FlashLevel::Error, message),
        }
    } else if form.contains_key("edited_tech_skill_name")
        && form.contains_key("edited_tech_skill_percentage")
    {
        match (
            parse_index(&form, "edit_tech_skill_index"),
            tech_skill_from(&form, "edited_tech_skill_name", "edited_tech_skill_percentage"),
        ) {
            (Ok(index), Ok(Some(skill))) => match serde_json::to_value(&skill) {
                Ok(value) => {
                    let result =
                        content.technical_skills().list_set(store, "skills", index, value).await;
                    flash_outcome(
                        sessions,
                        &token,
                        result,
                        Some("Technical skill updated successfully!"),
                    );
                }
                Err(err) => sessions.flash(&token, FlashLevel::Error, err.to_string()),
            },
            (Err(message), _) | (_, Err(message)) => {
                sessions.flash(&token, FlashLevel::Error, message)
            }
            (_, Ok(None)) => {}
        }
    } else if form.contains_key("delete_tech_skill_index") {
        match parse_index(&form, "delete_tech_skill_index") {
            Ok(index) => {
                let result = content.technical_skills().list_remove(store, "skills", index).await;
                flash_outcome(
                    sessions,
                    &token,
                    result,
                    Some("Technical skill deleted successfully!"),
                );
            }
            Err(message) => sessions.flash(&token, FlashLevel::Error, message),
        }
    } else if let Some(key) = required(&form, "edit_key") {
        // Edit button: answer with the record so the form can pre-fill.
        match content.experience().get(store, &key).await {
            Ok(Some(record)) => {
                return Json(EditView { key, record }).into_response();
            }
            Ok(None) => sessions.flash(&token, FlashLevel::Error, "Experience entry not found."),
            Err(err) => {
                tracing::warn!(%err, "experience lookup failed");
                sessions.flash(&token, FlashLevel::Error, format!("Lookup failed: {}", err));
            }
        }
    } else if let Some(key) = required(&form, "update_key") {
        match experience_from(&form) {
            Some(record) => {
                let result = content.experience().update(store, &key, &record).await;
                flash_outcome(sessions, &token, result, None);
            }
            None => sessions.flash(&token, FlashLevel::Error, "All experience fields are required."),
        }
    } else if let Some(record) = experience_from(&form) {
        let result = content.experience().add(store, &record).await.map(|_| ());
        flash_outcome(sessions, &token, result, None);
    }

    Redirect::to("/admin-experience").into_response()
}

/// `POST /delete-experience`.
pub(crate) async fn delete<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<FormFields>,
) -> Redirect {
    if let Some(key) = required(&form, "key") {
        let result = state.content.experience().delete(&state.store, &key).await;
        flash_outcome(&state.sessions, &token, result, None);
    }
    Redirect::to("/admin-experience")
}

/// A technical skill from the form; `Ok(None)` when the name is blank.
fn tech_skill_from(
    form: &FormFields,
    name_field: &str,
    percentage_field: &str,
) -> Result<Option<TechSkill>, String> {
    let percentage = parse_percentage(form, percentage_field)?;
    Ok(required(form, name_field).map(|name| TechSkill { name, percentage }))
}

/// A full experience record; `None` unless all four fields are present and
/// non-empty.
fn experience_from(form: &FormFields) -> Option<Experience> {
    Some(Experience {
        company: required(form, "company")?,
        role: required(form, "role")?,
        duration: required(form, "duration")?,
        description: required(form, "description")?,
    })
}

async fn append_tech_skill<S: Store + 'static>(
    state: &AdminState<S>,
    skill: TechSkill,
) -> Result<(), StoreError> {
    let path = state.content.technical_skills();
    let value = serde_json::to_value(&skill).map_err(|err| StoreError::Decode {
        path: path.path().to_string(),
        message: err.to_string(),
    })?;
    path.list_append(&state.store, "skills", value).await
}
