//! Project cards.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form, Json};
use serde::{Deserialize, Serialize};

use crate::auth::FlashLevel;
use crate::content::Project;
use crate::store::Store;

use super::experience::EditView;
use super::{
    flash_outcome, required, trimmed, with_flashes, AdminState, FormFields, Page, SessionToken,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectView {
    pub projects: BTreeMap<String, Project>,
}

/// `GET /admin-project`.
pub(crate) async fn page<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Json<Page<ProjectView>> {
    let projects = state.content.projects().list(&state.store).await.unwrap_or_else(|err| {
        tracing::warn!(%err, "projects read failed");
        BTreeMap::new()
    });
    Json(with_flashes(&state.sessions, &token, ProjectView { projects }))
}

/// `POST /admin-project` — edit-fetch, update, or add.
pub(crate) async fn submit<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<FormFields>,
) -> Response {
    let sessions = &state.sessions;
    let projects = state.content.projects();

    if let Some(key) = required(&form, "edit_key") {
        match projects.get(&state.store, &key).await {
            Ok(Some(record)) => return Json(EditView { key, record }).into_response(),
            Ok(None) => sessions.flash(&token, FlashLevel::Error, "Project not found."),
            Err(err) => {
                tracing::warn!(%err, "project lookup failed");
                sessions.flash(&token, FlashLevel::Error, format!("Lookup failed: {}", err));
            }
        }
    } else if let Some(key) = required(&form, "update_key") {
        match project_from(&form) {
            Some(record) => {
                let result = projects.update(&state.store, &key, &record).await;
                flash_outcome(sessions, &token, result, Some("Project updated successfully!"));
            }
            None => sessions.flash(&token, FlashLevel::Error, "Title, description and icon are required."),
        }
    } else if let Some(record) = project_from(&form) {
        let result = projects.add(&state.store, &record).await.map(|_| ());
        flash_outcome(sessions, &token, result, Some("Project added successfully!"));
    }

    Redirect::to("/admin-project").into_response()
}

/// `POST /delete-project`.
pub(crate) async fn delete<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<FormFields>,
) -> Redirect {
    if let Some(key) = required(&form, "key") {
        let result = state.content.projects().delete(&state.store, &key).await;
        flash_outcome(&state.sessions, &token, result, Some("Project deleted successfully!"));
    }
    Redirect::to("/admin-project")
}

/// A project from the form; the URL is optional, everything else required.
fn project_from(form: &FormFields) -> Option<Project> {
    Some(Project {
        title: required(form, "title")?,
        description: required(form, "description")?,
        icon: required(form, "icon")?,
        url: trimmed(form, "url").unwrap_or_default(),
    })
}
