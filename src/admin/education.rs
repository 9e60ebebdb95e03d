//! Education records under the resume section.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form, Json};
use serde::{Deserialize, Serialize};

use crate::auth::FlashLevel;
use crate::content::Education;
use crate::store::Store;

use super::experience::EditView;
use super::{flash_outcome, required, with_flashes, AdminState, FormFields, Page, SessionToken};

#[derive(Debug, Serialize, Deserialize)]
pub struct EducationView {
    pub education: BTreeMap<String, Education>,
}

/// `GET /admin-education`.
pub(crate) async fn page<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Json<Page<EducationView>> {
    let education = state.content.education().list(&state.store).await.unwrap_or_else(|err| {
        tracing::warn!(%err, "education read failed");
        BTreeMap::new()
    });
    Json(with_flashes(&state.sessions, &token, EducationView { education }))
}

/// `POST /admin-education` — edit-fetch, update, or add.
pub(crate) async fn submit<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<FormFields>,
) -> Response {
    let sessions = &state.sessions;
    let education = state.content.education();

    if let Some(key) = required(&form, "edit_key") {
        match education.get(&state.store, &key).await {
            Ok(Some(record)) => return Json(EditView { key, record }).into_response(),
            Ok(None) => sessions.flash(&token, FlashLevel::Error, "Education entry not found."),
            Err(err) => {
                tracing::warn!(%err, "education lookup failed");
                sessions.flash(&token, FlashLevel::Error, format!("Lookup failed: {}", err));
            }
        }
    } else if let Some(key) = required(&form, "update_key") {
        match education_from(&form) {
            Some(record) => {
                let result = education.update(&state.store, &key, &record).await;
                flash_outcome(sessions, &token, result, None);
            }
            None => sessions.flash(&token, FlashLevel::Error, "All education fields are required."),
        }
    } else if let Some(record) = education_from(&form) {
        let result = education.add(&state.store, &record).await.map(|_| ());
        flash_outcome(sessions, &token, result, None);
    }

    Redirect::to("/admin-education").into_response()
}

/// `POST /delete-education`.
pub(crate) async fn delete<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<FormFields>,
) -> Redirect {
    if let Some(key) = required(&form, "key") {
        let result = state.content.education().delete(&state.store, &key).await;
        flash_outcome(&state.sessions, &token, result, None);
    }
    Redirect::to("/admin-education")
}

fn education_from(form: &FormFields) -> Option<Education> {
    Some(Education {
        institution: required(form, "institution")?,
        designation: required(form, "designation")?,
        period: required(form, "period")?,
        description: required(form, "description")?,
    })
}
