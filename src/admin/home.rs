//! Landing section: the headline skills list and the landing bio.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Redirect;
use axum::{Extension, Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::FlashLevel;
use crate::content::decode_items;
use crate::store::Store;

use super::{
    flash_outcome, parse_index, required, with_flashes, AdminState, FormFields, Page, SessionToken,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct LandingView {
    pub skills: Vec<String>,
    pub bio: String,
}

async fn landing_view<S: Store + 'static>(state: &AdminState<S>) -> LandingView {
    let skills = state
        .content
        .landing_skills()
        .gather_list(&state.store, "skills")
        .await
        .map(decode_items)
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "landing skills read failed");
            Vec::new()
        });
    let bio = state
        .content
        .landing_bio()
        .get_text(&state.store, "bio")
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "landing bio read failed");
            None
        })
        .unwrap_or_default();
    LandingView { skills, bio }
}

/// `GET /admin-home`.
pub(crate) async fn page<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Json<Page<LandingView>> {
    let view = landing_view(&state).await;
    Json(with_flashes(&state.sessions, &token, view))
}

/// `POST /admin-home` — one form per action, dispatched by field presence.
pub(crate) async fn submit<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<FormFields>,
) -> Redirect {
    let skills = state.content.landing_skills();
    let store = &state.store;
    let sessions = &state.sessions;

    if let Some(new_skill) = required(&form, "new_skill") {
        let result = skills.list_append(store, "skills", Value::String(new_skill)).await;
        flash_outcome(sessions, &token, result, None);
    } else if form.contains_key("edited_skill") {
        match (parse_index(&form, "edit_index"), required(&form, "edited_skill")) {
            (Ok(index), Some(edited)) => {
                let result = skills.list_set(store, "skills", index, Value::String(edited)).await;
                flash_outcome(sessions, &token, result, None);
            }
            (Err(message), _) => sessions.flash(&token, FlashLevel::Error, message),
            (_, None) => {}
        }
    } else if form.contains_key("delete_index") {
        match parse_index(&form, "delete_index") {
            Ok(index) => {
                let result = skills.list_remove(store, "skills", index).await;
                flash_outcome(sessions, &token, result, None);
            }
            Err(message) => sessions.flash(&token, FlashLevel::Error, message),
        }
    } else if let Some(bio) = required(&form, "edited_bio") {
        let result =
            state.content.landing_bio().set_field(store, "bio", Value::String(bio)).await;
        flash_outcome(sessions, &token, result, None);
    }

    Redirect::to("/admin-home")
}
