//! Contact info and social links, all living in the fixed links record.
//!
//! Each value is written with a field-level replace, never a whole-record
//! one — the same record carries the admin credentials, and a full replace
//! would wipe them.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Redirect;
use axum::{Extension, Form, Json};
use serde::{Deserialize, Serialize};

use crate::content::ContactLinks;
use crate::store::{Store, StoreError};

use super::{flash_outcome, trimmed, with_flashes, AdminState, FormFields, Page, SessionToken};

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactView {
    pub contact_info: ContactLinks,
}

/// `GET /admin-contact`.
pub(crate) async fn page<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Json<Page<ContactView>> {
    let contact_info = state.content.contact_links(&state.store).await.unwrap_or_else(|err| {
        tracing::warn!(%err, "links read failed");
        ContactLinks::default()
    });
    Json(with_flashes(&state.sessions, &token, ContactView { contact_info }))
}

/// `POST /admin-contact` — the contact form and the social form share this
/// route; which fields are present decides which group is written.
pub(crate) async fn submit<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<FormFields>,
) -> Redirect {
    let sessions = &state.sessions;

    if form.contains_key("email") || form.contains_key("phone") {
        let result = write_fields(&state, &form, &["email", "phone"]).await;
        flash_outcome(sessions, &token, result, Some("Contact information updated successfully!"));
    } else if ["linkedin", "github", "telegram", "whatsapp"]
        .iter()
        .any(|field| form.contains_key(*field))
    {
        let result =
            write_fields(&state, &form, &["linkedin", "github", "telegram", "whatsapp"]).await;
        flash_outcome(sessions, &token, result, Some("Social media links updated successfully!"));
    }

    Redirect::to("/admin-contact")
}

/// Write each named field from the form, blank when absent — submitting a
/// group always writes the whole group, as the dashboard always has.
async fn write_fields<S: Store + 'static>(
    state: &AdminState<S>,
    form: &FormFields,
    fields: &[&str],
) -> Result<(), StoreError> {
    for field in fields {
        let value = trimmed(form, field).unwrap_or_default();
        state.content.set_link_field(&state.store, field, &value).await?;
    }
    Ok(())
}
