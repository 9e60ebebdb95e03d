//! Certification cards with badge-image uploads.
//!
//! The page's forms submit as multipart because the add and update flows
//! can carry an image; text-only submissions ride in the same envelope.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form, Json};
use serde::{Deserialize, Serialize};

use crate::auth::FlashLevel;
use crate::content::Certification;
use crate::store::Store;

use super::experience::EditView;
use super::{
    flash_outcome, read_multipart, required, trimmed, with_flashes, AdminState, FormFields, Page,
    SessionToken,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct CertificationView {
    pub certifications: BTreeMap<String, Certification>,
}

/// `GET /admin-certification`.
pub(crate) async fn page<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Json<Page<CertificationView>> {
    let certifications =
        state.content.certifications().list(&state.store).await.unwrap_or_else(|err| {
            tracing::warn!(%err, "certifications read failed");
            BTreeMap::new()
        });
    Json(with_flashes(&state.sessions, &token, CertificationView { certifications }))
}

/// `POST /admin-certification` — multipart: text fields plus an optional
/// `cert_image` upload.
pub(crate) async fn submit<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    multipart: Multipart,
) -> Response {
    let sessions = &state.sessions;
    let certifications = state.content.certifications();

    let (form, upload) = match read_multipart(multipart, "cert_image").await {
        Ok(parts) => parts,
        Err(message) => {
            sessions.flash(&token, FlashLevel::Error, message);
            return Redirect::to("/admin-certification").into_response();
        }
    };

    // Store the image first; every mutating branch below wants its path.
    let mut image_path = None;
    if let Some(file) = upload {
        match state.uploads.save_image(&file.name, &file.bytes).await {
            Ok(path) => image_path = Some(path),
            Err(err) => {
                tracing::warn!(%err, "certification image rejected");
                sessions.flash(
                    &token,
                    FlashLevel::Error,
                    "Invalid file type. Please upload an image file (JPG, PNG, WEBP, etc.).",
                );
                return Redirect::to("/admin-certification").into_response();
            }
        }
    }

    if let Some(key) = required(&form, "edit_key") {
        match certifications.get(&state.store, &key).await {
            Ok(Some(record)) => return Json(EditView { key, record }).into_response(),
            Ok(None) => sessions.flash(&token, FlashLevel::Error, "Certification not found."),
            Err(err) => {
                tracing::warn!(%err, "certification lookup failed");
                sessions.flash(&token, FlashLevel::Error, format!("Lookup failed: {}", err));
            }
        }
    } else if let Some(key) = required(&form, "update_key") {
        // Keep the existing image when the update carries no new one.
        let image = match image_path {
            Some(path) => Some(path),
            None => match certifications.get(&state.store, &key).await {
                Ok(Some(existing)) => Some(existing.image),
                Ok(None) => {
                    sessions.flash(
                        &token,
                        FlashLevel::Error,
                        "Error: Could not find existing certification.",
                    );
                    None
                }
                Err(err) => {
                    tracing::warn!(%err, "certification lookup failed");
                    sessions.flash(&token, FlashLevel::Error, format!("Lookup failed: {}", err));
                    None
                }
            },
        };
        if let Some(image) = image {
            let record = Certification {
                title: trimmed(&form, "title").unwrap_or_default(),
                image,
                filter: trimmed(&form, "filter").unwrap_or_default(),
                url: trimmed(&form, "url").unwrap_or_default(),
            };
            let result = certifications.update(&state.store, &key, &record).await;
            flash_outcome(sessions, &token, result, Some("Certification updated successfully!"));
        }
    } else {
        match (required(&form, "title"), required(&form, "filter"), image_path) {
            (Some(title), Some(filter), Some(image)) => {
                let record = Certification {
                    title,
                    image,
                    filter,
                    url: trimmed(&form, "url").unwrap_or_default(),
                };
                let result = certifications.add(&state.store, &record).await.map(|_| ());
                flash_outcome(sessions, &token, result, Some("Certification added successfully!"));
            }
            _ => sessions.flash(
                &token,
                FlashLevel::Error,
                "Please fill in all required fields and upload an image.",
            ),
        }
    }

    Redirect::to("/admin-certification").into_response()
}

/// `POST /delete-certification`.
pub(crate) async fn delete<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<FormFields>,
) -> Redirect {
    if let Some(key) = required(&form, "key") {
        let result = state.content.certifications().delete(&state.store, &key).await;
        flash_outcome(
            &state.sessions,
            &token,
            result,
            Some("Certification deleted successfully!"),
        );
    }
    Redirect::to("/admin-certification")
}
