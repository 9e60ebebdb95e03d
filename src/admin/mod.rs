//! Admin dashboard service.
//!
//! Every route except the login page sits behind the session middleware.
//! POST flows are post-redirect-get: the handler mutates the store, queues a
//! flash message with the outcome (including write failures — a failed save
//! must not look like a successful one), and redirects back to its page.
//! GET pages return view data as JSON with the session's drained flashes.
//!
//! Within a page, submissions dispatch on which form fields are present —
//! the dashboard's forms have always worked that way, one page serving
//! several small forms.

mod about;
mod certification;
mod contact;
mod education;
mod experience;
mod home;
mod login;
mod project;

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Multipart, Request, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::auth::{Flash, FlashLevel, SessionStore};
use crate::content::Content;
use crate::store::{Store, StoreError};
use crate::upload::UploadStore;

/// Cookie carrying the session token, for browser clients; API clients send
/// the `x-session-token` header instead.
pub const SESSION_COOKIE: &str = "folio_session";

/// Header carrying the session token.
pub const SESSION_HEADER: &str = "x-session-token";

/// Shared state of the admin service.
pub struct AdminState<S> {
    pub store: S,
    pub content: Content,
    pub sessions: SessionStore,
    pub uploads: UploadStore,
}

/// The validated session token, inserted by the middleware for handlers.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// A rendered admin page: the section's view data plus the session's
/// drained flash messages.
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub flashes: Vec<Flash>,
    #[serde(flatten)]
    pub view: T,
}

/// Build the admin router.
pub fn router<S: Store + 'static>(state: Arc<AdminState<S>>) -> Router {
    let protected = Router::new()
        .route("/admin-home", get(home::page).post(home::submit))
        .route("/admin-about", get(about::page).post(about::submit))
        .route("/admin-about/resume", post(about::upload_resume))
        .route("/admin-experience", get(experience::page).post(experience::submit))
        .route("/delete-experience", post(experience::delete))
        .route("/admin-education", get(education::page).post(education::submit))
        .route("/delete-education", post(education::delete))
        .route("/admin-certification", get(certification::page).post(certification::submit))
        .route("/delete-certification", post(certification::delete))
        .route("/admin-project", get(project::page).post(project::submit))
        .route("/delete-project", post(project::delete))
        .route("/admin-contact", get(contact::page).post(contact::submit))
        .route("/logout", get(login::logout))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session::<S>));

    Router::new()
        .route("/", get(|| async { Redirect::to("/admin-login") }))
        .route("/admin-login", get(login::page).post(login::submit))
        .merge(protected)
        .layer(middleware::from_fn(no_store_headers))
        .with_state(state)
}

/// Serve the dashboard at the given address (e.g. `"127.0.0.1:8081"`).
pub async fn serve<S: Store + 'static>(
    state: Arc<AdminState<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// Redirect to the login page unless the request carries a live session
/// token; stash the token for handlers when it does.
async fn require_session<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    mut request: Request,
    next: Next,
) -> Response {
    match session_token(request.headers()).filter(|token| state.sessions.is_valid(token)) {
        Some(token) => {
            request.extensions_mut().insert(SessionToken(token));
            next.run(request).await
        }
        None => Redirect::to("/admin-login").into_response(),
    }
}

/// Admin pages are never cacheable.
async fn no_store_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}

/// The session token from the `x-session-token` header, or the session
/// cookie for browser clients.
fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()) {
        return Some(token.to_string());
    }
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

// =============================================================================
// Shared handler plumbing
// =============================================================================

/// Admin forms arrive as flat string maps; handlers dispatch on which fields
/// are present.
pub(crate) type FormFields = HashMap<String, String>;

/// A trimmed form field, when present.
pub(crate) fn trimmed(form: &FormFields, name: &str) -> Option<String> {
    form.get(name).map(|value| value.trim().to_string())
}

/// A trimmed, non-empty form field.
pub(crate) fn required(form: &FormFields, name: &str) -> Option<String> {
    trimmed(form, name).filter(|value| !value.is_empty())
}

/// Parse a list index from a form field.
pub(crate) fn parse_index(form: &FormFields, name: &str) -> Result<usize, String> {
    let raw = form.get(name).ok_or_else(|| format!("missing field {}", name))?;
    raw.trim().parse().map_err(|_| format!("'{}' is not a valid index", raw.trim()))
}

/// Parse a 0–100 percentage from a form field. Non-numeric input is a
/// handled error, not a crash.
pub(crate) fn parse_percentage(form: &FormFields, name: &str) -> Result<u8, String> {
    let raw = form.get(name).map(|v| v.trim()).unwrap_or_default();
    match raw.parse::<u8>() {
        Ok(value) if value <= 100 => Ok(value),
        _ => Err(format!("'{}' is not a percentage between 0 and 100", raw)),
    }
}

/// Record a write outcome on the session: optional success flash, and an
/// error flash whenever the store write failed — the redirect alone must
/// never pass a failed save off as a successful one.
pub(crate) fn flash_outcome(
    sessions: &SessionStore,
    token: &str,
    result: Result<(), StoreError>,
    success: Option<&str>,
) {
    match result {
        Ok(()) => {
            if let Some(message) = success {
                sessions.flash(token, FlashLevel::Success, message);
            }
        }
        Err(err) => {
            tracing::warn!(%err, "store write failed");
            sessions.flash(token, FlashLevel::Error, format!("Update failed: {}", err));
        }
    }
}

/// A file pulled out of a multipart form.
pub(crate) struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Collect the text fields and the optional `file_field` file from a
/// multipart form.
pub(crate) async fn read_multipart(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<(FormFields, Option<UploadedFile>), String> {
    let mut fields = FormFields::new();
    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(|err| err.to_string())? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let filename = field.file_name().unwrap_or_default().to_string();
        if name == file_field && !filename.is_empty() {
            let bytes = field.bytes().await.map_err(|err| err.to_string())?;
            file = Some(UploadedFile { name: filename, bytes: bytes.to_vec() });
        } else {
            fields.insert(name, field.text().await.map_err(|err| err.to_string())?);
        }
    }
    Ok((fields, file))
}

/// Drain the session's flashes into a page payload.
pub(crate) fn with_flashes<T>(sessions: &SessionStore, token: &str, view: T) -> Page<T> {
    Page { flashes: sessions.take_flashes(token), view }
}
