//! Public portfolio site service.
//!
//! Read-mostly: the home view aggregates every content section, and the few
//! POST/redirect routes never mutate the store. Page rendering is the
//! frontend's job — handlers return view data as JSON.

mod view;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};

use crate::content::{Content, ResumeFile};
use crate::notify::{ContactMessage, TelegramNotifier};
use crate::store::Store;
use crate::upload::UploadStore;

pub use view::HomeView;

/// Shared state of the site service.
pub struct SiteState<S> {
    pub store: S,
    pub content: Content,
    pub uploads: UploadStore,
    pub notifier: Option<TelegramNotifier>,
    pub owner_name: String,
    pub owner_tagline: String,
    pub admin_url: String,
}

/// Build the site router.
pub fn router<S: Store + 'static>(state: Arc<SiteState<S>>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/contact", post(contact))
        .route("/download_resume", get(download_resume))
        .route("/github", get(github_redirect))
        .route("/linkedin", get(linkedin_redirect))
        .route("/edit", get(edit_redirect).post(edit_redirect))
        .with_state(state)
}

/// Serve the site at the given address (e.g. `"127.0.0.1:8080"`).
pub async fn serve<S: Store + 'static>(
    state: Arc<SiteState<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// `GET /` — the aggregated home view. Always renders; sections the store
/// cannot deliver degrade to their defaults.
async fn home<S: Store + 'static>(State(state): State<Arc<SiteState<S>>>) -> Json<HomeView> {
    Json(view::assemble_home(&state).await)
}

/// `POST /contact` — forward a submission to the notifier. The submitter
/// always gets "OK"; a lost notification is logged, not surfaced.
async fn contact<S: Store + 'static>(
    State(state): State<Arc<SiteState<S>>>,
    Form(message): Form<ContactMessage>,
) -> &'static str {
    tracing::info!(name = %message.name, email = %message.email, subject = %message.subject, "contact message received");
    match &state.notifier {
        Some(notifier) => {
            if let Err(err) = notifier.send(&message).await {
                tracing::warn!(%err, "contact notification failed");
            }
        }
        None => tracing::info!("no notifier configured; contact message only logged"),
    }
    "OK"
}

/// `GET /download_resume` — serve the uploaded resume, falling back to the
/// default file when the recorded one is missing.
async fn download_resume<S: Store + 'static>(
    State(state): State<Arc<SiteState<S>>>,
) -> Response {
    let recorded = state
        .content
        .about_resume()
        .get_record::<ResumeFile, _>(&state.store)
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "resume lookup failed; trying the default file");
            None
        });
    let filename = recorded.map(|r| r.filename).unwrap_or_else(|| "Resume.pdf".to_string());

    let bytes = match tokio::fs::read(state.uploads.resume_path(&filename)).await {
        Ok(bytes) => bytes,
        Err(_) => match tokio::fs::read(state.uploads.resume_path("Resume.pdf")).await {
            Ok(bytes) => bytes,
            Err(_) => return (StatusCode::NOT_FOUND, "no resume uploaded").into_response(),
        },
    };

    let content_type = if filename.to_lowercase().ends_with(".pdf") {
        "application/pdf"
    } else {
        "text/plain"
    };
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// `GET /github` — redirect to the stored GitHub link.
async fn github_redirect<S: Store + 'static>(
    State(state): State<Arc<SiteState<S>>>,
) -> Redirect {
    link_redirect(&state, |links| links.github, "https://github.com").await
}

/// `GET /linkedin` — redirect to the stored LinkedIn link.
async fn linkedin_redirect<S: Store + 'static>(
    State(state): State<Arc<SiteState<S>>>,
) -> Redirect {
    link_redirect(&state, |links| links.linkedin, "https://linkedin.com").await
}

/// `GET|POST /edit` — editing happens on the admin dashboard.
async fn edit_redirect<S: Store + 'static>(State(state): State<Arc<SiteState<S>>>) -> Redirect {
    Redirect::temporary(&format!("{}/admin-login", state.admin_url.trim_end_matches('/')))
}

async fn link_redirect<S: Store + 'static>(
    state: &SiteState<S>,
    pick: fn(crate::content::ContactLinks) -> String,
    fallback: &str,
) -> Redirect {
    let links = state.content.contact_links(&state.store).await.unwrap_or_else(|err| {
        tracing::warn!(%err, "links lookup failed; redirecting to fallback");
        Default::default()
    });
    Redirect::temporary(&normalize_url(pick(links), fallback))
}

/// Stored links are often bare hosts; give them a scheme before redirecting.
fn normalize_url(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else if value.starts_with("http") {
        value
    } else {
        format!("https://{}", value)
    }
}
