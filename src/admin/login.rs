//! Login, logout, and session issuance.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form, Json};
use serde::Deserialize;
use serde_json::json;

use crate::auth;
use crate::store::Store;

use super::{AdminState, SessionToken, SESSION_COOKIE};

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// `GET /admin-login`.
pub(crate) async fn page<S: Store + 'static>(
    State(_state): State<Arc<AdminState<S>>>,
) -> Json<serde_json::Value> {
    Json(json!({ "view": "admin-login" }))
}

/// `POST /admin-login` — check the submitted credentials against the stored
/// ones and issue a session token. The token comes back both as JSON (for
/// API clients) and as a cookie (for browsers).
pub(crate) async fn submit<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let links_path = state.content.links_path();
    match auth::load_credentials(&state.store, &links_path).await {
        Ok(Some(credentials)) if credentials.matches(&form.username, &form.password) => {
            let token = state.sessions.open();
            let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token);
            (
                [(header::SET_COOKIE, cookie)],
                Json(json!({ "token": token, "redirect": "/admin-home" })),
            )
                .into_response()
        }
        Ok(Some(_)) => {
            (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid username or password." })))
                .into_response()
        }
        Ok(None) => {
            (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Admin credentials not found." })))
                .into_response()
        }
        Err(err) => {
            tracing::warn!(%err, "credential lookup failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "Could not reach the content store." })),
            )
                .into_response()
        }
    }
}

/// `GET /logout` — invalidate the session and send the client back to the
/// login page.
pub(crate) async fn logout<S: Store + 'static>(
    State(state): State<Arc<AdminState<S>>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Redirect {
    state.sessions.close(&token);
    Redirect::to("/admin-login")
}
