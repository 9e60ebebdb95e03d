//! Shared fixtures: a fake document-store server speaking the `.json` wire
//! protocol, seeded content, and spawn helpers for the two services.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use folio::admin::AdminState;
use folio::auth::SessionStore;
use folio::content::Content;
use folio::notify::TelegramNotifier;
use folio::site::SiteState;
use folio::store::{MemoryStore, NodePath, Store};
use folio::upload::UploadStore;

/// Links record id used by all seeded fixtures.
pub const LINKS_KEY: &str = "-Kfixed";

/// Bind an app on port 0 and return its base URL.
pub async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// =============================================================================
// Fake document-store server
// =============================================================================

/// Start an HTTP server speaking the store wire protocol over a
/// `MemoryStore` tree. Returns the base URL and the backing tree, so tests
/// can assert on what the protocol actually persisted.
pub async fn spawn_fake_store() -> (String, MemoryStore) {
    let store = MemoryStore::new();
    let base = spawn_fake_store_with(store.clone()).await;
    (base, store)
}

pub async fn spawn_fake_store_with(store: MemoryStore) -> String {
    let app = Router::new()
        .route(
            "/*path",
            get(store_get).put(store_put).post(store_post).delete(store_delete),
        )
        .with_state(store);
    spawn_app(app).await
}

/// Strip the protocol's `.json` suffix.
fn json_path(path: &str) -> Result<NodePath, Response> {
    match path.strip_suffix(".json") {
        Some(stripped) => Ok(NodePath::new(stripped)),
        None => Err((StatusCode::BAD_REQUEST, "missing .json suffix").into_response()),
    }
}

async fn store_get(State(store): State<MemoryStore>, Path(path): Path<String>) -> Response {
    let node_path = match json_path(&path) {
        Ok(p) => p,
        Err(response) => return response,
    };
    // Deterministic failure hook for error-mapping tests.
    if node_path.as_str() == "__boom__" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    match store.fetch(&node_path).await {
        Ok(Some(value)) => Json(value).into_response(),
        Ok(None) => Json(Value::Null).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn store_put(
    State(store): State<MemoryStore>,
    Path(path): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let node_path = match json_path(&path) {
        Ok(p) => p,
        Err(response) => return response,
    };
    let segments: Vec<&str> = node_path.segments().collect();
    let Some((key, parent)) = segments.split_last() else {
        return (StatusCode::BAD_REQUEST, "cannot replace the root").into_response();
    };
    match store.replace(&NodePath::new(&parent.join("/")), key, body.clone()).await {
        Ok(()) => Json(body).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn store_post(
    State(store): State<MemoryStore>,
    Path(path): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let node_path = match json_path(&path) {
        Ok(p) => p,
        Err(response) => return response,
    };
    match store.create(&node_path, body).await {
        Ok(key) => Json(json!({ "name": key })).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn store_delete(State(store): State<MemoryStore>, Path(path): Path<String>) -> Response {
    let node_path = match json_path(&path) {
        Ok(p) => p,
        Err(response) => return response,
    };
    let segments: Vec<&str> = node_path.segments().collect();
    let Some((key, parent)) = segments.split_last() else {
        return (StatusCode::BAD_REQUEST, "cannot delete the root").into_response();
    };
    match store.remove(&NodePath::new(&parent.join("/")), key).await {
        Ok(()) => Json(Value::Null).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

// =============================================================================
// Seeded content
// =============================================================================

/// A content tree with one record in every section, plus the admin
/// credentials (`admin` / `hunter2`).
pub fn seeded_tree() -> Value {
    json!({
        "landing": {
            "bio": {"-K01": {"bio": "Cloud engineer and builder."}},
            "skills-list": {"-K02": {"skills": ["AWS", "Docker"]}}
        },
        "about": {
            "bio": {"-K03": {"bio": "I build cloud things."}},
            "heading": {"-K04": {"heading": "Who I am"}},
            "skills": {"-K05": {"skills": [
                {"Skill": "Terraform", "Description": "Infrastructure as code", "percentage": 80, "category": "Cloud & DevOps"}
            ]}}
        },
        "resume": {
            "professional_summary": {"-K06": {"summary": "Seasoned engineer."}},
            "technical_skills": {"-K07": {"skills": [{"name": "Databases", "percentage": 90}]}},
            "education": {"-K08": {
                "institution": "MIT",
                "designation": "BSc Computer Science",
                "period": "2014-2018",
                "description": "Systems focus"
            }}
        },
        "experience": {"-K09": {
            "company": "Acme",
            "role": "Eng",
            "duration": "2020-2022",
            "description": "Built things"
        }},
        "certifications": {"-K10": {
            "title": "CKA",
            "image": "assets/img/portfolio/cert-seed0000.png",
            "filter": "filter-cloud",
            "url": ""
        }},
        "projects": {"-K11": {
            "title": "folio",
            "description": "This very site",
            "icon": "bi bi-briefcase",
            "url": ""
        }},
        "links": {"-Kfixed": {"links": {
            "email": "owner@example.com",
            "phone": "+1 555 0100",
            "linkedin": "linkedin.com/in/owner",
            "github": "github.com/owner",
            "telegram": "t.me/owner",
            "whatsapp": "wa.me/15550100",
            "admin_username": "admin",
            "admin_password": "hunter2"
        }}}
    })
}

pub fn seeded_store() -> MemoryStore {
    MemoryStore::from_value(seeded_tree())
}

/// A scratch directory for uploads, unique per call.
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("folio-test-{}", Uuid::new_v4().simple()))
}

// =============================================================================
// Service spawn helpers
// =============================================================================

pub struct AdminApp {
    pub base: String,
    pub resume_dir: PathBuf,
    pub image_dir: PathBuf,
}

/// Start the admin service over the given store.
pub async fn spawn_admin<S: Store + 'static>(store: S) -> AdminApp {
    let scratch = scratch_dir();
    let resume_dir = scratch.join("resume");
    let image_dir = scratch.join("portfolio");
    let state = Arc::new(AdminState {
        store,
        content: Content::new(LINKS_KEY),
        sessions: SessionStore::new(),
        uploads: UploadStore::new(&resume_dir, &image_dir),
    });
    let base = spawn_app(folio::admin::router(state)).await;
    AdminApp { base, resume_dir, image_dir }
}

pub struct SiteOptions {
    pub notifier: Option<TelegramNotifier>,
    pub resume_dir: PathBuf,
}

impl Default for SiteOptions {
    fn default() -> Self {
        let scratch = scratch_dir();
        SiteOptions { notifier: None, resume_dir: scratch.join("resume") }
    }
}

/// Start the site service over the given store.
pub async fn spawn_site<S: Store + 'static>(store: S, options: SiteOptions) -> String {
    let image_dir = options.resume_dir.parent().map(|p| p.join("portfolio")).unwrap_or_default();
    let state = Arc::new(SiteState {
        store,
        content: Content::new(LINKS_KEY),
        uploads: UploadStore::new(&options.resume_dir, image_dir),
        notifier: options.notifier,
        owner_name: "Test Owner".to_string(),
        owner_tagline: "Builder of test fixtures".to_string(),
        admin_url: "http://127.0.0.1:8081".to_string(),
    });
    spawn_app(folio::site::router(state)).await
}

/// Log in with the seeded credentials and return the session token.
pub async fn login(client: &reqwest::Client, base: &str) -> String {
    let response = client
        .post(format!("{base}/admin-login"))
        .form(&[("username", "admin"), ("password", "hunter2")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200, "login should succeed for seeded credentials");
    let body: Value = response.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

/// A client that sends the session token on every request.
pub fn authed_client(token: &str) -> reqwest::Client {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert("x-session-token", token.parse().unwrap());
    reqwest::Client::builder().default_headers(headers).build().unwrap()
}

// =============================================================================
// Fake Telegram endpoint
// =============================================================================

#[derive(Clone, Default)]
pub struct SentMessages(pub Arc<Mutex<Vec<(String, String)>>>);

/// Start a server capturing `sendMessage` form posts. Returns the base URL
/// to hand to `TelegramNotifier::with_api_base` and the captured messages.
pub async fn spawn_fake_telegram() -> (String, SentMessages) {
    let sent = SentMessages::default();
    let app = Router::new()
        .route("/*path", axum::routing::post(capture_message))
        .with_state(sent.clone());
    (spawn_app(app).await, sent)
}

async fn capture_message(
    State(sent): State<SentMessages>,
    Path(_path): Path<String>,
    Form(form): Form<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    let chat_id = form.get("chat_id").cloned().unwrap_or_default();
    let text = form.get("text").cloned().unwrap_or_default();
    sent.0.lock().unwrap().push((chat_id, text));
    Json(json!({ "ok": true }))
}
