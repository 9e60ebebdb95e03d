//! Admin authentication: credential lookup and bearer sessions.
//!
//! The admin credentials live inside the same fixed links record the public
//! site reads its contact links from — `links/<id>/links`, fields
//! `admin_username` / `admin_password` — and are compared verbatim against
//! the submitted login form.
//!
//! Sessions are server-side: login issues an opaque token, every admin
//! request revalidates it against [`SessionStore`], and logout removes it.
//! Flash messages ride on the session and are delivered once, on the next
//! rendered page.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::store::{NodePath, Store, StoreError};

/// The stored admin credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Verbatim comparison — the store holds the credentials in plaintext.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Load the admin credentials from the fixed links record. `Ok(None)` when
/// the record or either field is missing.
pub async fn load_credentials<S: Store + ?Sized>(
    store: &S,
    links_path: &NodePath,
) -> Result<Option<Credentials>, StoreError> {
    let Some(links) = store.fetch(links_path).await? else {
        return Ok(None);
    };
    let username = links.get("admin_username").and_then(Value::as_str);
    let password = links.get("admin_password").and_then(Value::as_str);
    match (username, password) {
        (Some(username), Some(password)) => Ok(Some(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })),
        _ => Ok(None),
    }
}

/// Severity of a flash message, mirroring the dashboard's categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A one-shot message surfaced on the next rendered admin page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Server-side session registry.
///
/// Tokens are opaque UUIDs handed to the client at login. Clone-friendly
/// via `Arc`; both services' handlers share one registry per process.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Vec<Flash>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session and return its token.
    pub fn open(&self) -> String {
        let token = Uuid::new_v4().to_string();
        self.write().insert(token.clone(), Vec::new());
        token
    }

    /// Whether `token` names a live session.
    pub fn is_valid(&self, token: &str) -> bool {
        self.read().contains_key(token)
    }

    /// Close the session. Unknown tokens are ignored.
    pub fn close(&self, token: &str) {
        self.write().remove(token);
    }

    /// Queue a flash message for the session. Unknown tokens are ignored —
    /// a race with logout should not take the handler down.
    pub fn flash(&self, token: &str, level: FlashLevel, message: impl Into<String>) {
        if let Some(queue) = self.write().get_mut(token) {
            queue.push(Flash { level, message: message.into() });
        }
    }

    /// Drain the session's queued messages; each is delivered once.
    pub fn take_flashes(&self, token: &str) -> Vec<Flash> {
        self.write().get_mut(token).map(std::mem::take).unwrap_or_default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<Flash>>> {
        match self.sessions.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<Flash>>> {
        match self.sessions.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
