//! reqwest-backed client for the store's `.json` REST protocol.

use async_trait::async_trait;
use serde_json::Value;

use super::{NodePath, Store, StoreError};

/// HTTP client for the remote document store.
///
/// One instance per process; `reqwest::Client` pools connections
/// internally. Every operation is a single request — no retry, no backoff,
/// no caching.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    /// Create a client for the store at `base_url`.
    pub fn new(base_url: &str) -> Self {
        RestStore {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn read(&self, path: &NodePath) -> Result<Option<Value>, StoreError> {
        let body = self.send(self.client.get(path.url(&self.base_url)), path).await?;
        parse_node(path, &body)
    }

    async fn put(&self, path: &NodePath, value: &Value) -> Result<(), StoreError> {
        self.send(self.client.put(path.url(&self.base_url)).json(value), path)
            .await?;
        Ok(())
    }

    /// Issue a request and return the response body, mapping connection
    /// failures to `Transport` and non-2xx statuses to `Status`.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        path: &NodePath,
    ) -> Result<String, StoreError> {
        let response = request.send().await.map_err(|err| transport(path, &err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status { code: status.as_u16(), path: path.to_string() });
        }
        response.text().await.map_err(|err| transport(path, &err))
    }
}

fn transport(path: &NodePath, err: &reqwest::Error) -> StoreError {
    StoreError::Transport(format!("{}: {}", path, err))
}

/// An empty body and JSON `null` both mean the node does not exist.
fn parse_node(path: &NodePath, body: &str) -> Result<Option<Value>, StoreError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(body).map_err(|err| StoreError::Decode {
        path: path.to_string(),
        message: err.to_string(),
    })?;
    Ok(if value.is_null() { None } else { Some(value) })
}

#[async_trait]
impl Store for RestStore {
    async fn fetch(&self, path: &NodePath) -> Result<Option<Value>, StoreError> {
        self.read(path).await
    }

    async fn fetch_child(&self, path: &NodePath, key: &str) -> Result<Option<Value>, StoreError> {
        self.read(&path.join(key)).await
    }

    async fn create(&self, path: &NodePath, data: Value) -> Result<String, StoreError> {
        let body = self
            .send(self.client.post(path.url(&self.base_url)).json(&data), path)
            .await?;
        let response: Value = serde_json::from_str(&body).map_err(|err| StoreError::Decode {
            path: path.to_string(),
            message: err.to_string(),
        })?;
        response
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::Decode {
                path: path.to_string(),
                message: "create response missing \"name\"".to_string(),
            })
    }

    async fn replace(&self, path: &NodePath, key: &str, data: Value) -> Result<(), StoreError> {
        self.put(&path.join(key), &data).await
    }

    async fn replace_field(
        &self,
        path: &NodePath,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        self.put(&path.join(field), &value).await
    }

    async fn remove(&self, path: &NodePath, key: &str) -> Result<(), StoreError> {
        let target = path.join(key);
        self.send(self.client.delete(target.url(&self.base_url)), &target)
            .await?;
        Ok(())
    }
}
