//! The `Store` trait — four CRUD verbs over path-keyed JSON nodes.

use async_trait::async_trait;
use serde_json::Value;

use super::{NodePath, StoreError};

/// Path-keyed access to a hierarchical JSON document store.
///
/// `replace` and `replace_field` are deliberately separate operations:
/// callers always say whether they are overwriting a whole record or one
/// field inside it. Nothing is inferred from the shape of the path.
///
/// Writes are plain replacements. There is no merge, no transaction, and no
/// concurrency token — two editors doing read-modify-write on the same node
/// are last-write-wins. The expected deployment has a single administrator.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch the node at `path`. `Ok(None)` when nothing was ever written
    /// there.
    async fn fetch(&self, path: &NodePath) -> Result<Option<Value>, StoreError>;

    /// Fetch the child node at `path/key`.
    async fn fetch_child(&self, path: &NodePath, key: &str) -> Result<Option<Value>, StoreError>;

    /// Create a record under `path`. The store allocates the key — a push id
    /// whose lexicographic order follows insertion order — and returns it.
    async fn create(&self, path: &NodePath, data: Value) -> Result<String, StoreError>;

    /// Replace the whole node at `path/key`. Fields absent from `data` are
    /// gone afterwards.
    async fn replace(&self, path: &NodePath, key: &str, data: Value) -> Result<(), StoreError>;

    /// Replace one field of the record at `path` — here `path` already names
    /// the record. Sibling fields are untouched.
    async fn replace_field(
        &self,
        path: &NodePath,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError>;

    /// Delete the node at `path/key`.
    async fn remove(&self, path: &NodePath, key: &str) -> Result<(), StoreError>;
}
