//! In-process store backend with the remote store's tree semantics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{NodePath, Store, StoreError};

/// In-memory JSON document tree. Clone-friendly via `Arc`; all clones share
/// the same tree.
///
/// Mirrors the remote store's behavior where it matters to callers: absent
/// paths read as `None`, writes create intermediate objects on demand,
/// deleting the last child prunes the now-empty parent, and generated keys
/// are strictly increasing so lexicographic key order equals insertion
/// order — the property the remote store's push ids provide.
#[derive(Clone)]
pub struct MemoryStore {
    root: Arc<RwLock<Value>>,
    counter: Arc<AtomicU64>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty tree.
    pub fn new() -> Self {
        MemoryStore {
            root: Arc::new(RwLock::new(Value::Null)),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a tree seeded with existing content.
    pub fn from_value(root: Value) -> Self {
        MemoryStore {
            root: Arc::new(RwLock::new(root)),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    fn next_key(&self) -> String {
        // Fixed-width so string order tracks numeric order, `-K` prefix to
        // look like the remote store's push ids.
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("-K{:018}", n)
    }

    fn read_root(&self) -> Result<RwLockReadGuard<'_, Value>, StoreError> {
        self.root
            .read()
            .map_err(|_| StoreError::Transport("store lock poisoned".to_string()))
    }

    fn write_root(&self) -> Result<RwLockWriteGuard<'_, Value>, StoreError> {
        self.root
            .write()
            .map_err(|_| StoreError::Transport("store lock poisoned".to_string()))
    }
}

/// Navigate to the node at `path`, if present.
fn node<'a>(root: &'a Value, path: &NodePath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Set the node at `path`, creating intermediate objects as needed.
fn set_node(root: &mut Value, path: &NodePath, value: Value) {
    let mut current = root;
    for segment in path.segments() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(map) = current else {
            unreachable!("just replaced with an object");
        };
        current = map.entry(segment.to_string()).or_insert(Value::Null);
    }
    *current = value;
}

/// Delete the node at `segments`, pruning parents left empty behind it.
fn delete_node(node: &mut Value, segments: &[&str]) {
    let Some((first, rest)) = segments.split_first() else {
        *node = Value::Null;
        return;
    };
    if let Value::Object(map) = node {
        if rest.is_empty() {
            map.remove(*first);
        } else {
            let prune = match map.get_mut(*first) {
                Some(child) => {
                    delete_node(child, rest);
                    is_empty_node(child)
                }
                None => false,
            };
            if prune {
                map.remove(*first);
            }
        }
    }
}

fn is_empty_node(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn fetch(&self, path: &NodePath) -> Result<Option<Value>, StoreError> {
        let root = self.read_root()?;
        Ok(node(&root, path).filter(|v| !v.is_null()).cloned())
    }

    async fn fetch_child(&self, path: &NodePath, key: &str) -> Result<Option<Value>, StoreError> {
        self.fetch(&path.join(key)).await
    }

    async fn create(&self, path: &NodePath, data: Value) -> Result<String, StoreError> {
        let key = self.next_key();
        let mut root = self.write_root()?;
        set_node(&mut root, &path.join(&key), data);
        Ok(key)
    }

    async fn replace(&self, path: &NodePath, key: &str, data: Value) -> Result<(), StoreError> {
        let mut root = self.write_root()?;
        set_node(&mut root, &path.join(key), data);
        Ok(())
    }

    async fn replace_field(
        &self,
        path: &NodePath,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let mut root = self.write_root()?;
        set_node(&mut root, &path.join(field), value);
        Ok(())
    }

    async fn remove(&self, path: &NodePath, key: &str) -> Result<(), StoreError> {
        let target = path.join(key);
        let segments: Vec<&str> = target.segments().collect();
        let mut root = self.write_root()?;
        delete_node(&mut root, &segments);
        Ok(())
    }
}
