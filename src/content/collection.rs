//! Typed collections — records keyed by store-generated push ids.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::store::{NodePath, Store, StoreError};

/// A collection of `T` records at a fixed path.
///
/// Listing returns a `BTreeMap`, so iteration order is key order — and push
/// ids sort in insertion order, which is the display order the site wants.
pub struct Collection<T> {
    path: NodePath,
    _record: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    pub fn new(path: &str) -> Self {
        Collection { path: NodePath::new(path), _record: PhantomData }
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// All records keyed by push id. Entries that no longer decode as `T`
    /// are skipped; the store has no schema to stop strays from appearing.
    pub async fn list<S: Store + ?Sized>(
        &self,
        store: &S,
    ) -> Result<BTreeMap<String, T>, StoreError> {
        let Some(Value::Object(map)) = store.fetch(&self.path).await? else {
            return Ok(BTreeMap::new());
        };
        let mut records = BTreeMap::new();
        for (key, node) in map {
            match serde_json::from_value::<T>(node) {
                Ok(record) => {
                    records.insert(key, record);
                }
                Err(err) => {
                    tracing::warn!(path = %self.path, %key, %err, "skipping undecodable record");
                }
            }
        }
        Ok(records)
    }

    /// One record by key. Absent keys are `Ok(None)`; a present node that
    /// does not decode as `T` is a `Decode` error.
    pub async fn get<S: Store + ?Sized>(
        &self,
        store: &S,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        match store.fetch_child(&self.path, key).await? {
            Some(node) => serde_json::from_value(node)
                .map(Some)
                .map_err(|err| self.decode_error(key, err)),
            None => Ok(None),
        }
    }

    /// Create a record; the store allocates and returns the key.
    pub async fn add<S: Store + ?Sized>(&self, store: &S, record: &T) -> Result<String, StoreError> {
        store.create(&self.path, self.encode(record)?).await
    }

    /// Replace the record at `key` wholesale.
    pub async fn update<S: Store + ?Sized>(
        &self,
        store: &S,
        key: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        store.replace(&self.path, key, self.encode(record)?).await
    }

    /// Delete the record at `key`.
    pub async fn delete<S: Store + ?Sized>(&self, store: &S, key: &str) -> Result<(), StoreError> {
        store.remove(&self.path, key).await
    }

    fn encode(&self, record: &T) -> Result<Value, StoreError> {
        serde_json::to_value(record).map_err(|err| StoreError::Decode {
            path: self.path.to_string(),
            message: err.to_string(),
        })
    }

    fn decode_error(&self, key: &str, err: serde_json::Error) -> StoreError {
        StoreError::Decode { path: self.path.join(key).to_string(), message: err.to_string() }
    }
}
