//! Singleton sections stored as one-record collections.

use serde_json::{Map, Value};

use crate::store::{NodePath, Store, StoreError};

/// Accessor for single-valued content stored as the sole entry of a
/// collection: `{ <push-id>: { field: value } }`.
///
/// The store does not enforce the "sole entry" invariant, so reads pick the
/// record under the smallest key — deterministic, unlike mapping iteration
/// order — and writes target that same record. Extra records left behind by
/// old writers are ignored by [`Singleton::get`] but still visible to
/// [`Singleton::gather_list`], which flattens every block the way the site
/// has always rendered them.
pub struct Singleton {
    path: NodePath,
}

impl Singleton {
    pub fn new(path: &str) -> Self {
        Singleton { path: NodePath::new(path) }
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// The sole record: key and value of the smallest-keyed entry.
    pub async fn get<S: Store + ?Sized>(
        &self,
        store: &S,
    ) -> Result<Option<(String, Value)>, StoreError> {
        let Some(Value::Object(map)) = store.fetch(&self.path).await? else {
            return Ok(None);
        };
        Ok(map.into_iter().min_by(|a, b| a.0.cmp(&b.0)))
    }

    /// String field `field` of the sole record, when present.
    pub async fn get_text<S: Store + ?Sized>(
        &self,
        store: &S,
        field: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self
            .get(store)
            .await?
            .and_then(|(_, record)| record.get(field).and_then(Value::as_str).map(str::to_string)))
    }

    /// The sole record decoded as `T`.
    pub async fn get_record<T, S>(&self, store: &S) -> Result<Option<T>, StoreError>
    where
        T: serde::de::DeserializeOwned,
        S: Store + ?Sized,
    {
        match self.get(store).await? {
            Some((key, record)) => serde_json::from_value(record)
                .map(Some)
                .map_err(|err| StoreError::Decode {
                    path: self.path.join(&key).to_string(),
                    message: err.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Update one field of the sole record, creating the record when the
    /// section is still empty.
    pub async fn set_field<S: Store + ?Sized>(
        &self,
        store: &S,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        match self.get(store).await? {
            Some((key, _)) => store.replace_field(&self.path.join(&key), field, value).await,
            None => {
                let mut record = Map::new();
                record.insert(field.to_string(), value);
                store.create(&self.path, Value::Object(record)).await?;
                Ok(())
            }
        }
    }

    /// Concatenate the `field` lists of every record under this path, in key
    /// order. Historical data occasionally holds more than one block; reads
    /// see all of them even though writes only ever target the first.
    pub async fn gather_list<S: Store + ?Sized>(
        &self,
        store: &S,
        field: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let Some(Value::Object(map)) = store.fetch(&self.path).await? else {
            return Ok(Vec::new());
        };
        let mut blocks: Vec<(String, Value)> = map.into_iter().collect();
        blocks.sort_by(|a, b| a.0.cmp(&b.0));

        let mut items = Vec::new();
        for (_, block) in blocks {
            if let Some(list) = block.get(field).and_then(Value::as_array) {
                items.extend(list.iter().cloned());
            }
        }
        Ok(items)
    }

    /// Read-modify-write the `field` list of the sole record. `edit`
    /// receives the current list (empty when the section is new) and
    /// returns the list to store.
    ///
    /// No transaction backs this: two concurrent editors both read, both
    /// write, and the second write wins. Acceptable under the single-
    /// administrator assumption.
    pub async fn edit_list<S, F>(&self, store: &S, field: &str, edit: F) -> Result<(), StoreError>
    where
        S: Store + ?Sized,
        F: FnOnce(Vec<Value>) -> Vec<Value>,
    {
        let current = self.get(store).await?;
        let items = current
            .as_ref()
            .and_then(|(_, record)| record.get(field).and_then(Value::as_array).cloned())
            .unwrap_or_default();
        let updated = Value::Array(edit(items));

        match current {
            Some((key, _)) => store.replace_field(&self.path.join(&key), field, updated).await,
            None => {
                let mut record = Map::new();
                record.insert(field.to_string(), updated);
                store.create(&self.path, Value::Object(record)).await?;
                Ok(())
            }
        }
    }

    /// Append `item` to the `field` list.
    pub async fn list_append<S: Store + ?Sized>(
        &self,
        store: &S,
        field: &str,
        item: Value,
    ) -> Result<(), StoreError> {
        self.edit_list(store, field, |mut items| {
            items.push(item);
            items
        })
        .await
    }

    /// Replace the item at `index`. Out-of-range indexes are a no-op.
    pub async fn list_set<S: Store + ?Sized>(
        &self,
        store: &S,
        field: &str,
        index: usize,
        item: Value,
    ) -> Result<(), StoreError> {
        self.edit_list(store, field, |mut items| {
            if index < items.len() {
                items[index] = item;
            }
            items
        })
        .await
    }

    /// Remove the item at `index`. Out-of-range indexes are a no-op.
    pub async fn list_remove<S: Store + ?Sized>(
        &self,
        store: &S,
        field: &str,
        index: usize,
    ) -> Result<(), StoreError> {
        self.edit_list(store, field, |mut items| {
            if index < items.len() {
                items.remove(index);
            }
            items
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn set_field_creates_then_updates_one_record() {
        let store = MemoryStore::new();
        let bio = Singleton::new("landing/bio");

        bio.set_field(&store, "bio", json!("first")).await.unwrap();
        bio.set_field(&store, "bio", json!("second")).await.unwrap();

        assert_eq!(bio.get_text(&store, "bio").await.unwrap(), Some("second".to_string()));

        // Still exactly one record under the section.
        let raw = store.fetch(bio.path()).await.unwrap().unwrap();
        assert_eq!(raw.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_picks_the_smallest_key() {
        let store = MemoryStore::from_value(json!({
            "about": {"bio": {
                "-K2": {"bio": "newer"},
                "-K1": {"bio": "older"}
            }}
        }));
        let bio = Singleton::new("about/bio");
        let (key, record) = bio.get(&store).await.unwrap().unwrap();
        assert_eq!(key, "-K1");
        assert_eq!(record["bio"], "older");
    }

    #[tokio::test]
    async fn get_on_empty_section_is_none() {
        let store = MemoryStore::new();
        let heading = Singleton::new("about/heading");
        assert!(heading.get(&store).await.unwrap().is_none());
        assert_eq!(heading.get_text(&store, "heading").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_append_preserves_order() {
        let store = MemoryStore::new();
        let skills = Singleton::new("landing/skills-list");
        for name in ["AWS", "Docker", "Kubernetes"] {
            skills.list_append(&store, "skills", json!(name)).await.unwrap();
        }
        let items = skills.gather_list(&store, "skills").await.unwrap();
        assert_eq!(items, vec![json!("AWS"), json!("Docker"), json!("Kubernetes")]);
    }

    #[tokio::test]
    async fn list_set_and_remove_by_index() {
        let store = MemoryStore::new();
        let skills = Singleton::new("landing/skills-list");
        for name in ["AWS", "Docker", "Terraform"] {
            skills.list_append(&store, "skills", json!(name)).await.unwrap();
        }

        skills.list_set(&store, "skills", 1, json!("Podman")).await.unwrap();
        skills.list_remove(&store, "skills", 0).await.unwrap();

        let items = skills.gather_list(&store, "skills").await.unwrap();
        assert_eq!(items, vec![json!("Podman"), json!("Terraform")]);
    }

    #[tokio::test]
    async fn out_of_range_index_edits_are_ignored() {
        let store = MemoryStore::new();
        let skills = Singleton::new("landing/skills-list");
        skills.list_append(&store, "skills", json!("AWS")).await.unwrap();

        skills.list_set(&store, "skills", 5, json!("nope")).await.unwrap();
        skills.list_remove(&store, "skills", 5).await.unwrap();

        let items = skills.gather_list(&store, "skills").await.unwrap();
        assert_eq!(items, vec![json!("AWS")]);
    }

    #[tokio::test]
    async fn gather_list_flattens_blocks_in_key_order() {
        let store = MemoryStore::from_value(json!({
            "landing": {"skills-list": {
                "-K2": {"skills": ["Docker"]},
                "-K1": {"skills": ["AWS"]}
            }}
        }));
        let skills = Singleton::new("landing/skills-list");
        let items = skills.gather_list(&store, "skills").await.unwrap();
        assert_eq!(items, vec![json!("AWS"), json!("Docker")]);
    }

    #[tokio::test]
    async fn writes_target_the_first_block() {
        let store = MemoryStore::from_value(json!({
            "landing": {"skills-list": {
                "-K1": {"skills": ["AWS"]},
                "-K2": {"skills": ["Docker"]}
            }}
        }));
        let skills = Singleton::new("landing/skills-list");
        skills.list_append(&store, "skills", json!("Kubernetes")).await.unwrap();

        let raw = store.fetch(skills.path()).await.unwrap().unwrap();
        assert_eq!(raw["-K1"]["skills"], json!(["AWS", "Kubernetes"]));
        assert_eq!(raw["-K2"]["skills"], json!(["Docker"]));
    }
}
