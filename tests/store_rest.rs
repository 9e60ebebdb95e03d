//! `RestStore` against an in-process server speaking the wire protocol.
//!
//! Starts an axum server over a `MemoryStore` tree and exercises the real
//! reqwest client path, including the error mapping.

mod support;

use folio::store::{NodePath, RestStore, Store, StoreError};
use serde_json::json;
use support::spawn_fake_store;

#[tokio::test]
async fn absent_node_reads_none() {
    let (base, _tree) = spawn_fake_store().await;
    let store = RestStore::new(&base);

    let fetched = store.fetch(&NodePath::new("never/written")).await.unwrap();
    assert_eq!(fetched, None);
}

#[tokio::test]
async fn create_returns_the_allocated_key() {
    let (base, tree) = spawn_fake_store().await;
    let store = RestStore::new(&base);
    let path = NodePath::new("experience");
    let record = json!({"company": "Acme", "role": "Eng", "duration": "2020", "description": "d"});

    let key = store.create(&path, record.clone()).await.unwrap();
    assert_eq!(store.fetch_child(&path, &key).await.unwrap(), Some(record.clone()));

    // The key the protocol returned is the key the tree holds.
    let raw = tree.fetch(&path).await.unwrap().unwrap();
    assert_eq!(raw[&key], record);
}

#[tokio::test]
async fn replace_and_replace_field_round_trip() {
    let (base, _tree) = spawn_fake_store().await;
    let store = RestStore::new(&base);
    let path = NodePath::new("projects");

    let key = store
        .create(&path, json!({"title": "folio", "description": "old", "icon": "bi", "url": ""}))
        .await
        .unwrap();

    store.replace(&path, &key, json!({"title": "folio", "description": "new"})).await.unwrap();
    assert_eq!(
        store.fetch_child(&path, &key).await.unwrap(),
        Some(json!({"title": "folio", "description": "new"}))
    );

    store.replace_field(&path.join(&key), "description", json!("newer")).await.unwrap();
    assert_eq!(
        store.fetch_child(&path, &key).await.unwrap(),
        Some(json!({"title": "folio", "description": "newer"}))
    );
}

#[tokio::test]
async fn remove_deletes_over_the_wire() {
    let (base, tree) = spawn_fake_store().await;
    let store = RestStore::new(&base);
    let path = NodePath::new("certifications");

    let key = store
        .create(&path, json!({"title": "CKA", "image": "a.png", "filter": "cloud"}))
        .await
        .unwrap();
    store.remove(&path, &key).await.unwrap();

    assert_eq!(store.fetch_child(&path, &key).await.unwrap(), None);
    assert_eq!(tree.fetch(&path).await.unwrap(), None);
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let (base, _tree) = spawn_fake_store().await;
    let store = RestStore::new(&base);

    let err = store.fetch(&NodePath::new("__boom__")).await.unwrap_err();
    assert_eq!(err, StoreError::Status { code: 500, path: "__boom__".to_string() });
}

#[tokio::test]
async fn unreachable_store_maps_to_transport_error() {
    // Nothing listens on port 1.
    let store = RestStore::new("http://127.0.0.1:1");

    let err = store.fetch(&NodePath::new("experience")).await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)), "got {err:?}");

    let err = store.create(&NodePath::new("experience"), json!({})).await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));
}
