//! Path-keyed access to the JSON document store.
//!
//! The store is a hierarchical JSON tree addressed by slash-separated paths
//! and exposed over HTTP, where every addressable node ends in `.json`
//! (`{base}/{path}.json`). This module maps a conceptual
//! collection / record-key / field model onto that addressing scheme and
//! encapsulates the four CRUD verbs.
//!
//! Two implementations share the [`Store`] trait: [`RestStore`] speaks the
//! wire protocol with reqwest, and [`MemoryStore`] keeps the tree in process
//! for tests and local development.
//!
//! A missing node is not an error: reads return `Ok(None)` when nothing has
//! been written at a path, and [`StoreError`] is reserved for requests that
//! actually failed. Callers can fall back to defaults on absent data while
//! still seeing a broken store when it breaks.

mod error;
mod memory;
mod path;
mod rest;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use path::NodePath;
pub use rest::RestStore;
pub use store::Store;
