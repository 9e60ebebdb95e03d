//! folio — content backend for a personal portfolio.
//!
//! The crate is built around a path-keyed accessor ([`store`]) for a
//! Firebase-RTDB-style JSON document store, with two axum services on top:
//! the public site ([`site`]) and the admin dashboard ([`admin`]).
//!
//! The store holds no schema; content sections ([`content`]) give the
//! subtrees the two services touch their typed shapes. Writes are
//! single-request replacements with no transaction — the store is operated
//! by a single administrator, and concurrent read-modify-write edits are
//! last-write-wins by design.

pub mod admin;
pub mod auth;
pub mod config;
pub mod content;
pub mod notify;
pub mod site;
pub mod store;
pub mod upload;

pub use config::Config;
pub use store::{MemoryStore, NodePath, RestStore, Store, StoreError};
