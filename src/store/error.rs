//! Error types for store operations.

use std::error::Error;
use std::fmt;

/// A store request that failed.
///
/// Absent nodes are not represented here — reads return `Ok(None)` for a
/// path that was never written. Every variant means the request itself went
/// wrong, so callers can tell "nothing there" from "could not reach the
/// store" and choose fallback or surfacing accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The request never completed (connection refused, DNS failure, timeout).
    Transport(String),
    /// The store answered with a non-success status.
    Status { code: u16, path: String },
    /// The response body was not the JSON we expected.
    Decode { path: String, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Transport(message) => write!(f, "store unreachable: {}", message),
            StoreError::Status { code, path } => {
                write!(f, "store returned status {} for {}", code, path)
            }
            StoreError::Decode { path, message } => {
                write!(f, "undecodable response for {}: {}", path, message)
            }
        }
    }
}

impl Error for StoreError {}
