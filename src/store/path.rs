//! Path normalization and URL building.

use std::fmt;

/// A normalized slash-separated path addressing one node in the store.
///
/// Construction strips leading and trailing slashes and drops empty
/// segments, so `NodePath::new("/experience/")` and
/// `NodePath::new("experience")` address the same node. The empty path
/// addresses the tree root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(String);

impl NodePath {
    /// Normalize a slash-separated path.
    pub fn new(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        NodePath(segments.join("/"))
    }

    /// Append one segment — a record key or a field name.
    pub fn join(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            NodePath::new(segment)
        } else {
            NodePath::new(&format!("{}/{}", self.0, segment))
        }
    }

    /// Render the request URL for this node: `{base}/{path}.json`.
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}.json", base.trim_end_matches('/'), self.0)
    }

    /// The normalized path, without leading or trailing slashes.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
