//! Graph data model: [Node], [Edge], and the content-derived identity digest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Label applied to every node produced from a source document.
pub const DOCUMENT_LABEL: &str = "Document";

/// Relationship type for every WikiLink-derived edge.
pub const LINK_TYPE: &str = "LINK";

/// Deterministic node identity: SHA-256 over `filepath + ":" + title`,
/// lowercase hex.
///
/// Two calls with equal inputs always return equal outputs; the
/// [GraphBuilder](crate::builder::GraphBuilder) merge rule depends on this.
/// Placeholder ids are derived with an empty filepath, which is what makes
/// every reference to the same title collide to one id regardless of which
/// document produced it.
pub fn node_id(filepath: &str, title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(filepath.as_bytes());
    hasher.update(b":");
    hasher.update(title.as_bytes());
    hex::encode(hasher.finalize())
}

/// A document (or referenced-but-unseen document) in the knowledge graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub title: String,
    /// Absolute path of the backing document. Empty for placeholders.
    pub filepath: String,
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_labels() -> Vec<String> {
    vec![DOCUMENT_LABEL.to_string()]
}

impl Node {
    pub fn new(filepath: &str, title: &str, tags: Vec<String>) -> Node {
        Node {
            id: node_id(filepath, title),
            title: title.to_string(),
            filepath: filepath.to_string(),
            labels: default_labels(),
            tags,
        }
    }

    /// A node created solely because a document referenced `title`. Its id is
    /// derived with an empty filepath so all placeholders for one title share
    /// an id.
    pub fn placeholder(title: &str) -> Node {
        Node::new("", title, Vec::new())
    }

    pub fn is_placeholder(&self) -> bool {
        self.filepath.is_empty()
    }
}

/// A directed reference between two nodes. Multiplicity is allowed: each
/// WikiLink occurrence yields its own edge, even for repeated targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub src_id: String,
    pub dst_id: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    pub context_snippet: Option<String>,
}

impl Edge {
    pub fn link(src_id: &str, dst_id: &str, context_snippet: Option<String>) -> Edge {
        Edge {
            src_id: src_id.to_string(),
            dst_id: dst_id.to_string(),
            edge_type: LINK_TYPE.to_string(),
            context_snippet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_is_deterministic() {
        assert_eq!(node_id("a.md", "Title"), node_id("a.md", "Title"));
    }

    #[test]
    fn node_id_distinguishes_filepaths() {
        assert_ne!(node_id("a.md", "Title"), node_id("b.md", "Title"));
        assert_ne!(node_id("", "Title"), node_id("a.md", "Title"));
    }

    #[test]
    fn node_id_is_hex_digest() {
        let id = node_id("notes/doc.md", "Doc");
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn placeholders_for_one_title_share_an_id() {
        let a = Node::placeholder("Shared Title");
        let b = Node::placeholder("Shared Title");
        assert_eq!(a.id, b.id);
        assert!(a.is_placeholder());
    }
}
