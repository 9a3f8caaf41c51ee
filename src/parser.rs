//! Pure per-document parsing: front matter, title and tag extraction, and the
//! `[[Title]]` WikiLink scan.
//!
//! [parse_markdown] never fails on well-formed UTF-8 input: anything absent
//! falls back to a default (missing title becomes the filename stem, missing
//! tags become an empty list, malformed front matter is treated as empty).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

use crate::model::{Edge, Node};

/// Delimiter line marking a front matter block at the very start of a
/// document.
const FRONT_MATTER_DELIMITER: &str = "---";

/// Default character window around a WikiLink occurrence when extracting its
/// context snippet.
pub const DEFAULT_CONTEXT_LENGTH: usize = 100;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("static heading pattern"));

static WIKILINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("static wikilink pattern"));

/// Front matter keys the parser consumes. Unknown keys are ignored; `tags`
/// may be either a YAML sequence or a comma-separated scalar.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    tags: Option<TagValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagValue {
    List(Vec<String>),
    Inline(String),
}

impl FrontMatter {
    fn tags(&self) -> Vec<String> {
        match &self.tags {
            Some(TagValue::List(tags)) => tags.clone(),
            Some(TagValue::Inline(joined)) => joined
                .split(',')
                .map(|tag| tag.trim().to_string())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Split a leading front matter block off `content`.
///
/// When both delimiters are present the enclosed region is excised from the
/// body whether or not its contents parse: a malformed block silently yields
/// the empty front matter rather than surfacing as title/link material.
fn split_front_matter(content: &str) -> (FrontMatter, &str) {
    if let Some(rest) = content.strip_prefix(FRONT_MATTER_DELIMITER) {
        if let Some(end) = rest.find(FRONT_MATTER_DELIMITER) {
            let block = &rest[..end];
            let body = rest[end + FRONT_MATTER_DELIMITER.len()..].trim();
            let front_matter = serde_yaml::from_str(block).unwrap_or_else(|e| {
                tracing::debug!("Ignoring malformed front matter: {e}");
                FrontMatter::default()
            });
            return (front_matter, body);
        }
    }
    (FrontMatter::default(), content)
}

/// First level-1 heading in the body, or the filename stem when none exists.
fn extract_title(body: &str, filepath: &str) -> String {
    if let Some(captures) = HEADING_RE.captures(body) {
        return captures[1].trim().to_string();
    }
    Path::new(filepath)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Every `[[Title]]` inner text in document order. Repeated references are
/// returned once per occurrence.
fn extract_wikilinks(body: &str) -> Vec<String> {
    WIKILINK_RE
        .captures_iter(body)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Window of roughly `context_length` characters centered on the first
/// occurrence of the literal `[[link_title]]`, clipped to the body and to
/// char boundaries, trimmed. Empty when the literal is not found.
fn find_context(body: &str, link_title: &str, context_length: usize) -> String {
    let needle = format!("[[{link_title}]]");
    let Some(position) = body.find(&needle) else {
        return String::new();
    };
    let mut start = position.saturating_sub(context_length / 2);
    let mut end = (position + needle.len() + context_length / 2).min(body.len());
    while !body.is_char_boundary(start) {
        start -= 1;
    }
    while !body.is_char_boundary(end) {
        end += 1;
    }
    body[start..end].trim().to_string()
}

/// Parse one document's text into its source node, one placeholder node per
/// WikiLink, and one edge per WikiLink, all in occurrence order.
///
/// Pure function: no I/O, no shared state. The source node is always first in
/// the returned node list. Empty content yields exactly one node (titled with
/// the filename stem) and zero edges.
pub fn parse_markdown(filepath: &str, content: &str) -> (Vec<Node>, Vec<Edge>) {
    let (front_matter, body) = split_front_matter(content);

    let title = extract_title(body, filepath);
    let source = Node::new(filepath, &title, front_matter.tags());
    let src_id = source.id.clone();

    let mut nodes = vec![source];
    let mut edges = Vec::new();
    for link_title in extract_wikilinks(body) {
        let context = find_context(body, &link_title, DEFAULT_CONTEXT_LENGTH);
        let target = Node::placeholder(&link_title);
        edges.push(Edge::link(&src_id, &target.id, Some(context)));
        nodes.push(target);
    }

    (nodes, edges)
}
