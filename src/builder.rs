//! Incremental graph construction across an arbitrarily ordered stream of
//! documents.
//!
//! [GraphBuilder] owns all session state. References can arrive before their
//! target document is ingested (forward references) or after (backward
//! references); the placeholder promotion rule in `add_node` makes the merge
//! outcome order-independent with respect to which real document supplies the
//! canonical node, as long as exactly one real document claims a given title.

use globset::{GlobBuilder, GlobMatcher};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs::read_to_string,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

use crate::{
    error::Md2kgError,
    model::{Edge, Node},
    parser::parse_markdown,
};

/// Glob pattern selecting every Markdown file under a directory, recursively.
pub const DEFAULT_PATTERN: &str = "**/*.md";

/// Compile a glob-style pattern into a matcher over slash-separated relative
/// paths. `*` does not cross path separators, so recursive selection needs an
/// explicit `**` component, matching the pattern dialect of the CLI surface.
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher, Md2kgError> {
    Ok(GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()?
        .compile_matcher())
}

/// Enumerate regular files under `root` whose root-relative path matches
/// `pattern`, sorted for deterministic ingestion order.
///
/// Unreadable directory entries are skipped with a warning rather than
/// aborting the walk.
pub fn scan_dir(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, Md2kgError> {
    let matcher = compile_pattern(pattern)?;
    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {:?}: {e}", root);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| matcher.is_match(path.strip_prefix(root).unwrap_or(path)))
        .collect::<Vec<PathBuf>>();
    files.sort();
    Ok(files)
}

/// Builds a knowledge graph from Markdown files, merging duplicate nodes and
/// resolving `[[Title]]` references between documents.
///
/// Nodes live in an arena in first-registration order; `handle_by_id` maps
/// every id ever registered to its current canonical arena handle, and
/// promotion rewrites only that mapping. All state is mutated in place on one
/// thread; construct independent builders for independent sessions.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Node arena. Handles are indices; entries are never removed.
    nodes: Vec<Node>,
    /// Node id to current canonical arena handle. Rewritten as placeholders
    /// are superseded by real nodes.
    handle_by_id: BTreeMap<String, usize>,
    /// Every node id ever registered under a title. Grows monotonically.
    ids_by_title: BTreeMap<String, BTreeSet<String>>,
    /// Append-only, in document processing then occurrence order.
    edges: Vec<Edge>,
    /// Absolutized paths already ingested, for idempotent re-addition.
    processed_files: BTreeSet<PathBuf>,
}

impl GraphBuilder {
    pub fn new() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Ingest a single Markdown file.
    ///
    /// Re-adding an already processed path is a no-op. A read failure is
    /// recoverable: it is reported via tracing and this file is abandoned,
    /// leaving the builder ready for further ingestion.
    pub fn add_file<P: AsRef<Path>>(&mut self, filepath: P) {
        let abs_path = match std::path::absolute(filepath.as_ref()) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Cannot resolve path {:?}: {e}", filepath.as_ref());
                return;
            }
        };
        if !self.processed_files.insert(abs_path.clone()) {
            return;
        }

        let content = match read_to_string(&abs_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Error reading file {:?}: {e}", abs_path);
                return;
            }
        };

        tracing::debug!("Parsing {:?}", abs_path);
        let (nodes, edges) = parse_markdown(&abs_path.to_string_lossy(), &content);
        for node in nodes {
            self.add_node(node);
        }
        // Edges reference node ids, which resolve at read-out time, so they
        // are appended verbatim and never rewritten.
        self.edges.extend(edges);
    }

    /// Ingest every file under `dirpath` matching the glob `pattern`
    /// (see [DEFAULT_PATTERN]), in sorted enumeration order.
    pub fn add_directory<P: AsRef<Path>>(
        &mut self,
        dirpath: P,
        pattern: &str,
    ) -> Result<(), Md2kgError> {
        let root = std::path::absolute(dirpath.as_ref())?;
        for filepath in scan_dir(&root, pattern)? {
            self.add_file(filepath);
        }
        Ok(())
    }

    /// Register a parsed node, resolving duplicate titles.
    ///
    /// A placeholder arriving after the real document aliases itself to the
    /// real node; a real document arriving after placeholders retroactively
    /// promotes every placeholder registered under its title. The first real
    /// node registered under a title stays canonical: a second real document
    /// with the same title keeps its own id and entry, never overwriting the
    /// first.
    fn add_node(&mut self, node: Node) {
        // Exact id seen before: the parser may emit the same placeholder
        // twice for repeated references.
        if self.handle_by_id.contains_key(&node.id) {
            return;
        }

        let id = node.id.clone();
        let title = node.title.clone();
        let is_placeholder = node.is_placeholder();
        let handle = self.nodes.len();
        self.nodes.push(node);
        self.handle_by_id.insert(id.clone(), handle);

        let title_ids = self.ids_by_title.entry(title).or_default();
        title_ids.insert(id.clone());
        if title_ids.len() <= 1 {
            // First node ever seen with this title.
            return;
        }
        let siblings: Vec<String> = title_ids.iter().filter(|i| **i != id).cloned().collect();

        if is_placeholder {
            // Lowest handle = earliest registration, so a title claimed by
            // several real documents still resolves to the first one.
            let real_handle = siblings
                .iter()
                .filter_map(|sibling| self.handle_by_id.get(sibling).copied())
                .filter(|&h| !self.nodes[h].is_placeholder())
                .min();
            if let Some(real_handle) = real_handle {
                self.handle_by_id.insert(id, real_handle);
            }
        } else {
            for sibling in siblings {
                if let Some(&sibling_handle) = self.handle_by_id.get(&sibling) {
                    if self.nodes[sibling_handle].is_placeholder() {
                        self.handle_by_id.insert(sibling, handle);
                    }
                }
            }
        }
    }

    /// The deduplicated node set and the full edge sequence.
    ///
    /// After promotion many ids may resolve to one canonical node; each
    /// canonical node appears once, in first-registration order. Edges are
    /// returned unchanged.
    pub fn get_graph(&self) -> (Vec<Node>, Vec<Edge>) {
        let canonical: BTreeSet<usize> = self.handle_by_id.values().copied().collect();
        let nodes = canonical
            .into_iter()
            .map(|handle| self.nodes[handle].clone())
            .collect();
        (nodes, self.edges.clone())
    }
}
