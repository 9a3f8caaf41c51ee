//! Integration tests for graph construction: duplicate-node resolution,
//! placeholder promotion, and ingestion idempotence.

mod common;

use common::write_file;
use md2kg::builder::{GraphBuilder, DEFAULT_PATTERN};
use tempfile::tempdir;
use test_log::test;

#[test]
fn build_from_multiple_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    write_file(
        temp_dir.path(),
        "doc1.md",
        "# Document 1\n\nThis links to [[Document 2]].\n",
    );
    write_file(
        temp_dir.path(),
        "doc2.md",
        "# Document 2\n\nThis links to [[Document 1]] and [[Document 3]].\n",
    );

    let mut builder = GraphBuilder::new();
    builder.add_directory(temp_dir.path(), DEFAULT_PATTERN)?;
    let (nodes, edges) = builder.get_graph();

    // Document 3 has no backing file and stays a placeholder.
    assert_eq!(nodes.len(), 3);
    assert_eq!(edges.len(), 3);

    let titles: Vec<&str> = nodes.iter().map(|n| n.title.as_str()).collect();
    assert!(titles.contains(&"Document 1"));
    assert!(titles.contains(&"Document 2"));
    assert!(titles.contains(&"Document 3"));

    let doc3 = nodes.iter().find(|n| n.title == "Document 3").unwrap();
    assert!(doc3.is_placeholder());
    Ok(())
}

#[test]
fn duplicate_nodes_merge_to_the_real_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let target_path = write_file(
        temp_dir.path(),
        "source1.md",
        "# Common Target\n\nThis is the first file with the title.\n",
    );
    write_file(
        temp_dir.path(),
        "source2.md",
        "# Source\n\nThis links to [[Common Target]].\n",
    );

    let mut builder = GraphBuilder::new();
    builder.add_directory(temp_dir.path(), DEFAULT_PATTERN)?;
    let (nodes, _) = builder.get_graph();

    assert_eq!(nodes.len(), 2);
    let target: Vec<_> = nodes.iter().filter(|n| n.title == "Common Target").collect();
    assert_eq!(target.len(), 1);
    let expected = std::path::absolute(&target_path)?;
    assert_eq!(target[0].filepath, expected.to_string_lossy());
    Ok(())
}

#[test]
fn unresolved_reference_yields_placeholder() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    write_file(
        temp_dir.path(),
        "source.md",
        "# Source Document\n\nThis links to [[Non-existent Document]].\n",
    );

    let mut builder = GraphBuilder::new();
    builder.add_directory(temp_dir.path(), DEFAULT_PATTERN)?;
    let (nodes, edges) = builder.get_graph();

    assert_eq!(nodes.len(), 2);
    let placeholders: Vec<_> = nodes
        .iter()
        .filter(|n| n.title == "Non-existent Document")
        .collect();
    assert_eq!(placeholders.len(), 1);
    assert_eq!(placeholders[0].filepath, "");

    assert_eq!(edges.len(), 1);
    assert_ne!(edges[0].src_id, edges[0].dst_id);
    Ok(())
}

#[test]
fn add_single_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let file_path = write_file(
        temp_dir.path(),
        "single.md",
        "# Single Document\n\nThis is a standalone document.\n",
    );

    let mut builder = GraphBuilder::new();
    builder.add_file(&file_path);
    let (nodes, edges) = builder.get_graph();

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].title, "Single Document");
    assert!(edges.is_empty());
    Ok(())
}

#[test]
fn re_ingestion_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let file_path = write_file(
        temp_dir.path(),
        "doc.md",
        "# Doc\n\nSee [[Other]] and [[Other]] again.\n",
    );

    let mut builder = GraphBuilder::new();
    builder.add_file(&file_path);
    let snapshot1 = builder.get_graph();
    builder.add_file(&file_path);
    let snapshot2 = builder.get_graph();

    assert_eq!(snapshot1, snapshot2);
    assert_eq!(snapshot1.1.len(), 2);
    Ok(())
}

#[test]
fn ingestion_order_does_not_change_the_merge() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let referencing = write_file(temp_dir.path(), "a.md", "# A\n\nSee [[T]].\n");
    let referenced = write_file(temp_dir.path(), "t.md", "# T\n\nTarget text.\n");

    let mut forward = GraphBuilder::new();
    forward.add_file(&referencing);
    forward.add_file(&referenced);

    let mut backward = GraphBuilder::new();
    backward.add_file(&referenced);
    backward.add_file(&referencing);

    let (forward_nodes, forward_edges) = forward.get_graph();
    let (backward_nodes, backward_edges) = backward.get_graph();

    assert_eq!(forward_nodes.len(), backward_nodes.len());
    assert_eq!(forward_edges.len(), backward_edges.len());

    let canonical_t = |nodes: &[md2kg::model::Node]| {
        nodes.iter().find(|n| n.title == "T").cloned().unwrap()
    };
    assert_eq!(canonical_t(&forward_nodes), canonical_t(&backward_nodes));
    assert!(!canonical_t(&forward_nodes).is_placeholder());
    Ok(())
}

#[test]
fn unreadable_file_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let good = write_file(temp_dir.path(), "good.md", "# Good\n");

    let mut builder = GraphBuilder::new();
    builder.add_file(temp_dir.path().join("missing.md"));
    builder.add_file(&good);
    let (nodes, edges) = builder.get_graph();

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].title, "Good");
    assert!(edges.is_empty());
    Ok(())
}

#[test]
fn directory_pattern_filters_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    write_file(temp_dir.path(), "included.md", "# Included\n\n[[Ref]]\n");
    write_file(temp_dir.path(), "skipped.txt", "# Skipped\n\n[[Ref]]\n");
    write_file(temp_dir.path(), "subdir/nested.md", "# Nested\n");

    let mut builder = GraphBuilder::new();
    builder.add_directory(temp_dir.path(), DEFAULT_PATTERN)?;
    let (nodes, edges) = builder.get_graph();

    let titles: Vec<&str> = nodes.iter().map(|n| n.title.as_str()).collect();
    assert!(titles.contains(&"Included"));
    assert!(titles.contains(&"Nested"));
    assert!(!titles.contains(&"Skipped"));
    assert_eq!(edges.len(), 1);
    Ok(())
}

#[test]
fn invalid_pattern_is_an_error() {
    let mut builder = GraphBuilder::new();
    let result = builder.add_directory(".", "**/*.{md");
    assert!(result.is_err());
}

#[test]
fn front_matter_tags_reach_the_graph() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    write_file(
        temp_dir.path(),
        "tagged.md",
        "---\ntags: project, draft\n---\n# Tagged\n",
    );

    let mut builder = GraphBuilder::new();
    builder.add_directory(temp_dir.path(), DEFAULT_PATTERN)?;
    let (nodes, _) = builder.get_graph();

    assert_eq!(nodes[0].tags, vec!["project".to_string(), "draft".to_string()]);
    Ok(())
}
