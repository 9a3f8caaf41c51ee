//! CSV serialization of the final graph, one table for nodes and one for
//! edges, RFC 4180 with every field quoted so embedded separators, quotes,
//! and newlines survive Neo4j/DuckDB style bulk import.

use csv::{QuoteStyle, WriterBuilder};
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use crate::{
    error::Md2kgError,
    model::{Edge, Node, DOCUMENT_LABEL},
};

/// Node table header, in contract order.
pub const NODE_COLUMNS: [&str; 5] = ["id", "title", "filepath", "labels", "tags"];

/// Edge table header, in contract order.
pub const EDGE_COLUMNS: [&str; 4] = ["src_id", "dst_id", "type", "context_snippet"];

/// Paths of the two files written by [CsvExporter::export].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub nodes_csv: PathBuf,
    pub edges_csv: PathBuf,
}

/// Exports graph data to `nodes.csv` and `edges.csv` (filenames
/// overridable). Unlike ingestion, write failures here are fatal: a partial
/// export is surfaced to the caller as an error.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    nodes_filename: String,
    edges_filename: String,
}

impl Default for CsvExporter {
    fn default() -> Self {
        CsvExporter {
            nodes_filename: "nodes.csv".to_string(),
            edges_filename: "edges.csv".to_string(),
        }
    }
}

impl CsvExporter {
    pub fn new() -> CsvExporter {
        CsvExporter::default()
    }

    pub fn with_filenames(nodes_filename: &str, edges_filename: &str) -> CsvExporter {
        CsvExporter {
            nodes_filename: nodes_filename.to_string(),
            edges_filename: edges_filename.to_string(),
        }
    }

    /// Write both tables under `output_dir`, creating the directory (and
    /// parents) if absent. Header rows are always written; zero-length node
    /// or edge lists produce header-only files.
    pub fn export(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        output_dir: &Path,
    ) -> Result<ExportPaths, Md2kgError> {
        create_dir_all(output_dir)?;
        let paths = ExportPaths {
            nodes_csv: output_dir.join(&self.nodes_filename),
            edges_csv: output_dir.join(&self.edges_filename),
        };
        self.write_nodes(nodes, &paths.nodes_csv)?;
        self.write_edges(edges, &paths.edges_csv)?;
        Ok(paths)
    }

    fn write_nodes(&self, nodes: &[Node], path: &Path) -> Result<(), Md2kgError> {
        tracing::debug!("Writing {} nodes to {:?}", nodes.len(), path);
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_path(path)?;
        writer.write_record(NODE_COLUMNS)?;
        for node in nodes {
            let labels = if node.labels.is_empty() {
                DOCUMENT_LABEL.to_string()
            } else {
                node.labels.join(",")
            };
            let tags = node.tags.join(";");
            writer.write_record([
                node.id.as_str(),
                node.title.as_str(),
                node.filepath.as_str(),
                labels.as_str(),
                tags.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_edges(&self, edges: &[Edge], path: &Path) -> Result<(), Md2kgError> {
        tracing::debug!("Writing {} edges to {:?}", edges.len(), path);
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_path(path)?;
        writer.write_record(EDGE_COLUMNS)?;
        for edge in edges {
            writer.write_record([
                edge.src_id.as_str(),
                edge.dst_id.as_str(),
                edge.edge_type.as_str(),
                edge.context_snippet.as_deref().unwrap_or(""),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}
